//! Error types for risk analysis.

use thiserror::Error;

use crate::types::DateRange;

/// Top-level risk analysis error.
#[derive(Error, Debug)]
pub enum RiskError {
    #[error("No price data available for {symbol} in {range}")]
    DataUnavailable { symbol: String, range: DateRange },

    #[error("Return series is empty: {prices} price(s) cannot produce a return")]
    EmptyReturns { prices: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Insufficient data: need {required} observations, have {available}")]
    InsufficientData { required: usize, available: usize },

    #[error("Data error: {0}")]
    Data(#[from] DataError),
}

/// Price source errors.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    #[error("Invalid price series: {0}")]
    InvalidSeries(String),

    #[error("Invalid interval: {0}")]
    InvalidInterval(String),

    #[error("Invalid date range: {0}")]
    InvalidRange(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for risk operations.
pub type RiskResult<T> = Result<T, RiskError>;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_data_unavailable_message() {
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        )
        .unwrap();
        let err = RiskError::DataUnavailable {
            symbol: "SPY".to_string(),
            range,
        };
        assert_eq!(
            err.to_string(),
            "No price data available for SPY in 2024-01-01..2025-01-01"
        );
    }

    #[test]
    fn test_data_error_converts() {
        let err: RiskError = DataError::SymbolNotFound("XYZ".to_string()).into();
        assert!(matches!(err, RiskError::Data(DataError::SymbolNotFound(_))));
    }
}
