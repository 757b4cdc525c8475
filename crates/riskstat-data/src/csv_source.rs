//! CSV price source.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::ReaderBuilder;
use riskstat_core::error::DataError;
use riskstat_core::traits::PriceSource;
use riskstat_core::types::{DateRange, Interval, PricePoint, PriceSeries};
use serde::Deserialize;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Header names accepted for the adjusted close column.
const ADJ_CLOSE_HEADERS: [&str; 3] = ["Adj Close", "adj_close", "adjclose"];

/// Header names accepted for the close column.
const CLOSE_HEADERS: [&str; 2] = ["Close", "close"];

/// CSV record format.
///
/// Matches Yahoo Finance daily exports and most broker downloads.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(alias = "Date", alias = "date", alias = "timestamp", alias = "Timestamp")]
    date: String,
    #[serde(rename = "Adj Close", alias = "adj_close", alias = "adjclose", default)]
    adj_close: Option<String>,
    #[serde(alias = "Close", alias = "close", default)]
    close: Option<String>,
}

/// Column a file's prices are read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PriceColumn {
    AdjClose,
    Close,
}

impl PriceColumn {
    /// Pick the column from the header row, preferring `Adj Close`.
    fn from_headers(headers: &csv::StringRecord) -> Option<Self> {
        let has = |names: &[&str]| headers.iter().any(|h| names.contains(&h));
        if has(&ADJ_CLOSE_HEADERS) {
            Some(PriceColumn::AdjClose)
        } else if has(&CLOSE_HEADERS) {
            Some(PriceColumn::Close)
        } else {
            None
        }
    }

    fn cell<'a>(&self, record: &'a CsvRecord) -> Option<&'a str> {
        match self {
            PriceColumn::AdjClose => record.adj_close.as_deref(),
            PriceColumn::Close => record.close.as_deref(),
        }
    }
}

/// CSV price source for historical data.
///
/// Points either at a single file, used for every symbol, or at a
/// directory holding one `<SYMBOL>.csv` per symbol.
pub struct CsvPriceSource {
    path: PathBuf,
}

impl CsvPriceSource {
    /// Create a new CSV price source.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DataError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("data path '{}' does not exist", path.display()),
            )));
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// Resolve the file holding `symbol`.
    fn file_for(&self, symbol: &str) -> Result<PathBuf, DataError> {
        if self.path.is_file() {
            return Ok(self.path.clone());
        }

        let lower = symbol.to_lowercase();
        let candidates = [
            self.path.join(format!("{}.csv", symbol)),
            self.path.join(format!("{}.csv", lower)),
            self.path.join(format!("{}_daily.csv", symbol)),
            self.path.join(format!("{}_daily.csv", lower)),
        ];

        candidates
            .into_iter()
            .find(|p| p.is_file())
            .ok_or_else(|| DataError::SymbolNotFound(symbol.to_string()))
    }

    /// Load every row of a CSV file as a price series.
    pub fn load_all(&self, symbol: &str) -> Result<PriceSeries, DataError> {
        let file_path = self.file_for(symbol)?;
        debug!(symbol, path = %file_path.display(), "Reading price file");
        let file = File::open(&file_path)?;
        Self::parse_reader(file, symbol)
    }

    /// Parse CSV content into a price series.
    ///
    /// The price column is chosen once from the header row: `Adj Close`
    /// when present, otherwise `Close`. Rows whose chosen cell is empty,
    /// `null` or `NaN` are dropped; rows are sorted by date before the
    /// series is validated.
    pub fn parse_reader<R: Read>(reader: R, symbol: &str) -> Result<PriceSeries, DataError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader
            .headers()
            .map_err(|e| DataError::ParseError(e.to_string()))?;
        let column = PriceColumn::from_headers(headers).ok_or_else(|| {
            DataError::ParseError(format!("{}: no Adj Close/Close column", symbol))
        })?;
        debug!(symbol, ?column, "Selected price column");

        let mut points = Vec::new();
        let mut dropped = 0usize;

        for result in reader.deserialize() {
            let record: CsvRecord = result.map_err(|e| DataError::ParseError(e.to_string()))?;

            match parse_price(column.cell(&record))? {
                Some(price) => points.push(PricePoint::new(parse_timestamp(&record.date)?, price)),
                None => dropped += 1,
            }
        }

        if dropped > 0 {
            debug!(symbol, dropped, "Dropped rows without a price");
        }

        // Sort by timestamp
        points.sort_by_key(|p| p.timestamp);

        PriceSeries::new(symbol, points)
    }
}

impl PriceSource for CsvPriceSource {
    fn fetch(
        &self,
        symbol: &str,
        range: &DateRange,
        interval: Interval,
    ) -> Result<PriceSeries, DataError> {
        let series = self.load_all(symbol)?.within(range).resample(interval);
        info!(
            symbol,
            %range,
            %interval,
            rows = series.len(),
            "Loaded prices from CSV"
        );
        Ok(series)
    }

    fn name(&self) -> &str {
        "csv"
    }
}

/// Parse a price cell; missing values map to `None`.
fn parse_price(cell: Option<&str>) -> Result<Option<f64>, DataError> {
    let cell = match cell {
        Some(c) => c.trim(),
        None => return Ok(None),
    };

    if cell.is_empty() || cell.eq_ignore_ascii_case("null") || cell.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }

    cell.parse::<f64>()
        .map(Some)
        .map_err(|_| DataError::ParseError(format!("Could not parse price: {}", cell)))
}

/// Parse various timestamp formats into Unix milliseconds.
fn parse_timestamp(date_str: &str) -> Result<i64, DataError> {
    // Offset-aware stamps keep their local calendar date
    for format in ["%Y-%m-%d %H:%M:%S%:z", "%Y-%m-%dT%H:%M:%S%:z"] {
        if let Ok(dt) = DateTime::parse_from_str(date_str, format) {
            return Ok(dt.naive_local().and_utc().timestamp_millis());
        }
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, format) {
            return Ok(dt.and_utc().timestamp_millis());
        }
    }

    for format in ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(date_str, format) {
            if let Some(dt) = d.and_hms_opt(0, 0, 0) {
                return Ok(dt.and_utc().timestamp_millis());
            }
        }
    }

    // Try parsing as Unix timestamp
    if let Ok(ts) = date_str.parse::<i64>() {
        // Assume milliseconds if > 10 digits
        if ts > 10_000_000_000 {
            return Ok(ts);
        }
        return ts
            .checked_mul(1000)
            .ok_or_else(|| DataError::ParseError(format!("Timestamp out of range: {}", date_str)));
    }

    Err(DataError::ParseError(format!(
        "Could not parse date: {}",
        date_str
    )))
}
