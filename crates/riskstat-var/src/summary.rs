//! VaR summary tables.

use serde::{Deserialize, Serialize};

/// One confidence level with the three estimates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VaRRow {
    /// Level label, e.g. `"5%"`
    #[serde(rename = "Confidence Level")]
    pub confidence_level: String,
    #[serde(rename = "Parametric VaR")]
    pub parametric: f64,
    #[serde(rename = "Historical VaR")]
    pub historical: f64,
    #[serde(rename = "Monte Carlo VaR")]
    pub monte_carlo: f64,
}

/// Rows in the order the levels were requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VaRSummary {
    symbol: String,
    rows: Vec<VaRRow>,
}

impl VaRSummary {
    pub fn new(symbol: impl Into<String>, rows: Vec<VaRRow>) -> Self {
        Self {
            symbol: symbol.into(),
            rows,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn rows(&self) -> &[VaRRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render a fixed-width console table.
    pub fn to_table(&self) -> String {
        let mut s = String::new();

        s.push_str("═══════════════════════════════════════════════════════════════════\n");
        s.push_str(&format!("  VALUE AT RISK: {}\n", self.symbol));
        s.push_str("═══════════════════════════════════════════════════════════════════\n");
        s.push_str(&format!(
            "  {:<18}{:>15}{:>15}{:>17}\n",
            "Confidence Level", "Parametric VaR", "Historical VaR", "Monte Carlo VaR"
        ));
        s.push_str("───────────────────────────────────────────────────────────────────\n");

        for row in &self.rows {
            s.push_str(&format!(
                "  {:<18}{:>15.6}{:>15.6}{:>17.6}\n",
                row.confidence_level, row.parametric, row.historical, row.monte_carlo
            ));
        }

        s.push_str("═══════════════════════════════════════════════════════════════════\n");

        s
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export the rows to CSV with a header line.
    pub fn to_csv(&self) -> Result<String, csv::Error> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for row in &self.rows {
            writer.serialize(row)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| csv::Error::from(e.into_error()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> VaRSummary {
        VaRSummary::new(
            "SPY",
            vec![
                VaRRow {
                    confidence_level: "1%".to_string(),
                    parametric: 0.0251,
                    historical: 0.0263,
                    monte_carlo: 0.0249,
                },
                VaRRow {
                    confidence_level: "5%".to_string(),
                    parametric: 0.0172,
                    historical: 0.0160,
                    monte_carlo: 0.0175,
                },
            ],
        )
    }

    #[test]
    fn test_table_lists_rows_in_order() {
        let table = summary().to_table();
        assert!(table.contains("VALUE AT RISK: SPY"));
        assert!(table.contains("Monte Carlo VaR"));
        let one = table.find("  1% ").unwrap();
        let five = table.find("  5% ").unwrap();
        assert!(one < five);
        assert!(table.contains("0.026300"));
    }

    #[test]
    fn test_json_uses_column_names() {
        let json = summary().to_json().unwrap();
        assert!(json.contains("\"Confidence Level\": \"1%\""));
        assert!(json.contains("\"Historical VaR\": 0.0263"));

        let back: VaRSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(back, summary());
    }

    #[test]
    fn test_csv_has_header_and_rows() {
        let csv = summary().to_csv().unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("Confidence Level,Parametric VaR,Historical VaR,Monte Carlo VaR")
        );
        assert_eq!(lines.next(), Some("1%,0.0251,0.0263,0.0249"));
        assert_eq!(lines.next(), Some("5%,0.0172,0.016,0.0175"));
        assert_eq!(lines.next(), None);
    }
}
