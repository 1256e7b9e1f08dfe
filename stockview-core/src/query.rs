//! The immutable input of one interaction: ticker plus date range.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::DashboardError;

/// Date format accepted from the form and the CLI.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Uppercased ticker symbol. No other validation: an unknown symbol simply
/// produces an empty series downstream.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TickerSymbol(String);

impl TickerSymbol {
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for TickerSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Requested history window. `end` is exclusive.
///
/// `start >= end` is allowed and yields an empty series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// True when no trading day can fall inside the window.
    pub fn is_degenerate(&self) -> bool {
        self.start >= self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to {}",
            self.start.format(DATE_FORMAT),
            self.end.format(DATE_FORMAT)
        )
    }
}

/// Everything the fetcher and presenter need for one pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub ticker: TickerSymbol,
    pub range: DateRange,
}

impl Query {
    pub fn new(ticker: &str, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            ticker: TickerSymbol::new(ticker),
            range: DateRange::new(start, end),
        }
    }

    /// Build a query from the raw text of the three input fields.
    pub fn from_inputs(ticker: &str, start: &str, end: &str) -> Result<Self, DashboardError> {
        let start = parse_date("start date", start)?;
        let end = parse_date("end date", end)?;
        Ok(Self::new(ticker, start, end))
    }
}

/// Parse a `YYYY-MM-DD` field, naming the field in the error.
pub fn parse_date(field: &str, text: &str) -> Result<NaiveDate, DashboardError> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).map_err(|e| {
        DashboardError::InvalidInput(format!("{field} '{}' is not YYYY-MM-DD: {e}", text.trim()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticker_is_uppercased_and_trimmed() {
        assert_eq!(TickerSymbol::new(" aapl ").as_str(), "AAPL");
        assert_eq!(TickerSymbol::new("brk-b").as_str(), "BRK-B");
        assert!(TickerSymbol::new("   ").is_empty());
    }

    #[test]
    fn from_inputs_parses_dates() {
        let q = Query::from_inputs("tsla", "2023-01-01", "2023-01-10").unwrap();
        assert_eq!(q.ticker.as_str(), "TSLA");
        assert_eq!(q.range.start, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
        assert_eq!(q.range.end, NaiveDate::from_ymd_opt(2023, 1, 10).unwrap());
    }

    #[test]
    fn bad_date_is_invalid_input() {
        let err = Query::from_inputs("AAPL", "2023-13-01", "2023-01-10").unwrap_err();
        assert!(matches!(err, DashboardError::InvalidInput(_)));
        assert!(err.to_string().contains("start date"));
    }

    #[test]
    fn reversed_range_is_accepted_but_degenerate() {
        let q = Query::from_inputs("AAPL", "2023-02-01", "2023-01-01").unwrap();
        assert!(q.range.is_degenerate());
    }

    #[test]
    fn range_display() {
        let r = DateRange::new(
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2023, 1, 10).unwrap(),
        );
        assert_eq!(r.to_string(), "2023-01-01 to 2023-01-10");
    }
}
