//! TOML configuration: input defaults, display limits, provider settings.
//!
//! Every field has a default, so an absent or partial file is fine.
//!
//! ```toml
//! [defaults]
//! ticker = "AAPL"
//! start_date = "2023-01-01"
//!
//! [display]
//! table_rows = 10
//! candle_window = 90
//! news_limit = 5
//!
//! [provider]
//! timeout_secs = 30
//! auto_adjust = true
//! ```

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::DashboardError;
use crate::present::DisplayLimits;
use crate::query::{parse_date, Query};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Values pre-filled into the input form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputDefaults {
    pub ticker: String,
    pub start_date: NaiveDate,
    /// `None` means "today" at startup.
    pub end_date: Option<NaiveDate>,
}

impl Default for InputDefaults {
    fn default() -> Self {
        Self {
            ticker: "AAPL".to_string(),
            start_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or_default(),
            end_date: None,
        }
    }
}

impl InputDefaults {
    /// Replace defaults with values given on the command line.
    pub fn apply_overrides(
        &mut self,
        ticker: Option<&str>,
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<(), DashboardError> {
        if let Some(ticker) = ticker {
            self.ticker = ticker.to_string();
        }
        if let Some(start) = start {
            self.start_date = parse_date("start date", start)?;
        }
        if let Some(end) = end {
            self.end_date = Some(parse_date("end date", end)?);
        }
        Ok(())
    }
}

/// Yahoo Finance client settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub chart_url: String,
    pub search_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Scale OHLC by adjusted close / close.
    pub auto_adjust: bool,
    /// Headlines requested from the search endpoint (before filtering).
    pub news_count: usize,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            chart_url: "https://query2.finance.yahoo.com/v8/finance/chart".to_string(),
            search_url: "https://query2.finance.yahoo.com/v1/finance/search".to_string(),
            timeout_secs: 30,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string(),
            auto_adjust: true,
            news_count: 10,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StockviewConfig {
    pub defaults: InputDefaults,
    pub display: DisplayLimits,
    pub provider: ProviderConfig,
}

impl StockviewConfig {
    /// `<config dir>/stockview/config.toml`, when the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("stockview").join("config.toml"))
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Load an explicit file (which must exist), else the default path if a
    /// file is there, else built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => {
                log::info!("loading config from {}", path.display());
                Self::from_file(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    /// The query the form starts with.
    pub fn initial_query(&self, today: NaiveDate) -> Query {
        Query::new(
            &self.defaults.ticker,
            self.defaults.start_date,
            self.defaults.end_date.unwrap_or(today),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_the_form() {
        let cfg = StockviewConfig::default();
        assert_eq!(cfg.defaults.ticker, "AAPL");
        assert_eq!(cfg.defaults.start_date, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
        assert_eq!(cfg.display.table_rows, 10);
        assert_eq!(cfg.display.candle_window, 90);
        assert_eq!(cfg.display.news_limit, 5);
        assert!(cfg.provider.auto_adjust);
    }

    #[test]
    fn end_date_defaults_to_today() {
        let cfg = StockviewConfig::default();
        let today = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let q = cfg.initial_query(today);
        assert_eq!(q.ticker.as_str(), "AAPL");
        assert_eq!(q.range.end, today);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let cfg = StockviewConfig::from_toml_str(
            r#"
            [defaults]
            ticker = "tsla"

            [display]
            news_limit = 3
            "#,
        )
        .unwrap();
        assert_eq!(cfg.defaults.ticker, "tsla");
        assert_eq!(cfg.display.news_limit, 3);
        assert_eq!(cfg.display.candle_window, 90);
        assert_eq!(cfg.provider.timeout_secs, 30);

        // Normalization happens when the query is built, not at load time.
        let q = cfg.initial_query(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(q.ticker.as_str(), "TSLA");
    }

    #[test]
    fn overrides_replace_defaults() {
        let mut defaults = InputDefaults::default();
        defaults
            .apply_overrides(Some("goog"), None, Some("2023-03-31"))
            .unwrap();
        assert_eq!(defaults.ticker, "goog");
        assert_eq!(defaults.start_date, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
        assert_eq!(defaults.end_date, NaiveDate::from_ymd_opt(2023, 3, 31));

        let err = defaults.apply_overrides(None, Some("yesterday"), None).unwrap_err();
        assert!(matches!(err, DashboardError::InvalidInput(_)));
    }

    #[test]
    fn from_file_reads_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[defaults]\nstart_date = \"2022-06-01\"\nend_date = \"2022-12-31\""
        )
        .unwrap();
        let cfg = StockviewConfig::from_file(file.path()).unwrap();
        assert_eq!(cfg.defaults.start_date, NaiveDate::from_ymd_opt(2022, 6, 1).unwrap());
        assert_eq!(cfg.defaults.end_date, NaiveDate::from_ymd_opt(2022, 12, 31));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = StockviewConfig::load(Some(&missing)).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let err = StockviewConfig::from_toml_str("[display]\ntable_rows = \"ten\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
