//! Market-data provider trait and structured error types.
//!
//! The trait abstracts over data sources so the pipeline can run against
//! Yahoo Finance in the binaries and against in-memory fixtures in tests.

use thiserror::Error;

use crate::domain::{PriceSeries, RawNewsItem};
use crate::query::{DateRange, TickerSymbol};

/// Failures raised while talking to a provider.
///
/// Designed to be displayable as-is in both the CLI and the TUI banner.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("network unreachable: {0}")]
    Network(String),

    #[error("HTTP {status} for {symbol}")]
    Http { status: u16, symbol: String },

    #[error("response format changed: {0}")]
    ResponseFormat(String),

    #[error("provider error {code}: {description}")]
    Provider { code: String, description: String },

    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

/// A source of daily history and headlines.
///
/// Unknown symbols should come back as an empty series, not an error.
pub trait MarketDataProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Daily OHLCV rows for `symbol` in `range` (end exclusive), ascending.
    fn history(&self, symbol: &TickerSymbol, range: &DateRange) -> Result<PriceSeries, ProviderError>;

    /// Latest headlines for `symbol`. Not range-aware.
    ///
    /// Providers without a news feed keep this default and report no news.
    fn news(&self, _symbol: &TickerSymbol) -> Result<Vec<RawNewsItem>, ProviderError> {
        Ok(Vec::new())
    }
}
