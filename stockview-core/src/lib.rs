//! stockview core: everything between the input form and the screen.
//!
//! - Query types (ticker, date range) built once per interaction
//! - Market-data provider trait and the Yahoo Finance implementation
//! - Dashboard view model (table, closing line, candles, headlines)
//! - Fetch pipeline with a single failure boundary
//! - TOML configuration

pub mod config;
pub mod domain;
pub mod error;
pub mod fixtures;
pub mod pipeline;
pub mod present;
pub mod provider;
pub mod query;
pub mod yahoo;

pub use config::{ConfigError, StockviewConfig};
pub use domain::{NewsItem, PriceBar, PriceSeries, RawNewsItem};
pub use error::{DashboardError, Severity};
pub use pipeline::{PipelineState, run};
pub use present::{Dashboard, DisplayLimits};
pub use provider::{MarketDataProvider, ProviderError};
pub use query::{DateRange, Query, TickerSymbol};
pub use yahoo::YahooProvider;
