//! In-memory providers and sample data for tests and offline demos.
//!
//! Lives outside `#[cfg(test)]` so the TUI and CLI test suites can drive the
//! real pipeline without network access.

use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::domain::{PriceBar, PriceSeries, RawNewsItem};
use crate::provider::{MarketDataProvider, ProviderError};
use crate::query::{DateRange, TickerSymbol};

/// `n` weekday bars starting 2023-01-03 with a deterministic zig-zag close.
pub fn sample_series(n: usize) -> PriceSeries {
    let mut bars = Vec::with_capacity(n);
    let mut date = NaiveDate::from_ymd_opt(2023, 1, 3).unwrap_or_default();
    let mut prev_close = 100.0;

    while bars.len() < n {
        if !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            let i = bars.len();
            // Drift up slowly, wiggle by a few dollars.
            let close = 100.0 + i as f64 * 0.25 + ((i * 7) % 11) as f64 - 5.0;
            let open = prev_close;
            bars.push(PriceBar {
                date,
                open,
                high: open.max(close) + 1.5,
                low: open.min(close) - 1.5,
                close,
                volume: 50_000_000 + (i as u64 % 13) * 1_000_000,
                dividends: 0.0,
                stock_splits: 0.0,
            });
            prev_close = close;
        }
        date += Duration::days(1);
    }

    PriceSeries::new(bars)
}

pub fn headline(title: Option<&str>, link: Option<&str>) -> RawNewsItem {
    RawNewsItem {
        title: title.map(str::to_string),
        link: link.map(str::to_string),
        publisher: None,
        published_at: None,
    }
}

/// Returns canned data, counting calls.
pub struct StaticProvider {
    pub series: PriceSeries,
    pub news: Vec<RawNewsItem>,
    history_calls: AtomicUsize,
    news_calls: AtomicUsize,
}

impl StaticProvider {
    pub fn new(series: PriceSeries, news: Vec<RawNewsItem>) -> Self {
        Self {
            series,
            news,
            history_calls: AtomicUsize::new(0),
            news_calls: AtomicUsize::new(0),
        }
    }

    /// A provider that knows nothing: every symbol is unknown.
    pub fn empty() -> Self {
        Self::new(PriceSeries::empty(), Vec::new())
    }

    pub fn history_calls(&self) -> usize {
        self.history_calls.load(Ordering::Relaxed)
    }

    pub fn news_calls(&self) -> usize {
        self.news_calls.load(Ordering::Relaxed)
    }
}

impl MarketDataProvider for StaticProvider {
    fn name(&self) -> &str {
        "static"
    }

    fn history(&self, _: &TickerSymbol, _: &DateRange) -> Result<PriceSeries, ProviderError> {
        self.history_calls.fetch_add(1, Ordering::Relaxed);
        Ok(self.series.clone())
    }

    fn news(&self, _: &TickerSymbol) -> Result<Vec<RawNewsItem>, ProviderError> {
        self.news_calls.fetch_add(1, Ordering::Relaxed);
        Ok(self.news.clone())
    }
}

/// Which call should fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailAt {
    History,
    News,
}

/// Fails with a network error at the chosen endpoint; the other one
/// returns `series` / no news.
pub struct FailingProvider {
    pub fail_at: FailAt,
    pub series: PriceSeries,
}

impl FailingProvider {
    pub fn at(fail_at: FailAt) -> Self {
        Self {
            fail_at,
            series: sample_series(5),
        }
    }
}

impl MarketDataProvider for FailingProvider {
    fn name(&self) -> &str {
        "failing"
    }

    fn history(&self, symbol: &TickerSymbol, _: &DateRange) -> Result<PriceSeries, ProviderError> {
        match self.fail_at {
            FailAt::History => Err(ProviderError::Network(format!(
                "connection reset while fetching {symbol}"
            ))),
            FailAt::News => Ok(self.series.clone()),
        }
    }

    fn news(&self, symbol: &TickerSymbol) -> Result<Vec<RawNewsItem>, ProviderError> {
        match self.fail_at {
            FailAt::News => Err(ProviderError::Http {
                status: 502,
                symbol: symbol.to_string(),
            }),
            FailAt::History => Ok(Vec::new()),
        }
    }
}
