//! Price and news records as returned by a provider.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One daily history row.
///
/// OHLC are already adjusted when the provider runs with `auto_adjust`.
/// `dividends` and `stock_splits` are 0.0 on days without an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
    pub dividends: f64,
    pub stock_splits: f64,
}

impl PriceBar {
    /// Column headers in display order.
    pub const COLUMNS: [&'static str; 8] = [
        "Date",
        "Open",
        "High",
        "Low",
        "Close",
        "Volume",
        "Dividends",
        "Stock Splits",
    ];

    /// Close at or above open.
    pub fn is_up(&self) -> bool {
        self.close >= self.open
    }
}

/// Date-ordered daily history, ascending.
///
/// Built once per fetch and only ever sliced afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Wrap provider rows. Rows are kept in the order given; providers
    /// return them ascending by date.
    pub fn new(bars: Vec<PriceBar>) -> Self {
        Self { bars }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    /// The last `n` rows, or all rows when fewer exist.
    pub fn tail(&self, n: usize) -> &[PriceBar] {
        let start = self.bars.len().saturating_sub(n);
        &self.bars[start..]
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.bars.first().map(|b| b.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.bars.last().map(|b| b.date)
    }
}

/// Headline as delivered by the provider; either field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawNewsItem {
    pub title: Option<String>,
    pub link: Option<String>,
    pub publisher: Option<String>,
    /// Unix seconds.
    pub published_at: Option<i64>,
}

/// A headline with a non-empty title and link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub link: String,
    pub publisher: Option<String>,
}

impl NewsItem {
    /// Accept a raw item only when both title and link are present and
    /// non-empty.
    pub fn from_raw(raw: &RawNewsItem) -> Option<Self> {
        let title = raw.title.as_deref().filter(|t| !t.is_empty())?;
        let link = raw.link.as_deref().filter(|l| !l.is_empty())?;
        Some(Self {
            title: title.to_string(),
            link: link.to_string(),
            publisher: raw.publisher.clone(),
        })
    }
}
