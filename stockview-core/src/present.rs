//! Dashboard view model: the four independent views of one fetch.
//!
//! 1. Table: the most recent `table_rows` records, all columns.
//! 2. Closing line: close against date over the whole fetched range.
//! 3. Candles: the most recent `candle_window` records. The window is capped
//!    independently of the fetched range so chart cost stays bounded.
//! 4. Headlines: the first `news_limit` items with a title and a link.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{NewsItem, PriceBar, PriceSeries, RawNewsItem};
use crate::error::DashboardError;
use crate::query::Query;

/// Label of the closing-price series.
pub const CLOSING_LABEL: &str = "Closing Price";
/// Y-axis title of both charts.
pub const PRICE_AXIS: &str = "Price (USD)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayLimits {
    pub table_rows: usize,
    pub candle_window: usize,
    pub news_limit: usize,
}

impl Default for DisplayLimits {
    fn default() -> Self {
        Self {
            table_rows: 10,
            candle_window: 90,
            news_limit: 5,
        }
    }
}

/// One point of the closing-price line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClosePoint {
    pub date: NaiveDate,
    pub close: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub query: Query,
    pub table: Vec<PriceBar>,
    pub closing: Vec<ClosePoint>,
    pub candles: Vec<PriceBar>,
    pub news: Vec<NewsItem>,
}

impl Dashboard {
    pub fn build(
        query: Query,
        series: &PriceSeries,
        raw_news: &[RawNewsItem],
        limits: &DisplayLimits,
    ) -> Self {
        let table = series.tail(limits.table_rows).to_vec();
        let closing = series
            .bars()
            .iter()
            .map(|b| ClosePoint {
                date: b.date,
                close: b.close,
            })
            .collect();
        let candles = series.tail(limits.candle_window).to_vec();
        let news = valid_news(raw_news, limits.news_limit);

        Self {
            query,
            table,
            closing,
            candles,
            news,
        }
    }

    /// `MissingNews` when no headline survived filtering.
    pub fn news_notice(&self) -> Option<DashboardError> {
        if self.news.is_empty() {
            Some(DashboardError::MissingNews {
                ticker: self.query.ticker.clone(),
            })
        } else {
            None
        }
    }

    /// Number of fetched records (the closing line covers all of them).
    pub fn record_count(&self) -> usize {
        self.closing.len()
    }

    /// Lowest and highest close over the whole range.
    pub fn close_bounds(&self) -> Option<(f64, f64)> {
        if self.closing.is_empty() {
            return None;
        }
        let lo = self.closing.iter().map(|p| p.close).fold(f64::INFINITY, f64::min);
        let hi = self
            .closing
            .iter()
            .map(|p| p.close)
            .fold(f64::NEG_INFINITY, f64::max);
        Some((lo, hi))
    }

    /// (up, down) candle counts.
    pub fn candle_balance(&self) -> (usize, usize) {
        let up = self.candles.iter().filter(|b| b.is_up()).count();
        (up, self.candles.len() - up)
    }
}

/// Keep items with a non-empty title and link, first `limit`, provider order.
pub fn valid_news(raw: &[RawNewsItem], limit: usize) -> Vec<NewsItem> {
    raw.iter().filter_map(NewsItem::from_raw).take(limit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{headline, sample_series};
    use proptest::prelude::*;

    fn query() -> Query {
        Query::new(
            "AAPL",
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2023, 1, 10).unwrap(),
        )
    }

    #[test]
    fn short_series_is_shown_whole_everywhere() {
        // Five trading days between 2023-01-01 and 2023-01-10.
        let series = sample_series(5);
        let dash = Dashboard::build(query(), &series, &[], &DisplayLimits::default());
        assert_eq!(dash.table.len(), 5);
        assert_eq!(dash.candles.len(), 5);
        assert_eq!(dash.closing.len(), 5);
        assert_eq!(dash.table, series.bars());
    }

    #[test]
    fn table_is_last_ten_in_order() {
        let series = sample_series(25);
        let dash = Dashboard::build(query(), &series, &[], &DisplayLimits::default());
        assert_eq!(dash.table.len(), 10);
        assert_eq!(dash.table.as_slice(), &series.bars()[15..]);
    }

    #[test]
    fn candles_are_capped_at_ninety_most_recent() {
        let series = sample_series(250);
        let dash = Dashboard::build(query(), &series, &[], &DisplayLimits::default());
        assert_eq!(dash.candles.len(), 90);
        assert_eq!(dash.candles.first(), series.bars().get(160));
        assert_eq!(dash.candles.last(), series.bars().last());
        // The line chart is not sliced.
        assert_eq!(dash.closing.len(), 250);
    }

    #[test]
    fn news_is_filtered_then_capped() {
        let raw = vec![
            headline(Some("one"), Some("https://n/1")),
            headline(None, Some("https://n/x")),
            headline(Some("two"), Some("https://n/2")),
            headline(Some("no link"), None),
            headline(Some("three"), Some("https://n/3")),
            headline(Some(""), Some("https://n/y")),
            headline(Some("four"), Some("https://n/4")),
            headline(Some("five"), Some("https://n/5")),
            headline(Some("six"), Some("https://n/6")),
        ];
        let news = valid_news(&raw, 5);
        let titles: Vec<&str> = news.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, ["one", "two", "three", "four", "five"]);
    }

    #[test]
    fn no_valid_news_raises_notice() {
        let raw = vec![headline(Some("title only"), None)];
        let dash = Dashboard::build(query(), &sample_series(3), &raw, &DisplayLimits::default());
        assert!(dash.news.is_empty());
        assert!(matches!(
            dash.news_notice(),
            Some(DashboardError::MissingNews { .. })
        ));
    }

    #[test]
    fn custom_limits_are_respected() {
        let limits = DisplayLimits {
            table_rows: 3,
            candle_window: 7,
            news_limit: 1,
        };
        let raw = vec![
            headline(Some("a"), Some("https://n/a")),
            headline(Some("b"), Some("https://n/b")),
        ];
        let dash = Dashboard::build(query(), &sample_series(20), &raw, &limits);
        assert_eq!(dash.table.len(), 3);
        assert_eq!(dash.candles.len(), 7);
        assert_eq!(dash.news.len(), 1);
    }

    #[test]
    fn close_bounds_and_balance() {
        let dash = Dashboard::build(query(), &sample_series(10), &[], &DisplayLimits::default());
        let (lo, hi) = dash.close_bounds().unwrap();
        assert!(lo <= hi);
        let (up, down) = dash.candle_balance();
        assert_eq!(up + down, 10);
    }

    proptest! {
        #[test]
        fn candle_count_is_min_of_window_and_len(len in 1usize..400) {
            let series = sample_series(len);
            let dash = Dashboard::build(query(), &series, &[], &DisplayLimits::default());
            prop_assert_eq!(dash.candles.len(), len.min(90));
            prop_assert_eq!(dash.table.len(), len.min(10));
            prop_assert_eq!(dash.candles.last(), series.bars().last());
        }

        #[test]
        fn rendered_news_always_has_title_and_link(
            items in proptest::collection::vec(
                (proptest::option::of("[a-z]{0,3}"), proptest::option::of("[a-z]{0,3}")),
                0..20,
            )
        ) {
            let raw: Vec<RawNewsItem> = items
                .iter()
                .map(|(t, l)| headline(t.as_deref(), l.as_deref()))
                .collect();
            let news = valid_news(&raw, 5);
            prop_assert!(news.len() <= 5);
            for item in &news {
                prop_assert!(!item.title.is_empty());
                prop_assert!(!item.link.is_empty());
            }
        }
    }
}
