//! Yahoo Finance data provider.
//!
//! History comes from the v8 chart API, headlines from the v1 search API.
//! One request per call: no retry, no backoff, no caching. A slow request
//! blocks the caller until the client timeout fires.
//!
//! Yahoo Finance has no official API and is subject to unannounced format
//! changes; parse failures surface as `ProviderError::ResponseFormat`.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, NaiveTime};
use serde::Deserialize;

use crate::config::ProviderConfig;
use crate::domain::{PriceBar, PriceSeries, RawNewsItem};
use crate::provider::{MarketDataProvider, ProviderError};
use crate::query::{DateRange, TickerSymbol};

/// Yahoo Finance v8 chart API response.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    meta: Option<ChartMeta>,
    timestamp: Option<Vec<i64>>,
    events: Option<ChartEvents>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct ChartMeta {
    /// Exchange offset from UTC in seconds.
    gmtoffset: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
struct ChartEvents {
    #[serde(default)]
    dividends: HashMap<String, DividendEvent>,
    #[serde(default)]
    splits: HashMap<String, SplitEvent>,
}

#[derive(Debug, Deserialize)]
struct DividendEvent {
    amount: f64,
    date: i64,
}

#[derive(Debug, Deserialize)]
struct SplitEvent {
    date: i64,
    numerator: f64,
    denominator: f64,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteData>,
    adjclose: Option<Vec<AdjCloseData>>,
}

#[derive(Debug, Default, Deserialize)]
struct QuoteData {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<u64>>,
}

#[derive(Debug, Deserialize)]
struct AdjCloseData {
    #[serde(default)]
    adjclose: Vec<Option<f64>>,
}

/// Yahoo Finance v1 search API response; only the news block is used.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    news: Vec<SearchNews>,
}

#[derive(Debug, Deserialize)]
struct SearchNews {
    title: Option<String>,
    link: Option<String>,
    publisher: Option<String>,
    #[serde(rename = "providerPublishTime")]
    provider_publish_time: Option<i64>,
}

/// Yahoo Finance data provider.
pub struct YahooProvider {
    client: reqwest::blocking::Client,
    config: ProviderConfig,
}

impl YahooProvider {
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ProviderError::Client(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Query parameters for the chart endpoint. `period2` is midnight UTC of
    /// the end date, so the end date itself is excluded.
    fn chart_params(range: &DateRange) -> [(&'static str, String); 5] {
        let start_ts = range.start.and_time(NaiveTime::MIN).and_utc().timestamp();
        let end_ts = range.end.and_time(NaiveTime::MIN).and_utc().timestamp();
        [
            ("period1", start_ts.to_string()),
            ("period2", end_ts.to_string()),
            ("interval", "1d".to_string()),
            ("events", "div,splits".to_string()),
            ("includeAdjustedClose", "true".to_string()),
        ]
    }

    /// Parse the chart API response into price bars.
    ///
    /// "Not Found" and a result without timestamps are empty series, not
    /// errors.
    fn parse_chart(
        symbol: &str,
        resp: ChartResponse,
        auto_adjust: bool,
    ) -> Result<Vec<PriceBar>, ProviderError> {
        let result = match resp.chart.result {
            Some(result) => result,
            None => {
                return match resp.chart.error {
                    Some(err) if err.code == "Not Found" => {
                        log::warn!("[{symbol}] {}", err.description);
                        Ok(Vec::new())
                    }
                    Some(err) => Err(ProviderError::Provider {
                        code: err.code,
                        description: err.description,
                    }),
                    None => Err(ProviderError::ResponseFormat(
                        "empty result with no error".into(),
                    )),
                };
            }
        };

        let data = result
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::ResponseFormat("result array is empty".into()))?;

        let Some(timestamps) = data.timestamp else {
            log::debug!("[{symbol}] no timestamps in window");
            return Ok(Vec::new());
        };

        let offset = data.meta.and_then(|m| m.gmtoffset).unwrap_or(0);
        let to_date = |ts: i64| -> Result<NaiveDate, ProviderError> {
            ts.checked_add(offset)
                .and_then(|local| DateTime::from_timestamp(local, 0))
                .map(|dt| dt.naive_utc().date())
                .ok_or_else(|| ProviderError::ResponseFormat(format!("invalid timestamp: {ts}")))
        };

        let events = data.events.unwrap_or_default();
        let mut dividends: HashMap<NaiveDate, f64> = HashMap::new();
        for ev in events.dividends.values() {
            *dividends.entry(to_date(ev.date)?).or_default() += ev.amount;
        }
        let mut splits: HashMap<NaiveDate, f64> = HashMap::new();
        for ev in events.splits.values() {
            if ev.denominator != 0.0 {
                splits.insert(to_date(ev.date)?, ev.numerator / ev.denominator);
            }
        }

        let quote = data.indicators.quote.into_iter().next().unwrap_or_default();
        let adj_closes = data
            .indicators
            .adjclose
            .and_then(|v| v.into_iter().next())
            .map(|a| a.adjclose);

        let mut bars = Vec::with_capacity(timestamps.len());

        for (i, &ts) in timestamps.iter().enumerate() {
            let date = to_date(ts)?;

            let open = quote.open.get(i).copied().flatten();
            let high = quote.high.get(i).copied().flatten();
            let low = quote.low.get(i).copied().flatten();
            let close = quote.close.get(i).copied().flatten();
            let volume = quote.volume.get(i).copied().flatten();
            let adj_close = adj_closes
                .as_ref()
                .and_then(|v| v.get(i).copied().flatten());

            // Skip rows where all OHLCV are None (holidays, intraday placeholders)
            if open.is_none()
                && high.is_none()
                && low.is_none()
                && close.is_none()
                && volume.is_none()
            {
                log::debug!("[{symbol}] skipping empty row at {date}");
                continue;
            }

            let mut bar = PriceBar {
                date,
                open: open.unwrap_or(f64::NAN),
                high: high.unwrap_or(f64::NAN),
                low: low.unwrap_or(f64::NAN),
                close: close.unwrap_or(f64::NAN),
                volume: volume.unwrap_or(0),
                dividends: dividends.get(&date).copied().unwrap_or(0.0),
                stock_splits: splits.get(&date).copied().unwrap_or(0.0),
            };

            if auto_adjust {
                if let Some(adj) = adj_close {
                    adjust(&mut bar, adj);
                }
            }

            bars.push(bar);
        }

        Ok(bars)
    }

    fn parse_search(resp: SearchResponse) -> Vec<RawNewsItem> {
        resp.news
            .into_iter()
            .map(|n| RawNewsItem {
                title: n.title,
                link: n.link,
                publisher: n.publisher,
                published_at: n.provider_publish_time,
            })
            .collect()
    }

    fn send(
        &self,
        symbol: &str,
        request: reqwest::blocking::RequestBuilder,
    ) -> Result<reqwest::blocking::Response, ProviderError> {
        let resp = request.send().map_err(|e| {
            if e.is_timeout() {
                ProviderError::Network(format!("request for {symbol} timed out: {e}"))
            } else {
                ProviderError::Network(e.to_string())
            }
        })?;
        log::info!("[{symbol}] {} {}", resp.status(), resp.url().path());
        Ok(resp)
    }
}

/// Scale OHLC by adjusted close / close and replace close with the adjusted
/// close. Leaves the bar alone when the ratio is not finite.
fn adjust(bar: &mut PriceBar, adj_close: f64) {
    let ratio = adj_close / bar.close;
    if !ratio.is_finite() {
        return;
    }
    bar.open *= ratio;
    bar.high *= ratio;
    bar.low *= ratio;
    bar.close = adj_close;
}

impl MarketDataProvider for YahooProvider {
    fn name(&self) -> &str {
        "yahoo_finance"
    }

    fn history(&self, symbol: &TickerSymbol, range: &DateRange) -> Result<PriceSeries, ProviderError> {
        if symbol.is_empty() || range.is_degenerate() {
            log::debug!("[{symbol}] nothing to fetch for {range}");
            return Ok(PriceSeries::empty());
        }

        let url = format!("{}/{}", self.config.chart_url, symbol.as_str());
        log::debug!("[{symbol}] GET {url} ({range})");
        let request = self.client.get(&url).query(&Self::chart_params(range));
        let resp = self.send(symbol.as_str(), request)?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            log::warn!("[{symbol}] symbol not found, treating as empty");
            return Ok(PriceSeries::empty());
        }
        if !status.is_success() {
            return Err(ProviderError::Http {
                status: status.as_u16(),
                symbol: symbol.to_string(),
            });
        }

        let chart: ChartResponse = resp.json().map_err(|e| {
            ProviderError::ResponseFormat(format!("failed to parse chart for {symbol}: {e}"))
        })?;
        let bars = Self::parse_chart(symbol.as_str(), chart, self.config.auto_adjust)?;
        log::info!("[{symbol}] {} rows", bars.len());
        Ok(PriceSeries::new(bars))
    }

    fn news(&self, symbol: &TickerSymbol) -> Result<Vec<RawNewsItem>, ProviderError> {
        if symbol.is_empty() {
            return Ok(Vec::new());
        }

        let params = [
            ("q", symbol.to_string()),
            ("quotesCount", "0".to_string()),
            ("newsCount", self.config.news_count.to_string()),
        ];
        let request = self.client.get(&self.config.search_url).query(&params);
        let resp = self.send(symbol.as_str(), request)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ProviderError::Http {
                status: status.as_u16(),
                symbol: symbol.to_string(),
            });
        }

        let search: SearchResponse = resp.json().map_err(|e| {
            ProviderError::ResponseFormat(format!("failed to parse news for {symbol}: {e}"))
        })?;
        Ok(Self::parse_search(search))
    }
}
