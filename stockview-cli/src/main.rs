//! stockview CLI: the dashboard as plain text.
//!
//! Commands:
//! - `report` - run a full pass and print every section
//! - `history` - print the most recent rows of the daily series
//! - `news` - print the latest headlines with links

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use stockview_core::present::{valid_news, CLOSING_LABEL, PRICE_AXIS};
use stockview_core::query::DATE_FORMAT;
use stockview_core::{
    pipeline, Dashboard, DashboardError, DisplayLimits, MarketDataProvider, NewsItem, PriceBar,
    Query, Severity, StockviewConfig, TickerSymbol, YahooProvider,
};

#[derive(Parser)]
#[command(
    name = "stockview",
    version,
    about = "stockview CLI - daily stock history and headlines from Yahoo Finance"
)]
struct Cli {
    /// TOML config file. Defaults to <config dir>/stockview/config.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch history and headlines and print the whole dashboard.
    Report {
        /// Stock symbol (e.g., AAPL, TSLA, GOOG). Defaults to the configured symbol.
        ticker: Option<String>,

        /// Start date (YYYY-MM-DD). Defaults to the configured start date.
        #[arg(long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD), exclusive. Defaults to today.
        #[arg(long)]
        end: Option<String>,

        /// Print the dashboard as JSON instead of text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print the most recent rows of the daily series.
    History {
        /// Stock symbol.
        ticker: String,

        /// Start date (YYYY-MM-DD).
        #[arg(long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD), exclusive.
        #[arg(long)]
        end: Option<String>,

        /// Rows to print. Defaults to the configured table size.
        #[arg(long)]
        rows: Option<usize>,
    },
    /// Print the latest headlines for a symbol.
    News {
        /// Stock symbol.
        ticker: String,

        /// Headlines to print. Defaults to the configured news limit.
        #[arg(long)]
        limit: Option<usize>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let mut config = StockviewConfig::load(cli.config.as_deref())?;
    let today = chrono::Local::now().date_naive();
    let mut out = io::stdout().lock();

    let ok = match cli.command {
        Commands::Report {
            ticker,
            start,
            end,
            json,
        } => {
            let query = resolve_query(&mut config, ticker.as_deref(), start, end, today)?;
            let provider = YahooProvider::new(config.provider.clone())?;
            run_report(&mut out, &provider, &query, &config.display, json)?
        }
        Commands::History {
            ticker,
            start,
            end,
            rows,
        } => {
            let query = resolve_query(&mut config, Some(ticker.as_str()), start, end, today)?;
            let provider = YahooProvider::new(config.provider.clone())?;
            let rows = rows.unwrap_or(config.display.table_rows);
            run_history(&mut out, &provider, &query, rows)?
        }
        Commands::News { ticker, limit } => {
            let provider = YahooProvider::new(config.provider.clone())?;
            let limit = limit.unwrap_or(config.display.news_limit);
            run_news(&mut out, &provider, &TickerSymbol::new(&ticker), limit)?
        }
    };

    out.flush()?;
    if !ok {
        std::process::exit(1);
    }
    Ok(())
}

/// Config defaults, overridden by whatever was given on the command line.
fn resolve_query(
    config: &mut StockviewConfig,
    ticker: Option<&str>,
    start: Option<String>,
    end: Option<String>,
    today: NaiveDate,
) -> Result<Query> {
    config
        .defaults
        .apply_overrides(ticker, start.as_deref(), end.as_deref())?;
    Ok(config.initial_query(today))
}

/// Print the banner of a pass that produced nothing to show. Returns whether
/// the pass still counts as a success: only error severity fails the command.
fn print_banner(out: &mut dyn Write, err: &DashboardError) -> io::Result<bool> {
    log::warn!("{}", err.banner());
    writeln!(out, "{}", err.banner())?;
    Ok(err.severity() != Severity::Error)
}

/// One full pass. `Ok(false)` when the pass ended in a fetch failure.
fn run_report(
    out: &mut dyn Write,
    provider: &dyn MarketDataProvider,
    query: &Query,
    limits: &DisplayLimits,
    json: bool,
) -> Result<bool> {
    let dashboard = match pipeline::run(provider, query, limits) {
        Ok(dashboard) => dashboard,
        Err(e) => return Ok(print_banner(out, &e)?),
    };

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&dashboard)?)?;
    } else {
        print_dashboard(out, &dashboard)?;
    }
    Ok(true)
}

fn run_history(
    out: &mut dyn Write,
    provider: &dyn MarketDataProvider,
    query: &Query,
    rows: usize,
) -> Result<bool> {
    let series = match provider.history(&query.ticker, &query.range) {
        Ok(series) => series,
        Err(e) => return Ok(print_banner(out, &DashboardError::FetchFailure(e))?),
    };
    if series.is_empty() {
        let empty = DashboardError::EmptyResult {
            ticker: query.ticker.clone(),
        };
        return Ok(print_banner(out, &empty)?);
    }

    writeln!(out, "{} {} ({} records)", query.ticker, query.range, series.len())?;
    print_table(out, series.tail(rows))?;
    Ok(true)
}

fn run_news(
    out: &mut dyn Write,
    provider: &dyn MarketDataProvider,
    ticker: &TickerSymbol,
    limit: usize,
) -> Result<bool> {
    let raw = match provider.news(ticker) {
        Ok(raw) => raw,
        Err(e) => return Ok(print_banner(out, &DashboardError::FetchFailure(e))?),
    };
    let items = valid_news(&raw, limit);
    print_news(out, ticker, &items)?;
    Ok(true)
}

fn print_dashboard(out: &mut dyn Write, dashboard: &Dashboard) -> io::Result<()> {
    writeln!(out, "Showing data for {}", dashboard.query.ticker)?;
    writeln!(out, "Period:         {}", dashboard.query.range)?;
    writeln!(out, "Records:        {}", dashboard.record_count())?;

    writeln!(out)?;
    writeln!(out, "=== Recent Stock Data ===")?;
    print_table(out, &dashboard.table)?;

    writeln!(out)?;
    writeln!(out, "=== Stock Price Trend ===")?;
    if let (Some(first), Some(last), Some((lo, hi))) = (
        dashboard.closing.first(),
        dashboard.closing.last(),
        dashboard.close_bounds(),
    ) {
        writeln!(out, "{CLOSING_LABEL}, {PRICE_AXIS}")?;
        writeln!(
            out,
            "First:          {:.2} ({})",
            first.close,
            first.date.format(DATE_FORMAT)
        )?;
        writeln!(
            out,
            "Last:           {:.2} ({})",
            last.close,
            last.date.format(DATE_FORMAT)
        )?;
        writeln!(out, "Low:            {lo:.2}")?;
        writeln!(out, "High:           {hi:.2}")?;
    }

    writeln!(out)?;
    writeln!(out, "=== Candlestick Chart ===")?;
    let (up, down) = dashboard.candle_balance();
    writeln!(
        out,
        "Bars:           {} ({} up, {} down)",
        dashboard.candles.len(),
        up,
        down
    )?;
    if let (Some(first), Some(last)) = (dashboard.candles.first(), dashboard.candles.last()) {
        writeln!(
            out,
            "Window:         {} .. {}",
            first.date.format(DATE_FORMAT),
            last.date.format(DATE_FORMAT)
        )?;
    }

    writeln!(out)?;
    writeln!(out, "=== Latest Stock News ===")?;
    print_news(out, &dashboard.query.ticker, &dashboard.news)
}

fn print_table(out: &mut dyn Write, rows: &[PriceBar]) -> io::Result<()> {
    let c = PriceBar::COLUMNS;
    writeln!(
        out,
        "{:<10} {:>10} {:>10} {:>10} {:>10} {:>14} {:>10} {:>12}",
        c[0], c[1], c[2], c[3], c[4], c[5], c[6], c[7]
    )?;
    for bar in rows {
        writeln!(
            out,
            "{:<10} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>14} {:>10} {:>12}",
            bar.date.format(DATE_FORMAT),
            bar.open,
            bar.high,
            bar.low,
            bar.close,
            bar.volume,
            bar.dividends,
            bar.stock_splits
        )?;
    }
    Ok(())
}

fn print_news(out: &mut dyn Write, ticker: &TickerSymbol, items: &[NewsItem]) -> io::Result<()> {
    if items.is_empty() {
        let notice = DashboardError::MissingNews {
            ticker: ticker.clone(),
        };
        return writeln!(out, "{}", notice.banner());
    }
    for item in items {
        match &item.publisher {
            Some(publisher) => writeln!(out, "- {} ({publisher})", item.title)?,
            None => writeln!(out, "- {}", item.title)?,
        }
        writeln!(out, "  {}", item.link)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockview_core::fixtures::{
        headline, sample_series, FailAt, FailingProvider, StaticProvider,
    };

    fn query(ticker: &str) -> Query {
        Query::new(
            ticker,
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2023, 1, 10).unwrap(),
        )
    }

    fn report_text(provider: &dyn MarketDataProvider, ticker: &str, json: bool) -> (bool, String) {
        let mut out = Vec::new();
        let ok = run_report(&mut out, provider, &query(ticker), &DisplayLimits::default(), json)
            .unwrap();
        (ok, String::from_utf8(out).unwrap())
    }

    #[test]
    fn report_prints_every_section() {
        let provider = StaticProvider::new(
            sample_series(5),
            vec![headline(Some("Apple headline"), Some("https://n/1"))],
        );
        let (ok, text) = report_text(&provider, "aapl", false);
        assert!(ok);
        assert!(text.starts_with("Showing data for AAPL"));
        assert!(text.contains("Records:        5"));
        assert!(text.contains("Stock Splits"));
        assert!(text.contains("2023-01-09"));
        assert!(text.contains("Bars:           5 ("));
        assert!(text.contains("- Apple headline"));
        assert!(text.contains("  https://n/1"));
    }

    #[test]
    fn report_without_news_prints_notice() {
        let provider = StaticProvider::new(sample_series(5), Vec::new());
        let (ok, text) = report_text(&provider, "AAPL", false);
        assert!(ok);
        assert!(text.contains("No news found for this stock."));
    }

    #[test]
    fn report_for_unknown_symbol_warns_without_failing() {
        let (ok, text) = report_text(&StaticProvider::empty(), "ZZZZINVALID", false);
        assert!(ok);
        assert_eq!(
            text.trim(),
            "No data found! Please check the stock symbol or date range."
        );
    }

    #[test]
    fn report_network_failure_prints_single_error() {
        let (ok, text) = report_text(&FailingProvider::at(FailAt::History), "AAPL", false);
        assert!(!ok);
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("Error: network unreachable"));
    }

    #[test]
    fn report_json_is_the_dashboard() {
        let provider = StaticProvider::new(sample_series(12), Vec::new());
        let (ok, text) = report_text(&provider, "AAPL", true);
        assert!(ok);
        let dashboard: Dashboard = serde_json::from_str(&text).unwrap();
        assert_eq!(dashboard.table.len(), 10);
        assert_eq!(dashboard.closing.len(), 12);
    }

    #[test]
    fn history_prints_requested_tail() {
        let provider = StaticProvider::new(sample_series(20), Vec::new());
        let mut out = Vec::new();
        let ok = run_history(&mut out, &provider, &query("AAPL"), 3).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(ok);
        assert!(text.starts_with("AAPL 2023-01-01 to 2023-01-10 (20 records)"));
        // Header plus three rows.
        assert_eq!(text.lines().count(), 5);
        assert_eq!(provider.news_calls(), 0);
    }

    #[test]
    fn history_for_unknown_symbol_warns_without_failing() {
        let mut out = Vec::new();
        let ok = run_history(&mut out, &StaticProvider::empty(), &query("ZZZZ"), 10).unwrap();
        assert!(ok);
        assert_eq!(
            String::from_utf8(out).unwrap().trim(),
            "No data found! Please check the stock symbol or date range."
        );
    }

    #[test]
    fn report_with_inverted_range_is_not_an_error() {
        let provider = StaticProvider::empty();
        let inverted = Query::new(
            "AAPL",
            NaiveDate::from_ymd_opt(2023, 2, 1).unwrap(),
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
        );
        let mut out = Vec::new();
        let ok = run_report(&mut out, &provider, &inverted, &DisplayLimits::default(), false)
            .unwrap();
        assert!(ok);
        assert!(String::from_utf8(out).unwrap().starts_with("No data found!"));
    }

    #[test]
    fn history_fetch_failure_fails_the_command() {
        let mut out = Vec::new();
        let ok = run_history(
            &mut out,
            &FailingProvider::at(FailAt::History),
            &query("AAPL"),
            10,
        )
        .unwrap();
        assert!(!ok);
    }

    #[test]
    fn news_filters_and_limits() {
        let provider = StaticProvider::new(
            sample_series(1),
            vec![
                headline(Some("one"), Some("https://n/1")),
                headline(None, Some("https://n/x")),
                headline(Some("two"), Some("https://n/2")),
                headline(Some("three"), Some("https://n/3")),
            ],
        );
        let mut out = Vec::new();
        let ok = run_news(&mut out, &provider, &TickerSymbol::new("aapl"), 2).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(ok);
        assert_eq!(text, "- one\n  https://n/1\n- two\n  https://n/2\n");
    }

    #[test]
    fn news_failure_is_reported() {
        let mut out = Vec::new();
        let ok = run_news(
            &mut out,
            &FailingProvider::at(FailAt::News),
            &TickerSymbol::new("AAPL"),
            5,
        )
        .unwrap();
        assert!(!ok);
        assert!(String::from_utf8(out).unwrap().contains("HTTP 502"));
    }

    #[test]
    fn command_line_overrides_config_defaults() {
        let mut config = StockviewConfig::default();
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let q = resolve_query(&mut config, Some("tsla"), Some("2024-01-02".into()), None, today)
            .unwrap();
        assert_eq!(q.ticker.as_str(), "TSLA");
        assert_eq!(q.range.start, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(q.range.end, today);

        let bad = resolve_query(&mut config, None, Some("01/02/2024".into()), None, today);
        assert!(bad.is_err());
    }

    #[test]
    fn cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["stockview", "history", "msft", "--rows", "3"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::History { ref ticker, rows: Some(3), .. } if ticker == "msft"
        ));

        let cli = Cli::try_parse_from(["stockview", "report", "--json"]).unwrap();
        assert!(matches!(cli.command, Commands::Report { ticker: None, json: true, .. }));
    }
}
