//! Application state: single-owner, main-thread only.
//!
//! The form holds raw text; each Enter builds a fresh `Query` from it and
//! runs the pipeline to completion. Nothing from a previous interaction
//! survives a new one except the form text.

use chrono::NaiveDate;

use stockview_core::pipeline::{self, PipelineState};
use stockview_core::query::DATE_FORMAT;
use stockview_core::{
    Dashboard, DashboardError, DisplayLimits, MarketDataProvider, Query, Severity,
    StockviewConfig,
};

use crate::theme::Theme;

/// Which form field has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Ticker,
    Start,
    End,
}

impl Field {
    pub fn index(self) -> usize {
        match self {
            Field::Ticker => 0,
            Field::Start => 1,
            Field::End => 2,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        match i {
            0 => Some(Field::Ticker),
            1 => Some(Field::Start),
            2 => Some(Field::End),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Ticker => "Stock Symbol (e.g., AAPL, TSLA, GOOG)",
            Field::Start => "Start Date",
            Field::End => "End Date",
        }
    }

    pub fn next(self) -> Field {
        Field::from_index((self.index() + 1) % 3).unwrap_or(Field::Ticker)
    }

    pub fn prev(self) -> Field {
        Field::from_index((self.index() + 2) % 3).unwrap_or(Field::Ticker)
    }
}

/// The three input controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputForm {
    pub ticker: String,
    pub start: String,
    pub end: String,
    pub focus: Field,
}

impl InputForm {
    pub fn from_query(query: &Query) -> Self {
        Self {
            ticker: query.ticker.to_string(),
            start: query.range.start.format(DATE_FORMAT).to_string(),
            end: query.range.end.format(DATE_FORMAT).to_string(),
            focus: Field::Ticker,
        }
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Ticker => &self.ticker,
            Field::Start => &self.start,
            Field::End => &self.end,
        }
    }

    pub fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            Field::Ticker => &mut self.ticker,
            Field::Start => &mut self.start,
            Field::End => &mut self.end,
        }
    }

    pub fn to_query(&self) -> Result<Query, DashboardError> {
        Query::from_inputs(&self.ticker, &self.start, &self.end)
    }
}

/// Banner kinds, one more than `Severity`: a successful pass gets a green
/// "Showing data" line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Info,
    Warning,
    Error,
}

impl From<Severity> for BannerKind {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Info => BannerKind::Info,
            Severity::Warning => BannerKind::Warning,
            Severity::Error => BannerKind::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub text: String,
}

/// Top-level application state.
pub struct AppState {
    pub running: bool,
    pub form: InputForm,
    pub limits: DisplayLimits,
    pub theme: Theme,

    /// Set by Enter; the main loop draws a "fetching" frame, then runs it.
    pub submit_requested: bool,

    // Per-interaction output, replaced wholesale on every submit.
    pub state: PipelineState,
    pub banner: Option<Banner>,
    pub dashboard: Option<Dashboard>,
}

impl AppState {
    pub fn new(config: &StockviewConfig, today: NaiveDate) -> Self {
        Self {
            running: true,
            form: InputForm::from_query(&config.initial_query(today)),
            limits: config.display,
            theme: Theme::default(),
            submit_requested: false,
            state: PipelineState::Idle,
            banner: None,
            dashboard: None,
        }
    }

    /// Clear the previous interaction and show that a fetch is under way.
    pub fn begin_fetch(&mut self) {
        self.dashboard = None;
        self.state = PipelineState::Fetching;
        let ticker = self.form.ticker.trim().to_uppercase();
        self.banner = Some(Banner {
            kind: BannerKind::Info,
            text: format!("Fetching {ticker}..."),
        });
    }

    /// Run one interaction to completion. Blocks on the provider.
    ///
    /// Every failure ends here as a banner; nothing propagates.
    pub fn submit(&mut self, provider: &dyn MarketDataProvider) {
        self.dashboard = None;
        self.banner = None;

        let query = match self.form.to_query() {
            Ok(query) => query,
            Err(e) => {
                self.state = PipelineState::Failed;
                self.report(&e);
                return;
            }
        };

        let mut last = PipelineState::Idle;
        let result = pipeline::run_observed(provider, &query, &self.limits, &mut |s| last = s);
        self.state = last;

        match result {
            Ok(dashboard) => {
                if let Some(notice) = dashboard.news_notice() {
                    log::info!("[{}] {}", dashboard.query.ticker, notice);
                }
                self.banner = Some(Banner {
                    kind: BannerKind::Success,
                    text: format!("Showing data for {}", dashboard.query.ticker),
                });
                self.dashboard = Some(dashboard);
            }
            Err(e) => self.report(&e),
        }
    }

    fn report(&mut self, err: &DashboardError) {
        log::warn!("{}", err.banner());
        self.banner = Some(Banner {
            kind: err.severity().into(),
            text: err.banner(),
        });
    }
}
