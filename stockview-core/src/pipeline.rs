//! One interaction: fetch, empty check, build the dashboard.
//!
//! `Idle → Fetching → {Empty | Rendering} → Done`, any step may end in
//! `Failed`. Nothing is retained between runs; callers start each
//! interaction from `Idle`.

use crate::domain::{PriceSeries, RawNewsItem};
use crate::error::DashboardError;
use crate::present::{Dashboard, DisplayLimits};
use crate::provider::{MarketDataProvider, ProviderError};
use crate::query::Query;

/// Where an interaction is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Fetching,
    Empty,
    Rendering,
    Done,
    Failed,
}

impl PipelineState {
    pub fn label(self) -> &'static str {
        match self {
            PipelineState::Idle => "idle",
            PipelineState::Fetching => "fetching",
            PipelineState::Empty => "empty",
            PipelineState::Rendering => "rendering",
            PipelineState::Done => "done",
            PipelineState::Failed => "failed",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, PipelineState::Done | PipelineState::Failed)
    }

    /// Legal transitions. `Empty` ends in `Done` (the warning is the output).
    pub fn can_advance_to(self, next: PipelineState) -> bool {
        use PipelineState::*;
        match (self, next) {
            (Done | Failed, Idle) => true,
            (Done | Failed, _) => false,
            (_, Failed) => true,
            (Idle, Fetching) => true,
            (Fetching, Empty | Rendering) => true,
            (Empty | Rendering, Done) => true,
            _ => false,
        }
    }
}

/// Raw provider output for one query.
#[derive(Debug, Clone)]
pub struct Fetched {
    pub series: PriceSeries,
    pub news: Vec<RawNewsItem>,
}

/// Fetch history, then headlines. Headlines ignore the date range and are
/// not requested when the history is empty. Errors propagate untouched.
pub fn fetch(provider: &dyn MarketDataProvider, query: &Query) -> Result<Fetched, ProviderError> {
    let series = provider.history(&query.ticker, &query.range)?;
    let news = if series.is_empty() {
        Vec::new()
    } else {
        provider.news(&query.ticker)?
    };
    Ok(Fetched { series, news })
}

/// Run one interaction. The only failure boundary: any provider error
/// becomes `FetchFailure`; an empty series becomes `EmptyResult`.
pub fn run(
    provider: &dyn MarketDataProvider,
    query: &Query,
    limits: &DisplayLimits,
) -> Result<Dashboard, DashboardError> {
    run_observed(provider, query, limits, &mut |_| {})
}

/// `run`, reporting every state change to `observe` (starting with
/// `Fetching`, ending with `Done` or `Failed`).
pub fn run_observed(
    provider: &dyn MarketDataProvider,
    query: &Query,
    limits: &DisplayLimits,
    observe: &mut dyn FnMut(PipelineState),
) -> Result<Dashboard, DashboardError> {
    let mut state = PipelineState::Idle;
    let mut advance = |next: PipelineState| {
        debug_assert!(state.can_advance_to(next), "{state:?} -> {next:?}");
        log::info!("[{}] {} -> {}", query.ticker, state.label(), next.label());
        state = next;
        observe(next);
    };

    advance(PipelineState::Fetching);
    let fetched = match fetch(provider, query) {
        Ok(fetched) => fetched,
        Err(e) => {
            log::warn!("[{}] fetch from {} failed: {e}", query.ticker, provider.name());
            advance(PipelineState::Failed);
            return Err(DashboardError::FetchFailure(e));
        }
    };

    if fetched.series.is_empty() {
        advance(PipelineState::Empty);
        advance(PipelineState::Done);
        return Err(DashboardError::EmptyResult {
            ticker: query.ticker.clone(),
        });
    }

    advance(PipelineState::Rendering);
    let dashboard = Dashboard::build(query.clone(), &fetched.series, &fetched.news, limits);
    advance(PipelineState::Done);
    Ok(dashboard)
}
