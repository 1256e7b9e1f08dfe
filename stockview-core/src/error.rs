//! Outcome tags for one dashboard pass.

use thiserror::Error;

use crate::provider::ProviderError;
use crate::query::TickerSymbol;

/// How loudly a banner should be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warning => "WARN",
            Severity::Error => "ERROR",
        }
    }
}

/// Everything that can stop or degrade a pass.
///
/// `EmptyResult` and `MissingNews` are recovered locally; `FetchFailure`
/// ends the interaction.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("No data found! Please check the stock symbol or date range.")]
    EmptyResult { ticker: TickerSymbol },

    #[error("No news found for this stock.")]
    MissingNews { ticker: TickerSymbol },

    #[error("{0}")]
    FetchFailure(#[from] ProviderError),

    #[error("{0}")]
    InvalidInput(String),
}

impl DashboardError {
    pub fn severity(&self) -> Severity {
        match self {
            DashboardError::MissingNews { .. } => Severity::Info,
            DashboardError::EmptyResult { .. } => Severity::Warning,
            DashboardError::FetchFailure(_) | DashboardError::InvalidInput(_) => Severity::Error,
        }
    }

    /// Text for a one-line banner, prefixed the way each severity is shown.
    pub fn banner(&self) -> String {
        match self.severity() {
            Severity::Error => format!("Error: {self}"),
            _ => self.to_string(),
        }
    }
}
