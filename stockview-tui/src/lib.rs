//! stockview TUI - terminal dashboard for one stock at a time
//!
//! Provides:
//! - Input form for symbol and date range
//! - Recent stock data table
//! - Closing-price trend line
//! - Candlestick chart of the most recent window
//! - Latest headlines with links

pub mod app;
pub mod input;
pub mod panels;
pub mod theme;
pub mod ui;

pub use app::AppState;
pub use input::handle_key;
pub use theme::Theme;
