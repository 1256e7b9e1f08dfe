//! Dashboard panels, one widget per view
//!
//! - PriceTable: most recent records, every column
//! - ClosingChart: closing price over the whole range
//! - CandleChart: OHLC candles for the most recent window
//! - News: headline titles and links

pub mod candle_chart;
pub mod line_chart;
pub mod news;
pub mod table;

pub use candle_chart::CandleChartPanel;
pub use line_chart::ClosingChartPanel;
pub use news::NewsPanel;
pub use table::PriceTablePanel;
