//! Candlestick panel: the most recent daily bars, one terminal column each.
//!
//! Renders with direct buffer writes:
//! - Body: block char, green if close >= open, pink otherwise
//! - Wicks: vertical line chars to high/low
//! - Bottom row: first and last date of the drawn window

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Widget},
};

use stockview_core::query::DATE_FORMAT;
use stockview_core::PriceBar;

use crate::theme::Theme;

/// Width reserved for Y-axis labels.
const LABEL_WIDTH: u16 = 9;

pub struct CandleChartPanel<'a> {
    bars: &'a [PriceBar],
    symbol: &'a str,
    theme: &'a Theme,
}

impl<'a> CandleChartPanel<'a> {
    pub fn new(bars: &'a [PriceBar], symbol: &'a str, theme: &'a Theme) -> Self {
        Self { bars, symbol, theme }
    }

    /// Map a price to a Y position in the plot area (0 = top)
    fn price_to_y(&self, price: f64, y_min: f64, y_max: f64, plot_height: u16) -> u16 {
        if (y_max - y_min).abs() < 1e-9 || plot_height == 0 || !price.is_finite() {
            return 0;
        }
        let frac = (price - y_min) / (y_max - y_min);
        let y = plot_height.saturating_sub(1) as f64 * (1.0 - frac);
        y.round().max(0.0).min(plot_height.saturating_sub(1) as f64) as u16
    }
}

impl<'a> Widget for CandleChartPanel<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.bars.is_empty() {
            let block = Block::default()
                .title(format!(" Candlestick Chart: {} [No Data] ", self.symbol))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(self.theme.muted))
                .style(Style::default().bg(self.theme.background));
            block.render(area, buf);
            return;
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent))
            .style(Style::default().bg(self.theme.background));
        let inner = block.inner(area);

        // Left margin for Y labels, bottom row for the date span.
        let plot_left = inner.x + LABEL_WIDTH;
        let plot_top = inner.y;
        let plot_width = inner.width.saturating_sub(LABEL_WIDTH);
        let plot_height = inner.height.saturating_sub(1);

        // A narrow terminal shows the most recent bars that fit.
        let drawn = visible_tail(self.bars, plot_width);

        let up_count = drawn.iter().filter(|b| b.is_up()).count();
        let down_count = drawn.len() - up_count;
        let title = format!(
            " Candlestick Chart: {} | {} | {} up {} down ",
            self.symbol,
            bar_count_label(drawn.len(), self.bars.len()),
            up_count,
            down_count,
        );
        block.title(title).render(area, buf);

        if drawn.is_empty() || plot_height == 0 {
            return;
        }

        let y_min = drawn
            .iter()
            .map(|b| b.low)
            .filter(|v| v.is_finite())
            .fold(f64::INFINITY, f64::min);
        let y_max = drawn
            .iter()
            .map(|b| b.high)
            .filter(|v| v.is_finite())
            .fold(f64::NEG_INFINITY, f64::max);

        let range = y_max - y_min;
        let pad = if range > 0.0 { range * 0.05 } else { 1.0 };
        let y_lower = y_min - pad;
        let y_upper = y_max + pad;

        let y_labels = [y_upper, (y_upper + y_lower) / 2.0, y_lower];
        let y_positions = [0u16, plot_height / 2, plot_height.saturating_sub(1)];
        for (label_val, y_pos) in y_labels.iter().zip(y_positions.iter()) {
            let label = format!("{:>8.2}", label_val);
            let y = plot_top + y_pos;
            if y < inner.y + inner.height {
                buf.set_string(inner.x, y, &label, Style::default().fg(self.theme.muted));
            }
        }

        for (i, bar) in drawn.iter().enumerate() {
            let x = plot_left + i as u16;
            if x >= inner.right() {
                break;
            }

            let is_up = bar.is_up();
            let style = Style::default().fg(self.theme.candle_color(is_up));

            let high_y = self.price_to_y(bar.high, y_lower, y_upper, plot_height);
            let low_y = self.price_to_y(bar.low, y_lower, y_upper, plot_height);
            let body_top_y = self.price_to_y(bar.open.max(bar.close), y_lower, y_upper, plot_height);
            let body_bot_y = self.price_to_y(bar.open.min(bar.close), y_lower, y_upper, plot_height);

            // Upper wick
            for y in high_y..body_top_y {
                buf.set_string(x, plot_top + y, "\u{2502}", style);
            }

            // Body: full block up, medium shade down
            let body_char = if is_up { "\u{2588}" } else { "\u{2593}" };
            for y in body_top_y..=body_bot_y {
                buf.set_string(x, plot_top + y, body_char, style);
            }

            // Lower wick
            for y in (body_bot_y + 1)..=low_y {
                buf.set_string(x, plot_top + y, "\u{2502}", style);
            }
        }

        let info_y = plot_top + plot_height;
        if let (Some(first), Some(last)) = (drawn.first(), drawn.last()) {
            let info = format!(
                "{} .. {}",
                first.date.format(DATE_FORMAT),
                last.date.format(DATE_FORMAT)
            );
            buf.set_stringn(
                plot_left,
                info_y,
                &info,
                plot_width as usize,
                Style::default().fg(self.theme.muted),
            );
        }
    }
}

/// The last `width` bars, one per plot column.
fn visible_tail(bars: &[PriceBar], width: u16) -> &[PriceBar] {
    let shown = bars.len().min(width as usize);
    &bars[bars.len() - shown..]
}

/// "90 bars" when everything fits, "69/90 bars" when the plot is cut short.
fn bar_count_label(drawn: usize, total: usize) -> String {
    if drawn == total {
        format!("{total} bars")
    } else {
        format!("{drawn}/{total} bars")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use stockview_core::fixtures::sample_series;

    fn bar(day: u32, open: f64, high: f64, low: f64, close: f64) -> PriceBar {
        PriceBar {
            date: NaiveDate::from_ymd_opt(2023, 1, day).unwrap(),
            open,
            high,
            low,
            close,
            volume: 1_000,
            dividends: 0.0,
            stock_splits: 0.0,
        }
    }

    fn make_test_bars() -> Vec<PriceBar> {
        vec![
            bar(3, 100.0, 102.0, 99.0, 101.0),  // up
            bar(4, 101.0, 103.0, 100.0, 100.5), // down
            bar(5, 100.5, 104.0, 99.5, 103.0),  // up
            bar(6, 103.0, 105.0, 101.0, 102.0), // down
            bar(9, 102.0, 106.0, 101.5, 105.5), // up
        ]
    }

    fn content(buf: &Buffer, area: Rect) -> String {
        let mut content = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                content.push_str(buf.cell((x, y)).unwrap().symbol());
            }
        }
        content
    }

    #[test]
    fn test_candle_chart_renders_without_panic() {
        let theme = Theme::default();
        let bars = make_test_bars();
        let panel = CandleChartPanel::new(&bars, "AAPL", &theme);

        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        panel.render(area, &mut buf);
    }

    #[test]
    fn test_candle_chart_title_counts() {
        let theme = Theme::default();
        let bars = make_test_bars();
        let panel = CandleChartPanel::new(&bars, "AAPL", &theme);

        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        panel.render(area, &mut buf);

        let text = content(&buf, area);
        assert!(text.contains("5 bars"));
        assert!(text.contains("3 up 2 down"));
        assert!(text.contains("2023-01-03 .. 2023-01-09"));
    }

    #[test]
    fn test_candle_chart_empty_bars() {
        let theme = Theme::default();
        let bars: Vec<PriceBar> = vec![];
        let panel = CandleChartPanel::new(&bars, "AAPL", &theme);

        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        panel.render(area, &mut buf);

        assert!(content(&buf, area).contains("No Data"));
    }

    #[test]
    fn test_up_candle_uses_positive_color() {
        let theme = Theme::default();
        let bars = vec![bar(3, 100.0, 102.0, 99.0, 101.0)];
        let panel = CandleChartPanel::new(&bars, "AAPL", &theme);

        let area = Rect::new(0, 0, 40, 20);
        let mut buf = Buffer::empty(area);
        panel.render(area, &mut buf);

        let body = (0..area.height)
            .map(|y| buf.cell((1 + LABEL_WIDTH, y)).unwrap())
            .find(|c| c.symbol() == "\u{2588}")
            .expect("up candle body drawn");
        assert_eq!(body.fg, theme.positive);
    }

    #[test]
    fn test_narrow_area_keeps_latest_bars() {
        let theme = Theme::default();
        let series = sample_series(90);
        let panel = CandleChartPanel::new(series.bars(), "AAPL", &theme);

        // 2 border columns + label margin + 24 plot columns.
        let area = Rect::new(0, 0, 2 + LABEL_WIDTH + 24, 16);
        let mut buf = Buffer::empty(area);
        panel.render(area, &mut buf);

        let last = series.last_date().unwrap().format(DATE_FORMAT).to_string();
        let first = series.bars()[90 - 24].date.format(DATE_FORMAT).to_string();
        assert!(content(&buf, area).contains(&format!("{first} .. {last}")));
    }

    #[test]
    fn test_title_counts_only_drawn_bars() {
        let theme = Theme::default();
        let series = sample_series(90);
        let panel = CandleChartPanel::new(series.bars(), "AAPL", &theme);

        let area = Rect::new(0, 0, 2 + LABEL_WIDTH + 60, 16);
        let mut buf = Buffer::empty(area);
        panel.render(area, &mut buf);

        let drawn = &series.bars()[30..];
        let up = drawn.iter().filter(|b| b.is_up()).count();
        let text = content(&buf, area);
        assert!(text.contains(&format!(
            "| 60/90 bars | {} up {} down",
            up,
            drawn.len() - up
        )));
    }

    #[test]
    fn test_bar_count_label() {
        assert_eq!(bar_count_label(5, 5), "5 bars");
        assert_eq!(bar_count_label(69, 90), "69/90 bars");
    }

    #[test]
    fn test_price_to_y_bounds() {
        let theme = Theme::default();
        let bars = make_test_bars();
        let panel = CandleChartPanel::new(&bars, "AAPL", &theme);
        assert_eq!(panel.price_to_y(110.0, 100.0, 110.0, 11), 0);
        assert_eq!(panel.price_to_y(100.0, 100.0, 110.0, 11), 10);
        assert_eq!(panel.price_to_y(f64::NAN, 100.0, 110.0, 11), 0);
    }
}
