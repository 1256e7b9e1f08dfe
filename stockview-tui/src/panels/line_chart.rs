//! Stock price trend: closing price against date over the whole range.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Widget},
};

use stockview_core::present::{ClosePoint, CLOSING_LABEL, PRICE_AXIS};
use stockview_core::query::DATE_FORMAT;

use crate::theme::Theme;

pub struct ClosingChartPanel<'a> {
    points: &'a [ClosePoint],
    symbol: &'a str,
    theme: &'a Theme,
}

impl<'a> ClosingChartPanel<'a> {
    pub fn new(points: &'a [ClosePoint], symbol: &'a str, theme: &'a Theme) -> Self {
        Self {
            points,
            symbol,
            theme,
        }
    }

    /// X is calendar days since the first point, so weekend gaps keep their width.
    fn data(&self) -> Vec<(f64, f64)> {
        let Some(first) = self.points.first() else {
            return Vec::new();
        };
        self.points
            .iter()
            .map(|p| ((p.date - first.date).num_days() as f64, p.close))
            .collect()
    }

    fn date_labels(&self) -> Vec<Span<'static>> {
        let (Some(first), Some(last)) = (self.points.first(), self.points.last()) else {
            return Vec::new();
        };
        let style = Style::default().fg(self.theme.muted);
        let mid = first.date + (last.date - first.date) / 2;
        vec![
            Span::styled(first.date.format(DATE_FORMAT).to_string(), style),
            Span::styled(mid.format(DATE_FORMAT).to_string(), style),
            Span::styled(last.date.format(DATE_FORMAT).to_string(), style),
        ]
    }
}

impl<'a> Widget for ClosingChartPanel<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = format!(" Stock Price Trend: {} ", self.symbol);
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent))
            .style(Style::default().bg(self.theme.background));

        let data = self.data();
        if data.is_empty() {
            block.render(area, buf);
            return;
        }

        let x_max = data.last().map(|&(x, _)| x).unwrap_or(0.0);
        let y_min = data.iter().map(|&(_, y)| y).fold(f64::INFINITY, f64::min);
        let y_max = data.iter().map(|&(_, y)| y).fold(f64::NEG_INFINITY, f64::max);

        let y_range = y_max - y_min;
        let y_pad = if y_range > 0.0 { y_range * 0.05 } else { 1.0 };
        let y_lower = y_min - y_pad;
        let y_upper = y_max + y_pad;

        let dataset = Dataset::default()
            .name(CLOSING_LABEL)
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(self.theme.accent))
            .data(&data);

        let muted = Style::default().fg(self.theme.muted);
        let y_labels = vec![
            Span::styled(format!("{:.2}", y_lower), muted),
            Span::styled(format!("{:.2}", (y_lower + y_upper) / 2.0), muted),
            Span::styled(format!("{:.2}", y_upper), muted),
        ];

        Chart::new(vec![dataset])
            .block(block)
            .x_axis(
                Axis::default()
                    .title(Span::styled("Date", Style::default().fg(self.theme.text_secondary)))
                    .style(muted)
                    .bounds([0.0, x_max.max(1.0)])
                    .labels(self.date_labels()),
            )
            .y_axis(
                Axis::default()
                    .title(Span::styled(
                        PRICE_AXIS,
                        Style::default().fg(self.theme.text_secondary),
                    ))
                    .style(muted)
                    .bounds([y_lower, y_upper])
                    .labels(y_labels),
            )
            .render(area, buf);
    }
}
