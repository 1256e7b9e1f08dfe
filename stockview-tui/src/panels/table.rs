//! Recent stock data panel: the most recent records, every column.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table, Widget},
};

use stockview_core::query::DATE_FORMAT;
use stockview_core::PriceBar;

use crate::theme::Theme;

pub struct PriceTablePanel<'a> {
    rows: &'a [PriceBar],
    theme: &'a Theme,
}

impl<'a> PriceTablePanel<'a> {
    pub fn new(rows: &'a [PriceBar], theme: &'a Theme) -> Self {
        Self { rows, theme }
    }

    fn format_volume(volume: u64) -> String {
        let digits = volume.to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(',');
            }
            out.push(c);
        }
        out
    }

    /// Bare `0` on days without an event; four decimals otherwise.
    fn format_event(value: f64) -> String {
        if value == 0.0 {
            String::from("0")
        } else {
            format!("{:.4}", value)
        }
    }
}

impl<'a> Widget for PriceTablePanel<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(format!(" Recent Stock Data [{} rows] ", self.rows.len()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent))
            .style(Style::default().bg(self.theme.background));

        let header_cells = PriceBar::COLUMNS.iter().map(|h| {
            Cell::from(*h).style(
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            )
        });
        let header = Row::new(header_cells).height(1);

        let rows = self.rows.iter().map(|bar| {
            let close_color = self.theme.candle_color(bar.is_up());
            let cells = vec![
                Cell::from(bar.date.format(DATE_FORMAT).to_string()),
                Cell::from(format!("{:.2}", bar.open)),
                Cell::from(format!("{:.2}", bar.high)),
                Cell::from(format!("{:.2}", bar.low)),
                Cell::from(format!("{:.2}", bar.close)).style(Style::default().fg(close_color)),
                Cell::from(Self::format_volume(bar.volume)),
                Cell::from(Self::format_event(bar.dividends)),
                Cell::from(Self::format_event(bar.stock_splits)),
            ];
            Row::new(cells)
                .style(Style::default().fg(self.theme.text_primary))
                .height(1)
        });

        let widths = [
            Constraint::Length(10),
            Constraint::Length(9),
            Constraint::Length(9),
            Constraint::Length(9),
            Constraint::Length(9),
            Constraint::Length(13),
            Constraint::Length(9),
            Constraint::Length(12),
        ];

        Table::new(rows, widths)
            .header(header)
            .block(block)
            .column_spacing(1)
            .render(area, buf);
    }
}
