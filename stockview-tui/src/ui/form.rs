//! Input row: stock symbol, start date, end date.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{AppState, Field};

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(50),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    for (field, col) in [Field::Ticker, Field::Start, Field::End].into_iter().zip(cols.iter()) {
        render_field(f, *col, app, field);
    }
}

fn render_field(f: &mut Frame, area: Rect, app: &AppState, field: Field) {
    let theme = &app.theme;
    let focused = app.form.focus == field;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border(focused))
        .title(format!(" {} ", field.label()));

    let mut spans = vec![Span::styled(app.form.value(field), theme.text())];
    if focused {
        spans.push(Span::styled("_", theme.accent_bold()));
    }

    f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}
