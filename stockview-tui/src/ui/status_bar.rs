//! Banner row (outcome of the last interaction) and bottom key hints.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::AppState;

pub fn render_banner(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(banner) = &app.banner else {
        return;
    };
    let style = Style::default()
        .fg(app.theme.banner_color(banner.kind))
        .add_modifier(Modifier::BOLD);
    let line = Line::from(Span::styled(format!(" {}", banner.text), style));
    f.render_widget(Paragraph::new(line), area);
}

pub fn render_hints(f: &mut Frame, area: Rect, app: &AppState) {
    let theme = &app.theme;
    let mut spans: Vec<Span> = Vec::new();

    spans.push(Span::styled(" Tab/\u{2191}\u{2193}: ", theme.muted()));
    spans.push(Span::styled("Field", theme.text()));
    spans.push(Span::styled(" \u{2502} Enter: ", theme.muted()));
    spans.push(Span::styled("Fetch", theme.text()));
    spans.push(Span::styled(" \u{2502} Esc: ", theme.muted()));
    spans.push(Span::styled("Quit", theme.text()));

    // Pipeline state
    spans.push(Span::raw(" | "));
    spans.push(Span::styled(app.state.label(), theme.accent()));

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
