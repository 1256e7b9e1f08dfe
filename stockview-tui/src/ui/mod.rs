//! Top-level UI layout: title, input form, banner, dashboard grid, key hints.

pub mod form;
pub mod status_bar;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use stockview_core::{Dashboard, PipelineState};

use crate::app::AppState;
use crate::panels::{CandleChartPanel, ClosingChartPanel, NewsPanel, PriceTablePanel};

pub const TITLE: &str = "Stock Market Analyzer";

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(6),
            Constraint::Length(1),
        ])
        .split(f.area());

    let title = Paragraph::new(Line::from(Span::styled(TITLE, app.theme.accent_bold())))
        .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    form::render(f, chunks[1], app);
    status_bar::render_banner(f, chunks[2], app);

    match &app.dashboard {
        Some(dashboard) => draw_dashboard(f, chunks[3], app, dashboard),
        None => draw_placeholder(f, chunks[3], app),
    }

    status_bar::render_hints(f, chunks[4], app);
}

/// 2x2 grid: table | closing line, candles | news.
fn draw_dashboard(f: &mut Frame, area: Rect, app: &AppState, dashboard: &Dashboard) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    let top = halves(rows[0]);
    let bottom = halves(rows[1]);

    let symbol = dashboard.query.ticker.as_str();
    let theme = &app.theme;

    f.render_widget(PriceTablePanel::new(&dashboard.table, theme), top[0]);
    f.render_widget(ClosingChartPanel::new(&dashboard.closing, symbol, theme), top[1]);
    f.render_widget(CandleChartPanel::new(&dashboard.candles, symbol, theme), bottom[0]);
    f.render_widget(NewsPanel::new(&dashboard.news, theme), bottom[1]);
}

fn halves(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area)
}

/// Nothing to show: either before the first fetch, while fetching, or after
/// a pass whose banner already says why.
fn draw_placeholder(f: &mut Frame, area: Rect, app: &AppState) {
    let text = match app.state {
        PipelineState::Idle => "Enter a stock symbol and date range, then press Enter.",
        PipelineState::Fetching | PipelineState::Rendering => "Fetching market data...",
        PipelineState::Empty | PipelineState::Done | PipelineState::Failed => "",
    };

    let lines = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(text, app.theme.muted())),
    ];
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}
