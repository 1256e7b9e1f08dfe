//! Latest stock news: headline titles with their links.
//!
//! Links are printed as plain URLs; most terminals make them clickable.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use stockview_core::NewsItem;

use crate::theme::Theme;

/// Shown in place of the list when no headline survived filtering.
pub const NO_NEWS: &str = "No news found for this stock.";

pub struct NewsPanel<'a> {
    items: &'a [NewsItem],
    theme: &'a Theme,
}

impl<'a> NewsPanel<'a> {
    pub fn new(items: &'a [NewsItem], theme: &'a Theme) -> Self {
        Self { items, theme }
    }

    fn lines(&self) -> Vec<Line<'a>> {
        if self.items.is_empty() {
            return vec![Line::from(Span::styled(
                NO_NEWS,
                Style::default().fg(self.theme.warning),
            ))];
        }

        let mut lines = Vec::with_capacity(self.items.len() * 3);
        for item in self.items {
            let mut title = vec![
                Span::styled("\u{25b8} ", Style::default().fg(self.theme.accent)),
                Span::styled(
                    item.title.as_str(),
                    Style::default()
                        .fg(self.theme.neutral)
                        .add_modifier(Modifier::BOLD),
                ),
            ];
            if let Some(publisher) = &item.publisher {
                title.push(Span::styled(
                    format!(" ({publisher})"),
                    Style::default().fg(self.theme.text_secondary),
                ));
            }
            lines.push(Line::from(title));
            lines.push(Line::from(Span::styled(
                format!("  {}", item.link),
                Style::default()
                    .fg(self.theme.muted)
                    .add_modifier(Modifier::UNDERLINED),
            )));
            lines.push(Line::from(""));
        }
        lines
    }
}

impl<'a> Widget for NewsPanel<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(format!(" Latest Stock News [{}] ", self.items.len()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent))
            .style(Style::default().bg(self.theme.background));

        Paragraph::new(self.lines())
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
