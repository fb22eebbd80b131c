use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Widget};
use repdealer_core::Preview;

use crate::card::truncate;
use crate::icon;
use crate::theme::Theme;

/// Side panel for the highlighted card; blank hint when nothing is selected
pub struct PreviewWidget<'a> {
    pub preview: Option<&'a Preview>,
}

impl<'a> PreviewWidget<'a> {
    pub fn new(preview: Option<&'a Preview>) -> Self {
        Self { preview }
    }
}

impl<'a> Widget for PreviewWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Theme::CARD_BORDER))
            .title(Span::styled(" Selected ", Style::default().fg(Theme::GOLD)));
        let inner = block.inner(area);
        block.render(area, buf);

        let Some(preview) = self.preview else {
            Paragraph::new(Line::from(Span::styled(
                "Pick a card",
                Style::default().fg(Theme::DIM_TEXT),
            )))
            .render(inner, buf);
            return;
        };

        let width = inner.width as usize;
        let lines = vec![
            Line::from(Span::styled(
                icon::glyph(&preview.icon),
                Style::default()
                    .fg(Theme::ICON_COLOR)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                truncate(&preview.label, width),
                Style::default()
                    .fg(Theme::BRIGHT_TEXT)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![
                Span::styled("Rep ", Style::default().fg(Theme::MUTED_TEXT)),
                Span::styled(
                    format!("+{}", preview.reputation),
                    Style::default()
                        .fg(Theme::REP_COLOR)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
        ];
        Paragraph::new(lines).render(inner, buf);
    }
}
