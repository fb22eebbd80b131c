use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Widget;
use repdealer_core::PlayerStats;

use crate::theme::Theme;

/// Title row: dealer name, card count badge, player totals
pub struct HeaderWidget {
    pub card_count: usize,
    pub stats: PlayerStats,
}

impl HeaderWidget {
    pub fn new(card_count: usize, stats: PlayerStats) -> Self {
        Self { card_count, stats }
    }
}

impl Widget for HeaderWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 {
            return;
        }

        let chunks = Layout::horizontal([
            Constraint::Ratio(1, 2),
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
        ])
        .split(area);

        let title = Line::from(vec![
            Span::styled(
                " REPUTATION DEALER ",
                Style::default()
                    .fg(Theme::GOLD)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("[{}]", self.card_count),
                Style::default().fg(Theme::BRIGHT_TEXT).bg(Theme::PANEL_BG),
            ),
        ]);
        buf.set_line(chunks[0].x, chunks[0].y, &title, chunks[0].width);

        let available = Line::from(vec![
            Span::styled("Available: ", Style::default().fg(Theme::MUTED_TEXT)),
            Span::styled(
                format!("{}", self.stats.available),
                Style::default()
                    .fg(Theme::BRIGHT_TEXT)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        buf.set_line(chunks[1].x, chunks[1].y, &available, chunks[1].width);

        let total = Line::from(vec![
            Span::styled("Total Rep: ", Style::default().fg(Theme::MUTED_TEXT)),
            Span::styled(
                format!("{}", self.stats.total_rep),
                Style::default()
                    .fg(Theme::REP_COLOR)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        buf.set_line(chunks[2].x, chunks[2].y, &total, chunks[2].width);
    }
}
