use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Padding, Widget};

use crate::theme::Theme;

/// A centered popup overlay
pub struct PopupWidget {
    pub title: String,
    pub lines: Vec<(String, Style)>,
    pub width: u16,
    pub height: u16,
}

impl PopupWidget {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            lines: Vec::new(),
            width: 40,
            height: 7,
        }
    }

    pub fn line(mut self, text: impl Into<String>, style: Style) -> Self {
        self.lines.push((text.into(), style));
        self
    }

    pub fn size(mut self, width: u16, height: u16) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// "Processing" box shown while the host works on a give
    pub fn loading(tick: u64) -> Self {
        const SPINNER: [&str; 4] = ["\u{25d0}", "\u{25d3}", "\u{25d1}", "\u{25d2}"]; // ◐◓◑◒
        let frame = SPINNER[(tick / 4 % SPINNER.len() as u64) as usize];
        Self::new("Processing")
            .line(
                format!("{} Handing over card...", frame),
                Style::default()
                    .fg(Theme::BRIGHT_TEXT)
                    .add_modifier(Modifier::BOLD),
            )
            .line("Waiting for the dealer", Style::default().fg(Theme::MUTED_TEXT))
            .size(36, 6)
    }

    /// Placeholder for a session with nothing on offer
    pub fn empty_catalog() -> Self {
        Self::new("No Cards")
            .line(
                "You have no reputation cards",
                Style::default().fg(Theme::MUTED_TEXT),
            )
            .line(
                "Come back when you've earned some",
                Style::default().fg(Theme::DIM_TEXT),
            )
            .size(40, 6)
    }
}

impl Widget for PopupWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup_area = centered_rect(self.width, self.height, area);
        if popup_area.width < 4 || popup_area.height < 3 {
            return;
        }

        // Clear the area
        Clear.render(popup_area, buf);

        let title_line = Line::from(Span::styled(
            format!(" {} ", self.title),
            Style::default()
                .fg(Theme::GOLD)
                .add_modifier(Modifier::BOLD),
        ));

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(Theme::CARD_SELECTED))
            .style(Style::default().bg(Theme::OVERLAY_BG))
            .title(title_line)
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1));

        let inner = block.inner(popup_area);
        block.render(popup_area, buf);

        // Render lines centered
        for (i, (text, style)) in self.lines.iter().enumerate() {
            let y = inner.y + 1 + i as u16;
            if y >= inner.bottom() {
                break;
            }
            let text: String = text.chars().take(inner.width as usize).collect();
            let x = inner.x + inner.width.saturating_sub(text.chars().count() as u16) / 2;
            buf.set_string(x, y, &text, *style);
        }
    }
}

/// Rect of at most `width` x `height`, centered in `area`
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(buf: &Buffer) -> String {
        let area = buf.area;
        let mut out = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_empty_catalog_popup() {
        let area = Rect::new(0, 0, 60, 12);
        let mut buf = Buffer::empty(area);
        PopupWidget::empty_catalog().render(area, &mut buf);
        let rendered = text(&buf);
        assert!(rendered.contains("No Cards"));
        assert!(rendered.contains("You have no reputation cards"));
    }

    #[test]
    fn test_centered_rect_clamps_to_area() {
        let area = Rect::new(2, 2, 10, 4);
        assert_eq!(centered_rect(40, 7, area), area);
        assert_eq!(centered_rect(4, 2, area), Rect::new(5, 3, 4, 2));
    }
}
