use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Widget;

use crate::theme::Theme;

const GIVE_WIDTH: u16 = 18;
const CANCEL_WIDTH: u16 = 14;
const GAP: u16 = 2;

/// Bottom button row: [Give Card] [Cancel]
pub struct ActionButtonsWidget {
    pub can_give: bool,
    pub can_cancel: bool,
}

/// Identifies which button was clicked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonHit {
    Give,
    Cancel,
}

impl ActionButtonsWidget {
    pub fn new(can_give: bool, can_cancel: bool) -> Self {
        Self {
            can_give,
            can_cancel,
        }
    }

    /// Returns (give_rect, cancel_rect)
    pub fn button_rects(area: Rect) -> (Rect, Rect) {
        let total_w = GIVE_WIDTH + GAP + CANCEL_WIDTH;
        let start_x = area.x + area.width.saturating_sub(total_w) / 2;
        let height = area.height.min(3);

        let give = Rect::new(start_x, area.y, GIVE_WIDTH, height).intersection(area);
        let cancel =
            Rect::new(start_x + GIVE_WIDTH + GAP, area.y, CANCEL_WIDTH, height).intersection(area);
        (give, cancel)
    }

    /// Check if a click at (col, row) hits a button
    pub fn hit_test(area: Rect, col: u16, row: u16) -> Option<ButtonHit> {
        let (give, cancel) = Self::button_rects(area);
        if give.contains((col, row).into()) {
            return Some(ButtonHit::Give);
        }
        if cancel.contains((col, row).into()) {
            return Some(ButtonHit::Cancel);
        }
        None
    }
}

impl Widget for ActionButtonsWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 3 || area.width < 34 {
            return;
        }

        let (give_rect, cancel_rect) = Self::button_rects(area);

        render_button(
            buf,
            give_rect,
            "Give Card",
            self.can_give,
            Theme::GIVE_COLOR,
        );
        render_button(
            buf,
            cancel_rect,
            "Cancel",
            self.can_cancel,
            Theme::CANCEL_COLOR,
        );
    }
}

fn render_button(buf: &mut Buffer, area: Rect, label: &str, enabled: bool, active_color: Color) {
    if area.width < 3 || area.height < 3 {
        return;
    }

    let color = if enabled { active_color } else { Theme::DIM_TEXT };
    let border_style = Style::default().fg(color);
    let text_style = if enabled {
        Style::default()
            .fg(Theme::BRIGHT_TEXT)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Theme::DIM_TEXT)
    };

    crate::card::draw_frame(Rect::new(area.x, area.y, area.width, 3), buf, border_style, false);

    // Center label
    let inner_w = area.width.saturating_sub(2) as usize;
    let display_label: String = label.chars().take(inner_w).collect();
    let label_x =
        area.x + 1 + (inner_w as u16).saturating_sub(display_label.chars().count() as u16) / 2;
    buf.set_string(label_x, area.y + 1, &display_label, text_style);
}
