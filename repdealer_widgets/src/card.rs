use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Widget;
use repdealer_core::Card;

use crate::icon;
use crate::theme::Theme;

/// Width and height of a card tile in terminal cells
pub const CARD_WIDTH: u16 = 24;
pub const CARD_HEIGHT: u16 = 6;

/// One reputation card in the grid
pub struct CardTileWidget<'a> {
    pub card: &'a Card,
    pub selected: bool,
    /// This card is the one a pending give request carries
    pub sending: bool,
    pub dimmed: bool,
}

impl<'a> CardTileWidget<'a> {
    pub fn new(card: &'a Card) -> Self {
        Self {
            card,
            selected: false,
            sending: false,
            dimmed: false,
        }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn sending(mut self, sending: bool) -> Self {
        self.sending = sending;
        self
    }

    pub fn dimmed(mut self, dimmed: bool) -> Self {
        self.dimmed = dimmed;
        self
    }

    fn border_color(&self) -> Color {
        if self.sending {
            Theme::CARD_SENDING
        } else if self.selected {
            Theme::CARD_SELECTED
        } else {
            Theme::CARD_BORDER
        }
    }

    fn text_color(&self, normal: Color) -> Color {
        if self.dimmed {
            Theme::DIM_TEXT
        } else {
            normal
        }
    }
}

impl<'a> Widget for CardTileWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < CARD_WIDTH || area.height < CARD_HEIGHT {
            return;
        }
        let area = Rect::new(area.x, area.y, CARD_WIDTH, CARD_HEIGHT);
        let border_style = Style::default().fg(self.border_color());

        // Selected tiles use double borders
        draw_frame(area, buf, border_style, self.selected || self.sending);

        let inner_w = (CARD_WIDTH - 2) as usize;

        // Row 1: icon, label, stack badge
        let badge = self
            .card
            .stack_badge()
            .map(|b| truncate(&b, inner_w / 2));
        let badge_w = badge.as_ref().map(|b| b.chars().count() + 1).unwrap_or(0);
        let icon_style = Style::default().fg(self.text_color(Theme::ICON_COLOR));
        buf.set_string(area.x + 1, area.y + 1, icon::glyph(self.card.icon_or_default()), icon_style);

        let label_w = inner_w.saturating_sub(2 + badge_w);
        let label = truncate(&self.card.display_label(), label_w);
        let label_style = Style::default()
            .fg(self.text_color(Theme::BRIGHT_TEXT))
            .add_modifier(Modifier::BOLD);
        buf.set_string(area.x + 3, area.y + 1, &label, label_style);

        if let Some(badge) = badge {
            let x = (area.x + CARD_WIDTH - 1).saturating_sub(badge.chars().count() as u16);
            let badge_style = Style::default()
                .fg(self.text_color(Theme::STACK_COLOR))
                .add_modifier(Modifier::BOLD);
            buf.set_string(x, area.y + 1, &badge, badge_style);
        }

        // Rows 2-3: description, wrapped by character
        let desc_style = Style::default().fg(self.text_color(Theme::MUTED_TEXT));
        let description = self.card.display_description();
        let mut chars = description.chars();
        for row in 0..2u16 {
            let line: String = chars.by_ref().take(inner_w).collect();
            if line.is_empty() {
                break;
            }
            buf.set_string(area.x + 1, area.y + 2 + row, &line, desc_style);
        }

        // Row 4: reputation badge, right aligned
        let rep = truncate(
            &format!("+{} rep", self.card.reputation_or_default()),
            inner_w,
        );
        let rep_x = (area.x + CARD_WIDTH - 1).saturating_sub(rep.chars().count() as u16);
        let rep_style = Style::default()
            .fg(self.text_color(Theme::REP_COLOR))
            .add_modifier(Modifier::BOLD);
        buf.set_string(rep_x, area.y + CARD_HEIGHT - 2, &rep, rep_style);
    }
}

/// Cut `text` to `width` characters, marking the cut with an ellipsis
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(width - 1).collect();
    out.push('\u{2026}'); // …
    out
}

/// Box outline with a blank interior. Double lines when `double`, rounded otherwise.
pub fn draw_frame(area: Rect, buf: &mut Buffer, style: Style, double: bool) {
    if area.width < 2 || area.height < 2 {
        return;
    }
    let (tl, tr, bl, br, h, v) = if double {
        ("\u{2554}", "\u{2557}", "\u{255a}", "\u{255d}", "\u{2550}", "\u{2551}") // ╔╗╚╝═║
    } else {
        ("\u{256d}", "\u{256e}", "\u{2570}", "\u{256f}", "\u{2500}", "\u{2502}") // ╭╮╰╯─│
    };
    let right = area.x + area.width - 1;
    let bottom = area.y + area.height - 1;

    buf.set_string(area.x, area.y, tl, style);
    buf.set_string(right, area.y, tr, style);
    buf.set_string(area.x, bottom, bl, style);
    buf.set_string(right, bottom, br, style);
    for x in area.x + 1..right {
        buf.set_string(x, area.y, h, style);
        buf.set_string(x, bottom, h, style);
    }
    for y in area.y + 1..bottom {
        buf.set_string(area.x, y, v, style);
        buf.set_string(right, y, v, style);
        // Fill interior
        for x in area.x + 1..right {
            buf.set_string(x, y, " ", Style::default());
        }
    }
}
