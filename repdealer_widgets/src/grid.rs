use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;
use repdealer_core::Card;

use crate::card::{CardTileWidget, CARD_HEIGHT, CARD_WIDTH};

const H_SPACING: u16 = 2;
const V_SPACING: u16 = 1;

/// Grid of card tiles, row-major in catalog order.
/// Scrolls so the selected card is always on screen.
pub struct CardGridWidget<'a> {
    pub cards: &'a [Card],
    pub selected: Option<usize>,
    pub sending: Option<usize>,
    pub dimmed: bool,
}

impl<'a> CardGridWidget<'a> {
    pub fn new(cards: &'a [Card]) -> Self {
        Self {
            cards,
            selected: None,
            sending: None,
            dimmed: false,
        }
    }

    pub fn selected(mut self, selected: Option<usize>) -> Self {
        self.selected = selected;
        self
    }

    pub fn sending(mut self, sending: Option<usize>) -> Self {
        self.sending = sending;
        self
    }

    pub fn dimmed(mut self, dimmed: bool) -> Self {
        self.dimmed = dimmed;
        self
    }

    /// How many tiles fit side by side in `width`
    pub fn columns(width: u16) -> usize {
        (((width + H_SPACING) / (CARD_WIDTH + H_SPACING)) as usize).max(1)
    }

    fn visible_rows(height: u16) -> usize {
        (((height + V_SPACING) / (CARD_HEIGHT + V_SPACING)) as usize).max(1)
    }

    /// First grid row drawn, chosen to keep the selection visible
    pub fn scroll_row(&self, area: Rect) -> usize {
        let cols = Self::columns(area.width);
        let visible = Self::visible_rows(area.height);
        match self.selected {
            Some(i) if i / cols >= visible => i / cols + 1 - visible,
            _ => 0,
        }
    }

    /// Where tile `index` lands, or `None` if it is scrolled out of view
    pub fn card_rect(&self, area: Rect, index: usize) -> Option<Rect> {
        if index >= self.cards.len() {
            return None;
        }
        let cols = Self::columns(area.width);
        let first_row = self.scroll_row(area);
        let row = index / cols;
        if row < first_row || row - first_row >= Self::visible_rows(area.height) {
            return None;
        }

        let used_cols = cols.min(self.cards.len()) as u16;
        let total_w = used_cols * CARD_WIDTH + used_cols.saturating_sub(1) * H_SPACING;
        let start_x = area.x + area.width.saturating_sub(total_w) / 2;

        let col = (index % cols) as u16;
        let x = start_x + col * (CARD_WIDTH + H_SPACING);
        let y = area.y + (row - first_row) as u16 * (CARD_HEIGHT + V_SPACING);
        Some(Rect::new(x, y, CARD_WIDTH, CARD_HEIGHT))
    }

    /// Which tile sits under a click at (col, row)
    pub fn hit_test(&self, area: Rect, col: u16, row: u16) -> Option<usize> {
        (0..self.cards.len()).find(|&i| {
            self.card_rect(area, i)
                .is_some_and(|r| col >= r.x && col < r.right() && row >= r.y && row < r.bottom())
        })
    }
}

impl<'a> Widget for CardGridWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < CARD_HEIGHT || area.width < CARD_WIDTH {
            return;
        }

        for (i, card) in self.cards.iter().enumerate() {
            let Some(card_area) = self.card_rect(area, i) else {
                continue;
            };
            // Bounds check
            if card_area.right() > area.right() || card_area.bottom() > area.bottom() {
                continue;
            }

            CardTileWidget::new(card)
                .selected(self.selected == Some(i))
                .sending(self.sending == Some(i))
                .dimmed(self.dimmed)
                .render(card_area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards(n: usize) -> Vec<Card> {
        (0..n).map(|i| Card::new(format!("Card {}", i), i as u64)).collect()
    }

    #[test]
    fn test_columns() {
        assert_eq!(CardGridWidget::columns(10), 1);
        assert_eq!(CardGridWidget::columns(CARD_WIDTH), 1);
        assert_eq!(CardGridWidget::columns(CARD_WIDTH * 2 + H_SPACING), 2);
    }

    #[test]
    fn test_rects_are_row_major() {
        let cards = cards(3);
        let grid = CardGridWidget::new(&cards);
        let area = Rect::new(0, 0, CARD_WIDTH * 2 + H_SPACING, 40);

        let first = grid.card_rect(area, 0).unwrap();
        let second = grid.card_rect(area, 1).unwrap();
        let third = grid.card_rect(area, 2).unwrap();
        assert_eq!(first.y, second.y);
        assert!(second.x > first.x);
        assert_eq!(third.x, first.x);
        assert_eq!(third.y, first.y + CARD_HEIGHT + V_SPACING);
        assert!(grid.card_rect(area, 3).is_none());
    }

    #[test]
    fn test_scrolls_to_selection() {
        let cards = cards(10);
        let area = Rect::new(0, 0, CARD_WIDTH, CARD_HEIGHT * 2 + V_SPACING);
        let grid = CardGridWidget::new(&cards).selected(Some(5));

        assert_eq!(grid.scroll_row(area), 4);
        assert!(grid.card_rect(area, 0).is_none());
        assert_eq!(grid.card_rect(area, 5).map(|r| r.y), Some(CARD_HEIGHT + V_SPACING));
    }

    #[test]
    fn test_hit_test() {
        let cards = cards(2);
        let grid = CardGridWidget::new(&cards);
        let area = Rect::new(0, 0, 80, 20);
        let second = grid.card_rect(area, 1).unwrap();

        assert_eq!(grid.hit_test(area, second.x + 1, second.y + 1), Some(1));
        assert_eq!(grid.hit_test(area, 0, 19), None);
    }
}
