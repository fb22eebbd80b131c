use crate::card::{Card, PlayerStats};

/// What the grid area should show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// No cards on offer; the empty-state panel is shown instead of the grid
    Empty,
    Cards,
}

/// The offer-set of the current session plus the player's totals.
///
/// Replaced wholesale on every show; there is no merge path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogStore {
    cards: Vec<Card>,
    stats: PlayerStats,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace cards and stats in one step. Absent stats read as zeros.
    pub fn load(&mut self, cards: Option<Vec<Card>>, stats: Option<PlayerStats>) {
        self.cards = cards.unwrap_or_default();
        self.stats = stats.unwrap_or_default();
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn stats(&self) -> PlayerStats {
        self.stats
    }

    pub fn display_mode(&self) -> DisplayMode {
        if self.is_empty() {
            DisplayMode::Empty
        } else {
            DisplayMode::Cards
        }
    }
}
