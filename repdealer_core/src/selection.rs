use crate::card::Card;
use crate::catalog::CatalogStore;

/// Single-card highlight within the current catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    NoSelection,
    Selected(usize),
}

/// Result of a `select` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Highlight moved; `previous` must be visually cleared first
    Changed { previous: Option<usize> },
    /// Same index picked again
    Reselected,
    /// Index not in the catalog; nothing changed
    OutOfRange,
}

impl Selection {
    pub fn select(&mut self, index: usize, catalog_len: usize) -> SelectOutcome {
        if index >= catalog_len {
            return SelectOutcome::OutOfRange;
        }
        let previous = self.index();
        if previous == Some(index) {
            return SelectOutcome::Reselected;
        }
        *self = Selection::Selected(index);
        SelectOutcome::Changed { previous }
    }

    pub fn reset(&mut self) {
        *self = Selection::NoSelection;
    }

    pub fn index(&self) -> Option<usize> {
        match self {
            Selection::NoSelection => None,
            Selection::Selected(i) => Some(*i),
        }
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.index() == Some(index)
    }

    /// Preview for the highlighted card, `None` hides the preview panel
    pub fn preview(&self, catalog: &CatalogStore) -> Option<Preview> {
        self.index()
            .and_then(|i| catalog.get(i))
            .map(Preview::from_card)
    }
}

/// The summary panel shown next to the grid for the highlighted card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub label: String,
    pub icon: String,
    pub reputation: u64,
}

impl Preview {
    pub fn from_card(card: &Card) -> Self {
        Self {
            label: card.display_label(),
            icon: card.icon_or_default().to_string(),
            reputation: card.reputation_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> CatalogStore {
        let mut store = CatalogStore::new();
        store.load(
            Some(vec![
                Card::new("Grove Street Pass", 10).icon("fa-leaf"),
                Card::new("Vagos Token", 25),
                Card::default(),
            ]),
            None,
        );
        store
    }

    #[test]
    fn test_first_select_has_no_previous() {
        let mut sel = Selection::default();
        assert_eq!(sel.select(1, 3), SelectOutcome::Changed { previous: None });
        assert_eq!(sel, Selection::Selected(1));
    }

    #[test]
    fn test_select_moves_highlight() {
        let mut sel = Selection::Selected(0);
        assert_eq!(sel.select(2, 3), SelectOutcome::Changed { previous: Some(0) });
        assert!(sel.is_selected(2));
        assert!(!sel.is_selected(0));
    }

    #[test]
    fn test_reselect_is_idempotent() {
        let mut sel = Selection::Selected(1);
        assert_eq!(sel.select(1, 3), SelectOutcome::Reselected);
        assert_eq!(sel, Selection::Selected(1));
    }

    #[test]
    fn test_out_of_range_is_noop() {
        let mut sel = Selection::Selected(1);
        assert_eq!(sel.select(3, 3), SelectOutcome::OutOfRange);
        assert_eq!(sel, Selection::Selected(1));

        let mut empty = Selection::default();
        assert_eq!(empty.select(0, 0), SelectOutcome::OutOfRange);
        assert_eq!(empty, Selection::NoSelection);
    }

    #[test]
    fn test_preview_tracks_selection() {
        let store = catalog();
        let mut sel = Selection::default();
        assert_eq!(sel.preview(&store), None);

        sel.select(0, store.len());
        let preview = sel.preview(&store).unwrap();
        assert_eq!(preview.label, "Grove Street Pass");
        assert_eq!(preview.icon, "fa-leaf");
        assert_eq!(preview.reputation, 10);

        sel.select(2, store.len());
        let preview = sel.preview(&store).unwrap();
        assert_eq!(preview.label, "Unknown Card");
        assert_eq!(preview.reputation, 0);

        sel.reset();
        assert_eq!(sel.preview(&store), None);
    }
}
