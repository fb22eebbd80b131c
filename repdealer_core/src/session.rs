use crate::card::{Card, PlayerStats};
use crate::catalog::CatalogStore;
use crate::request::{RequestCoordinator, RequestId};
use crate::selection::{Preview, SelectOutcome, Selection};

/// Everything that lives between a show and the following close
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub catalog: CatalogStore,
    pub selection: Selection,
    pub request: RequestCoordinator,
    loading: bool,
}

impl Session {
    pub fn open(cards: Option<Vec<Card>>, stats: Option<PlayerStats>) -> Self {
        let mut session = Self::default();
        session.catalog.load(cards, stats);
        session
    }

    /// New catalog for an open session: selection and request start over.
    /// Returns the id of a request that was dropped, if any.
    pub fn replace_catalog(
        &mut self,
        cards: Option<Vec<Card>>,
        stats: Option<PlayerStats>,
    ) -> Option<RequestId> {
        self.catalog.load(cards, stats);
        self.selection.reset();
        self.loading = false;
        self.request.reset()
    }

    pub fn select(&mut self, index: usize) -> SelectOutcome {
        self.selection.select(index, self.catalog.len())
    }

    pub fn preview(&self) -> Option<Preview> {
        self.selection.preview(&self.catalog)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// The give button is disabled for the whole life of a request
    pub fn confirm_enabled(&self) -> bool {
        !self.request.is_pending()
    }

    pub fn cancel_enabled(&self) -> bool {
        !self.request.is_pending()
    }
}
