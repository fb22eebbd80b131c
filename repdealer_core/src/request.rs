use std::fmt;

use crate::card::Card;
use crate::catalog::CatalogStore;
use crate::error::ConfirmRejected;
use crate::protocol::Outbound;
use crate::selection::Selection;

/// Identity of one give request. Never reused within a surface's lifetime,
/// so timers can tell their own request apart from a later one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl RequestId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "req#{}", self.0)
    }
}

/// Where the give action currently stands
#[derive(Debug, Clone, PartialEq)]
pub enum RequestPhase {
    Idle,
    /// Confirmed; `giveCard` goes out once the debounce elapses.
    /// `settled` is set when the host lowered the loading indicator early.
    Debouncing {
        id: RequestId,
        index: usize,
        card: Card,
        settled: bool,
    },
    /// `giveCard` sent; waiting for the host or the response timeout
    AwaitingHost { id: RequestId, index: usize },
}

/// Output of a due dispatch timer
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatch {
    pub message: Outbound,
    /// Arm the response timeout; false when the host already answered
    pub await_response: bool,
}

/// How a host-side "done" landed on the request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Nothing was outstanding
    Nothing,
    /// Request finished; its timers can go
    Settled(RequestId),
    /// Request still sends when its debounce ends, but won't wait for a reply
    SettledBeforeDispatch(RequestId),
}

/// Drives one give action at a time: debounce, dispatch, response wait.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestCoordinator {
    phase: RequestPhase,
}

impl Default for RequestCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestCoordinator {
    pub fn new() -> Self {
        Self {
            phase: RequestPhase::Idle,
        }
    }

    pub fn phase(&self) -> &RequestPhase {
        &self.phase
    }

    pub fn is_pending(&self) -> bool {
        !matches!(self.phase, RequestPhase::Idle)
    }

    pub fn active_id(&self) -> Option<RequestId> {
        match &self.phase {
            RequestPhase::Idle => None,
            RequestPhase::Debouncing { id, .. } | RequestPhase::AwaitingHost { id, .. } => {
                Some(*id)
            }
        }
    }

    /// Catalog index of the card in flight
    pub fn sent_index(&self) -> Option<usize> {
        match &self.phase {
            RequestPhase::Idle => None,
            RequestPhase::Debouncing { index, .. } | RequestPhase::AwaitingHost { index, .. } => {
                Some(*index)
            }
        }
    }

    /// Start a request for the selected card. The card is snapshotted now;
    /// later selection changes don't alter what gets sent.
    pub fn begin(
        &mut self,
        id: RequestId,
        selection: Selection,
        catalog: &CatalogStore,
    ) -> Result<(), ConfirmRejected> {
        if let Some(active) = self.active_id() {
            return Err(ConfirmRejected::Pending(active));
        }
        let index = selection.index().ok_or(ConfirmRejected::NoSelection)?;
        let card = catalog
            .get(index)
            .cloned()
            .ok_or(ConfirmRejected::MissingCard(index))?;

        self.phase = RequestPhase::Debouncing {
            id,
            index,
            card,
            settled: false,
        };
        Ok(())
    }

    /// Debounce elapsed for `id`. Returns `None` when the timer is stale.
    pub fn dispatch(&mut self, id: RequestId) -> Option<Dispatch> {
        let (index, card, settled) = match &self.phase {
            RequestPhase::Debouncing {
                id: current,
                index,
                card,
                settled,
            } if *current == id => (*index, card.clone(), *settled),
            _ => return None,
        };

        self.phase = if settled {
            RequestPhase::Idle
        } else {
            RequestPhase::AwaitingHost { id, index }
        };

        Some(Dispatch {
            message: Outbound::GiveCard {
                card_index: index,
                card_data: card,
            },
            await_response: !settled,
        })
    }

    /// Response window for `id` ran out. True if that request was still
    /// waiting and has now been given up on.
    pub fn expire(&mut self, id: RequestId) -> bool {
        match &self.phase {
            RequestPhase::AwaitingHost { id: current, .. } if *current == id => {
                self.phase = RequestPhase::Idle;
                true
            }
            _ => false,
        }
    }

    /// The host lowered the loading indicator
    pub fn resolve(&mut self) -> Resolution {
        match &mut self.phase {
            RequestPhase::Idle => Resolution::Nothing,
            RequestPhase::Debouncing { id, settled, .. } => {
                *settled = true;
                Resolution::SettledBeforeDispatch(*id)
            }
            RequestPhase::AwaitingHost { id, .. } => {
                let id = *id;
                self.phase = RequestPhase::Idle;
                Resolution::Settled(id)
            }
        }
    }

    /// Drop whatever is in flight. Returns its id so timers can be cancelled.
    pub fn reset(&mut self) -> Option<RequestId> {
        let active = self.active_id();
        self.phase = RequestPhase::Idle;
        active
    }
}
