//! Visibility controller and the single entry point for every event.
//!
//! Each method runs one event to completion. Nothing here blocks or spawns;
//! the owner calls `tick` on its loop and forwards the returned outbound
//! messages to an [`OutboundSink`](crate::channel::OutboundSink).

use std::time::Instant;

use tracing::{debug, info};

use crate::card::{Card, PlayerStats};
use crate::config::SurfaceConfig;
use crate::error::{CancelRejected, ConfirmRejected};
use crate::keys::{InputCapture, KeyOutcome, SurfaceKey};
use crate::protocol::{Inbound, Outbound};
use crate::request::{RequestId, Resolution};
use crate::scheduler::{Scheduler, TimerKind};
use crate::selection::{Preview, SelectOutcome};
use crate::session::Session;

/// What moved the surface to hidden
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    Host,
    Cancel,
    Escape,
}

pub struct Surface {
    config: SurfaceConfig,
    session: Option<Session>,
    capture: InputCapture,
    scheduler: Scheduler,
    next_request: u64,
}

impl Surface {
    pub fn new(config: SurfaceConfig) -> Self {
        Self {
            config,
            session: None,
            capture: InputCapture::default(),
            scheduler: Scheduler::new(),
            next_request: 1,
        }
    }

    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    pub fn is_visible(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn input_capture(&self) -> InputCapture {
        self.capture
    }

    pub fn is_loading(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.is_loading())
    }

    pub fn confirm_enabled(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.confirm_enabled())
    }

    pub fn preview(&self) -> Option<Preview> {
        self.session.as_ref().and_then(|s| s.preview())
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.next_due()
    }

    pub fn pending_timers(&self) -> usize {
        self.scheduler.len()
    }

    // ─── Host messages ──────────────────────────────────────────────

    pub fn handle_inbound(&mut self, message: Inbound) -> Vec<Outbound> {
        match message {
            Inbound::Show { cards, stats } => {
                self.show(cards, stats);
                Vec::new()
            }
            Inbound::Close => self.close(CloseReason::Host),
            Inbound::Loading { show } => {
                self.set_loading(show);
                Vec::new()
            }
            Inbound::Unknown => {
                debug!("ignoring host message of unknown type");
                Vec::new()
            }
        }
    }

    fn show(&mut self, cards: Option<Vec<Card>>, stats: Option<PlayerStats>) {
        if let Some(session) = self.session.as_mut() {
            if let Some(dropped) = session.replace_catalog(cards, stats) {
                self.scheduler.cancel(dropped);
                debug!(request = %dropped, "request dropped by catalog refresh");
            }
            info!(cards = session.catalog.len(), "catalog refreshed");
            return;
        }

        let session = Session::open(cards, stats);
        info!(cards = session.catalog.len(), "surface opened");
        self.session = Some(session);
        self.capture.install();
    }

    fn close(&mut self, reason: CloseReason) -> Vec<Outbound> {
        let Some(mut session) = self.session.take() else {
            debug!(?reason, "close ignored, surface already hidden");
            return Vec::new();
        };
        if let Some(dropped) = session.request.reset() {
            self.scheduler.cancel(dropped);
            debug!(request = %dropped, "request dropped by close");
        }
        self.capture.remove();
        info!(?reason, "surface closed");
        vec![Outbound::Close]
    }

    fn set_loading(&mut self, show: bool) {
        let Some(session) = self.session.as_mut() else {
            debug!(show, "loading toggle ignored, surface hidden");
            return;
        };
        session.set_loading(show);
        if show {
            return;
        }
        match session.request.resolve() {
            Resolution::Nothing => {}
            Resolution::Settled(id) => {
                self.scheduler.cancel(id);
                info!(request = %id, "host finished request");
            }
            Resolution::SettledBeforeDispatch(id) => {
                debug!(request = %id, "host finished request before dispatch");
            }
        }
    }

    // ─── Player actions ─────────────────────────────────────────────

    /// Highlight a card. False if nothing changed.
    pub fn select(&mut self, index: usize) -> bool {
        let Some(session) = self.session.as_mut() else {
            debug!(index, "select ignored, surface hidden");
            return false;
        };
        match session.select(index) {
            SelectOutcome::Changed { previous } => {
                debug!(index, ?previous, "card selected");
                true
            }
            SelectOutcome::Reselected => false,
            SelectOutcome::OutOfRange => {
                debug!(index, len = session.catalog.len(), "select out of range");
                false
            }
        }
    }

    /// Give the selected card. The message itself leaves on a later `tick`
    /// once the debounce has passed.
    pub fn confirm(&mut self, now: Instant) -> Result<RequestId, ConfirmRejected> {
        let result = self.begin_request(now);
        if let Err(e) = &result {
            debug!(error = %e, "confirm rejected");
        }
        result
    }

    fn begin_request(&mut self, now: Instant) -> Result<RequestId, ConfirmRejected> {
        let session = self.session.as_mut().ok_or(ConfirmRejected::Hidden)?;
        let id = RequestId::new(self.next_request);
        session
            .request
            .begin(id, session.selection, &session.catalog)?;
        self.next_request += 1;

        session.set_loading(true);
        self.scheduler
            .schedule(now + self.config.debounce, id, TimerKind::Dispatch);
        info!(request = %id, index = ?session.request.sent_index(), "give confirmed");
        Ok(id)
    }

    /// Close from the cancel button. Refused while a request is in flight.
    pub fn cancel(&mut self) -> Result<Vec<Outbound>, CancelRejected> {
        let session = self.session.as_ref().ok_or(CancelRejected::Hidden)?;
        if let Some(id) = session.request.active_id() {
            debug!(request = %id, "cancel refused while request pending");
            return Err(CancelRejected::RequestPending(id));
        }
        Ok(self.close(CloseReason::Cancel))
    }

    pub fn handle_key(&mut self, key: SurfaceKey) -> KeyOutcome {
        if !self.is_visible() {
            return KeyOutcome::pass_through();
        }
        if key == SurfaceKey::Escape {
            return KeyOutcome::swallowed(self.close(CloseReason::Escape));
        }
        if self.capture.intercepts(key) {
            KeyOutcome::swallowed(Vec::new())
        } else {
            KeyOutcome::pass_through()
        }
    }

    // ─── Timers ─────────────────────────────────────────────────────

    /// Fire every timer due at `now`
    pub fn tick(&mut self, now: Instant) -> Vec<Outbound> {
        let mut outbound = Vec::new();
        if self.scheduler.is_empty() {
            return outbound;
        }
        while let Some(timer) = self.scheduler.pop_due(now) {
            match timer.kind {
                TimerKind::Dispatch => {
                    if let Some(message) = self.fire_dispatch(timer.request, now) {
                        outbound.push(message);
                    }
                }
                TimerKind::ResponseTimeout => self.fire_timeout(timer.request),
            }
        }
        outbound
    }

    fn fire_dispatch(&mut self, id: RequestId, now: Instant) -> Option<Outbound> {
        let Some(session) = self.session.as_mut() else {
            debug!(request = %id, "stale dispatch timer");
            return None;
        };
        let Some(dispatch) = session.request.dispatch(id) else {
            debug!(request = %id, "stale dispatch timer");
            return None;
        };
        if dispatch.await_response {
            self.scheduler.schedule(
                now + self.config.response_timeout,
                id,
                TimerKind::ResponseTimeout,
            );
        }
        info!(request = %id, "giveCard dispatched");
        Some(dispatch.message)
    }

    fn fire_timeout(&mut self, id: RequestId) {
        let Some(session) = self.session.as_mut() else {
            debug!(request = %id, "stale response timer");
            return;
        };
        if session.request.expire(id) {
            session.set_loading(false);
            info!(request = %id, "no answer from host, unblocking");
        } else {
            debug!(request = %id, "stale response timer");
        }
    }
}

impl Default for Surface {
    fn default() -> Self {
        Self::new(SurfaceConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn show(cards: Vec<Card>) -> Inbound {
        Inbound::Show {
            cards: Some(cards),
            stats: Some(PlayerStats::new(2, 35)),
        }
    }

    fn catalog() -> Vec<Card> {
        vec![Card::new("Grove Street Pass", 10), Card::new("Vagos Token", 25)]
    }

    fn opened() -> Surface {
        let mut surface = Surface::default();
        assert!(surface.handle_inbound(show(catalog())).is_empty());
        surface
    }

    #[test]
    fn test_show_opens_and_installs_capture() {
        let surface = opened();
        assert!(surface.is_visible());
        assert!(surface.input_capture().is_installed());
        assert!(surface.preview().is_none());
        assert!(surface.confirm_enabled());
    }

    #[test]
    fn test_close_while_hidden_is_silent() {
        let mut surface = Surface::default();
        assert!(surface.handle_inbound(Inbound::Close).is_empty());
    }

    #[test]
    fn test_host_close_is_still_reported() {
        let mut surface = opened();
        assert_eq!(surface.handle_inbound(Inbound::Close), vec![Outbound::Close]);
        assert!(!surface.is_visible());
        assert!(!surface.input_capture().is_installed());
    }

    #[test]
    fn test_loading_show_keeps_selection() {
        let mut surface = opened();
        surface.select(1);
        surface.handle_inbound(Inbound::Loading { show: true });
        assert!(surface.is_loading());
        assert_eq!(surface.preview().map(|p| p.reputation), Some(25));
    }

    #[test]
    fn test_loading_ignored_while_hidden() {
        let mut surface = Surface::default();
        surface.handle_inbound(Inbound::Loading { show: true });
        assert!(!surface.is_loading());
        assert!(!surface.is_visible());
    }

    #[test]
    fn test_confirm_flow_with_host_answer() {
        let t0 = Instant::now();
        let mut surface = opened();
        surface.select(0);
        let id = surface.confirm(t0).unwrap();
        assert!(surface.is_loading());
        assert!(!surface.confirm_enabled());

        // debounce not over yet
        assert!(surface.tick(t0 + Duration::from_millis(299)).is_empty());

        let sent = surface.tick(t0 + Duration::from_millis(300));
        assert_eq!(
            sent,
            vec![Outbound::GiveCard {
                card_index: 0,
                card_data: Card::new("Grove Street Pass", 10),
            }]
        );
        assert_eq!(surface.pending_timers(), 1);

        surface.handle_inbound(Inbound::Loading { show: false });
        assert!(!surface.is_loading());
        assert!(surface.confirm_enabled());
        assert_eq!(surface.pending_timers(), 0);
        assert!(surface.session().unwrap().request.active_id() != Some(id));
    }

    #[test]
    fn test_early_host_answer_still_sends_once() {
        let t0 = Instant::now();
        let mut surface = opened();
        surface.select(1);
        surface.confirm(t0).unwrap();
        surface.handle_inbound(Inbound::Loading { show: false });

        let sent = surface.tick(t0 + Duration::from_millis(300));
        assert_eq!(sent.len(), 1);
        assert!(surface.confirm_enabled());
        assert_eq!(surface.pending_timers(), 0);
    }

    #[test]
    fn test_cancel_refused_while_pending() {
        let t0 = Instant::now();
        let mut surface = opened();
        surface.select(0);
        let id = surface.confirm(t0).unwrap();
        assert_eq!(surface.cancel(), Err(CancelRejected::RequestPending(id)));
        assert!(surface.is_visible());
    }

    #[test]
    fn test_cancel_closes_when_idle() {
        let mut surface = opened();
        assert_eq!(surface.cancel(), Ok(vec![Outbound::Close]));
        assert_eq!(surface.cancel(), Err(CancelRejected::Hidden));
    }

    #[test]
    fn test_escape_closes_even_while_pending() {
        let t0 = Instant::now();
        let mut surface = opened();
        surface.select(0);
        surface.confirm(t0).unwrap();

        let outcome = surface.handle_key(SurfaceKey::Escape);
        assert_eq!(outcome.outbound, vec![Outbound::Close]);
        assert!(!outcome.propagate);
        assert_eq!(surface.pending_timers(), 0);
        assert!(surface.tick(t0 + Duration::from_secs(10)).is_empty());
    }

    #[test]
    fn test_key_capture() {
        let mut surface = Surface::default();
        assert!(surface.handle_key(SurfaceKey::Char('w')).propagate);
        assert!(surface.handle_key(SurfaceKey::Escape).propagate);

        surface.handle_inbound(show(catalog()));
        assert!(!surface.handle_key(SurfaceKey::Char('w')).propagate);
        assert!(!surface.handle_key(SurfaceKey::Space).propagate);
        assert!(surface.handle_key(SurfaceKey::Char('x')).propagate);
        assert!(surface.is_visible());
    }

    #[test]
    fn test_refresh_while_visible_drops_request() {
        let t0 = Instant::now();
        let mut surface = opened();
        surface.select(0);
        surface.confirm(t0).unwrap();

        assert!(surface.handle_inbound(show(vec![Card::new("Ballas Favor", 5)])).is_empty());
        assert!(surface.is_visible());
        assert!(surface.confirm_enabled());
        assert!(!surface.is_loading());
        assert!(surface.tick(t0 + Duration::from_secs(1)).is_empty());
    }

    #[test]
    fn test_request_ids_never_repeat_across_sessions() {
        let t0 = Instant::now();
        let mut surface = opened();
        surface.select(0);
        let first = surface.confirm(t0).unwrap();
        surface.handle_inbound(Inbound::Close);

        surface.handle_inbound(show(catalog()));
        surface.select(0);
        let second = surface.confirm(t0).unwrap();
        assert!(second > first);
    }

    #[test]
    fn test_custom_timings() {
        let t0 = Instant::now();
        let config = SurfaceConfig::default()
            .debounce(Duration::from_millis(10))
            .response_timeout(Duration::from_millis(50));
        let mut surface = Surface::new(config);
        surface.handle_inbound(show(catalog()));
        surface.select(1);
        surface.confirm(t0).unwrap();

        let dispatched_at = t0 + Duration::from_millis(10);
        assert_eq!(surface.tick(dispatched_at).len(), 1);
        surface.tick(dispatched_at + Duration::from_millis(49));
        assert!(surface.is_loading());
        surface.tick(dispatched_at + Duration::from_millis(50));
        assert!(!surface.is_loading());
        assert!(surface.confirm_enabled());
    }
}
