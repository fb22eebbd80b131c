use std::time::Instant;

use crate::request::RequestId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// End of the confirm debounce; sends `giveCard`
    Dispatch,
    /// End of the wait for the host to lower the loading indicator
    ResponseTimeout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    pub due: Instant,
    pub request: RequestId,
    pub kind: TimerKind,
}

/// Deadline timers keyed by request.
///
/// Nothing here runs on its own: the event loop polls `pop_due` once per tick
/// and every fired timer is re-checked against request state before it acts.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    timers: Vec<Timer>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due: Instant, request: RequestId, kind: TimerKind) {
        self.timers.push(Timer { due, request, kind });
    }

    /// Drop every timer belonging to `request`. Returns how many went.
    pub fn cancel(&mut self, request: RequestId) -> usize {
        let before = self.timers.len();
        self.timers.retain(|t| t.request != request);
        before - self.timers.len()
    }

    /// Earliest timer due at `now`, ties in scheduling order
    pub fn pop_due(&mut self, now: Instant) -> Option<Timer> {
        let (pos, _) = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= now)
            .min_by_key(|(i, t)| (t.due, *i))?;
        Some(self.timers.remove(pos))
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.timers.iter().map(|t| t.due).min()
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_pop_due_respects_deadline_order() {
        let t0 = Instant::now();
        let mut sched = Scheduler::new();
        sched.schedule(t0 + Duration::from_millis(500), RequestId::new(1), TimerKind::ResponseTimeout);
        sched.schedule(t0 + Duration::from_millis(300), RequestId::new(2), TimerKind::Dispatch);

        assert!(sched.pop_due(t0).is_none());
        assert_eq!(sched.next_due(), Some(t0 + Duration::from_millis(300)));

        let now = t0 + Duration::from_secs(1);
        assert_eq!(sched.pop_due(now).map(|t| t.request), Some(RequestId::new(2)));
        assert_eq!(sched.pop_due(now).map(|t| t.request), Some(RequestId::new(1)));
        assert!(sched.pop_due(now).is_none());
        assert!(sched.is_empty());
    }

    #[test]
    fn test_equal_deadlines_fire_in_schedule_order() {
        let t0 = Instant::now();
        let mut sched = Scheduler::new();
        sched.schedule(t0, RequestId::new(4), TimerKind::Dispatch);
        sched.schedule(t0, RequestId::new(3), TimerKind::Dispatch);
        assert_eq!(sched.pop_due(t0).map(|t| t.request), Some(RequestId::new(4)));
        assert_eq!(sched.pop_due(t0).map(|t| t.request), Some(RequestId::new(3)));
    }

    #[test]
    fn test_cancel_by_request() {
        let t0 = Instant::now();
        let mut sched = Scheduler::new();
        sched.schedule(t0, RequestId::new(1), TimerKind::Dispatch);
        sched.schedule(t0, RequestId::new(1), TimerKind::ResponseTimeout);
        sched.schedule(t0, RequestId::new(2), TimerKind::Dispatch);

        assert_eq!(sched.cancel(RequestId::new(1)), 2);
        assert_eq!(sched.len(), 1);
        assert_eq!(sched.cancel(RequestId::new(1)), 0);
    }
}
