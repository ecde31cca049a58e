#![forbid(unsafe_code)]

//! Virtual clock with a one-shot timer queue.
//!
//! Stands in for `setTimeout`: timers are scheduled relative to the current
//! virtual time and fire, in due order, only when the test advances the
//! clock past them. Timers due at the same instant fire in scheduling order.

use core::time::Duration;

use folio_core::TimerKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingTimer {
    due: Duration,
    seq: u64,
    kind: TimerKind,
}

/// Deterministic time source for the fake host.
#[derive(Debug, Clone, Default)]
pub struct VirtualClock {
    now: Duration,
    next_seq: u64,
    pending: Vec<PendingTimer>,
    fired: u64,
}

impl VirtualClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time since the clock was created.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedule `kind` to fire `delay` from now.
    pub fn schedule(&mut self, kind: TimerKind, delay: Duration) {
        self.pending.push(PendingTimer {
            due: self.now + delay,
            seq: self.next_seq,
            kind,
        });
        self.next_seq += 1;
    }

    /// Number of scheduled timers that have not fired.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Pending timers of one kind.
    #[must_use]
    pub fn pending_of(&self, kind: TimerKind) -> usize {
        self.pending.iter().filter(|t| t.kind == kind).count()
    }

    /// Timers fired since creation.
    #[must_use]
    pub fn fired(&self) -> u64 {
        self.fired
    }

    /// Remove and return the earliest timer due at or before `deadline`,
    /// moving the clock to its due time.
    pub fn pop_due(&mut self, deadline: Duration) -> Option<TimerKind> {
        let (index, _) = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= deadline)
            .min_by_key(|(_, t)| (t.due, t.seq))?;
        let timer = self.pending.remove(index);
        self.now = self.now.max(timer.due);
        self.fired += 1;
        Some(timer.kind)
    }

    /// Move the clock forward without firing anything.
    pub fn set_now(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timers_fire_in_due_order() {
        let mut clock = VirtualClock::new();
        clock.schedule(TimerKind::GeometryRefresh, Duration::from_millis(250));
        clock.schedule(TimerKind::ScrollSync, Duration::from_millis(50));
        let deadline = Duration::from_millis(300);
        assert_eq!(clock.pop_due(deadline), Some(TimerKind::ScrollSync));
        assert_eq!(clock.now(), Duration::from_millis(50));
        assert_eq!(clock.pop_due(deadline), Some(TimerKind::GeometryRefresh));
        assert_eq!(clock.pop_due(deadline), None);
        assert_eq!(clock.fired(), 2);
    }

    #[test]
    fn timers_after_deadline_stay_pending() {
        let mut clock = VirtualClock::new();
        clock.schedule(TimerKind::ScrollSync, Duration::from_millis(50));
        assert_eq!(clock.pop_due(Duration::from_millis(49)), None);
        assert_eq!(clock.pending_of(TimerKind::ScrollSync), 1);
    }

    #[test]
    fn same_instant_fires_in_schedule_order() {
        let mut clock = VirtualClock::new();
        clock.schedule(TimerKind::GeometryRefresh, Duration::from_millis(10));
        clock.schedule(TimerKind::ScrollSync, Duration::from_millis(10));
        let deadline = Duration::from_millis(10);
        assert_eq!(clock.pop_due(deadline), Some(TimerKind::GeometryRefresh));
        assert_eq!(clock.pop_due(deadline), Some(TimerKind::ScrollSync));
    }
}
