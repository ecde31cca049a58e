#![forbid(unsafe_code)]

//! Trailing-edge rate limiting for high-frequency page signals.
//!
//! Scroll and resize events can arrive dozens of times per second. Running
//! layout-dependent work on each one wastes frames, so every such signal
//! goes through a [`RateLimiter`] first.
//!
//! # Policy
//!
//! - **Idle → pending**: the first signal schedules one execution after the
//!   full window ([`Admission::Scheduled`]).
//! - **Pending**: further signals are dropped ([`Admission::Coalesced`]).
//!   They neither reschedule nor pull the execution forward.
//! - **Pending → idle**: when the host reports the timer fired
//!   ([`RateLimiter::complete`]) the handler body runs once and the next
//!   signal starts a fresh cycle.
//!
//! The limiter owns no clock. The host owns the timer; the limiter only
//! guarantees that at most one timer is ever in flight.
//!
//! # Usage
//!
//! ```
//! use core::time::Duration;
//! use folio_core::rate_limiter::{Admission, RateLimiter};
//!
//! let mut limiter = RateLimiter::new(Duration::from_millis(50));
//!
//! // First signal schedules a timer for the whole window.
//! assert_eq!(
//!     limiter.signal(),
//!     Admission::Scheduled { delay: Duration::from_millis(50) }
//! );
//! // Later signals in the same burst are dropped.
//! assert_eq!(limiter.signal(), Admission::Coalesced);
//!
//! // The timer fires: run the handler body exactly once.
//! assert!(limiter.complete());
//! assert!(!limiter.is_pending());
//! ```

use core::time::Duration;

/// Result of offering one signal to a [`RateLimiter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The limiter was idle; the host must schedule a timer for `delay`.
    Scheduled { delay: Duration },
    /// A timer is already pending; the signal was dropped.
    Coalesced,
}

impl Admission {
    /// Delay to schedule, if any.
    #[must_use]
    pub const fn delay(self) -> Option<Duration> {
        match self {
            Self::Scheduled { delay } => Some(delay),
            Self::Coalesced => None,
        }
    }
}

/// Trailing-edge coalescer with a fixed window.
///
/// # Thread Safety
///
/// `RateLimiter` is not thread-safe. Pages dispatch every signal on a single
/// thread.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    window: Duration,
    pending: bool,
    /// Signals dropped while a timer was pending.
    coalesced: u64,
    /// Handler executions so far.
    fired: u64,
}

impl RateLimiter {
    /// Create an idle limiter that runs its handler at most once per `window`.
    #[must_use]
    pub const fn new(window: Duration) -> Self {
        Self {
            window,
            pending: false,
            coalesced: 0,
            fired: 0,
        }
    }

    /// Offer one signal.
    pub fn signal(&mut self) -> Admission {
        if self.pending {
            self.coalesced = self.coalesced.saturating_add(1);
            #[cfg(feature = "tracing")]
            tracing::trace!(
                target: "folio.rate_limiter",
                window_ms = self.window.as_millis() as u64,
                coalesced = self.coalesced,
                "signal coalesced"
            );
            return Admission::Coalesced;
        }
        self.pending = true;
        Admission::Scheduled { delay: self.window }
    }

    /// The host's timer fired.
    ///
    /// Returns `true` if the handler body should run now. A completion
    /// arriving while idle (no timer was requested) is ignored.
    pub fn complete(&mut self) -> bool {
        if !self.pending {
            return false;
        }
        self.pending = false;
        self.fired = self.fired.saturating_add(1);
        true
    }

    /// Whether a timer is currently in flight.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending
    }

    /// The fixed window.
    #[must_use]
    pub const fn window(&self) -> Duration {
        self.window
    }

    /// Signals dropped since creation.
    #[must_use]
    pub const fn coalesced_count(&self) -> u64 {
        self.coalesced
    }

    /// Handler executions since creation.
    #[must_use]
    pub const fn fired_count(&self) -> u64 {
        self.fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(250);

    #[test]
    fn first_signal_schedules_full_window() {
        let mut limiter = RateLimiter::new(WINDOW);
        assert_eq!(limiter.signal().delay(), Some(WINDOW));
        assert!(limiter.is_pending());
    }

    #[test]
    fn burst_collapses_to_one_execution() {
        let mut limiter = RateLimiter::new(WINDOW);
        let scheduled = (0..10)
            .map(|_| limiter.signal())
            .filter(|a| matches!(a, Admission::Scheduled { .. }))
            .count();
        assert_eq!(scheduled, 1);
        assert_eq!(limiter.coalesced_count(), 9);
        assert!(limiter.complete());
        assert!(!limiter.complete(), "second completion must not re-run");
        assert_eq!(limiter.fired_count(), 1);
    }

    #[test]
    fn signal_after_completion_starts_fresh_cycle() {
        let mut limiter = RateLimiter::new(WINDOW);
        limiter.signal();
        limiter.complete();
        assert_eq!(limiter.signal(), Admission::Scheduled { delay: WINDOW });
    }

    #[test]
    fn stray_completion_while_idle_is_ignored() {
        let mut limiter = RateLimiter::new(WINDOW);
        assert!(!limiter.complete());
        assert_eq!(limiter.fired_count(), 0);
    }
}
