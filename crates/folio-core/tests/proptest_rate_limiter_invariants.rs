//! Property-based invariant tests for the trailing-edge rate limiter.
//!
//! 1. At most one timer is ever in flight
//! 2. Every scheduled timer carries the full window
//! 3. Executions never exceed scheduled timers
//! 4. Counters account for every signal

use core::time::Duration;

use folio_core::rate_limiter::{Admission, RateLimiter};
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
enum Op {
    Signal,
    Fire,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![4 => Just(Op::Signal), 1 => Just(Op::Fire)]
}

fn window_strategy() -> impl Strategy<Value = Duration> {
    (1u64..1_000).prop_map(Duration::from_millis)
}

// ── Properties ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn at_most_one_timer_in_flight(
        window in window_strategy(),
        ops in prop::collection::vec(op_strategy(), 0..200),
    ) {
        let mut limiter = RateLimiter::new(window);
        let mut in_flight = 0u32;
        for op in ops {
            match op {
                Op::Signal => {
                    if let Admission::Scheduled { delay } = limiter.signal() {
                        prop_assert_eq!(delay, window);
                        in_flight += 1;
                    }
                }
                Op::Fire => {
                    if in_flight > 0 {
                        prop_assert!(limiter.complete());
                        in_flight -= 1;
                    } else {
                        prop_assert!(!limiter.complete());
                    }
                }
            }
            prop_assert!(in_flight <= 1);
            prop_assert_eq!(limiter.is_pending(), in_flight == 1);
        }
    }

    #[test]
    fn counters_account_for_every_signal(
        ops in prop::collection::vec(op_strategy(), 0..200),
    ) {
        let mut limiter = RateLimiter::new(Duration::from_millis(50));
        let mut signals = 0u64;
        let mut scheduled = 0u64;
        for op in ops {
            match op {
                Op::Signal => {
                    signals += 1;
                    if limiter.signal().delay().is_some() {
                        scheduled += 1;
                    }
                }
                Op::Fire => {
                    limiter.complete();
                }
            }
        }
        prop_assert_eq!(scheduled + limiter.coalesced_count(), signals);
        prop_assert!(limiter.fired_count() <= scheduled);
    }

    #[test]
    fn burst_within_one_window_runs_once(burst in 1usize..500) {
        let mut limiter = RateLimiter::new(Duration::from_millis(50));
        let scheduled = (0..burst)
            .filter(|_| limiter.signal().delay().is_some())
            .count();
        prop_assert_eq!(scheduled, 1);
        prop_assert!(limiter.complete());
        prop_assert_eq!(limiter.fired_count(), 1);
    }
}
