#![forbid(unsafe_code)]

//! Scroll-driven UI synchronization.
//!
//! # Pipeline
//!
//! ```text
//! scroll ──► scroll limiter (50 ms) ──► timer ──► active-section resolver
//!                                             └─► reveal tracker
//! load   ─────────────────────────────────────────► reveal tracker
//! resize ──► resize limiter (250 ms) ──► timer ──► resize reconciler
//! ```
//!
//! The geometry cache is shared: the reconciler writes it, the resolver
//! reads it. The reveal tracker never reads it; it measures live positions.
//! Scroll and resize are limited independently and may interleave.

pub mod active_section;
pub mod geometry_cache;
pub mod reveal;
pub mod resize;

use folio_core::{Admission, Effect, Effects, LayoutProbe, Signal, TimerKind};

use crate::context::PageContext;
use crate::dispatch::Flow;

fn schedule(admission: Admission, timer: TimerKind, effects: &mut Effects) {
    if let Admission::Scheduled { delay } = admission {
        tracing::trace!(
            target: "folio.scroll",
            timer = timer.label(),
            delay_ms = delay.as_millis() as u64,
            "timer scheduled"
        );
        effects.push(Effect::ScheduleTimer { timer, delay });
    }
}

/// `Scroll`: offer the signal to the scroll limiter.
pub(crate) fn throttle_scroll(
    _signal: &Signal,
    ctx: &mut PageContext,
    _probe: &dyn LayoutProbe,
    effects: &mut Effects,
) -> Flow {
    let admission = ctx.scroll_limiter.signal();
    schedule(admission, TimerKind::ScrollSync, effects);
    Flow::Continue
}

/// `Resize`: offer the signal to the resize limiter.
pub(crate) fn throttle_resize(
    _signal: &Signal,
    ctx: &mut PageContext,
    _probe: &dyn LayoutProbe,
    effects: &mut Effects,
) -> Flow {
    let admission = ctx.resize_limiter.signal();
    schedule(admission, TimerKind::GeometryRefresh, effects);
    Flow::Continue
}

/// `Timer(ScrollSync)`: close the scroll window.
///
/// Halts the signal when no scroll timer was pending, so a stray timer never
/// runs the resolver or the reveal tracker.
pub(crate) fn close_scroll_window(
    signal: &Signal,
    ctx: &mut PageContext,
    _probe: &dyn LayoutProbe,
    _effects: &mut Effects,
) -> Flow {
    if !matches!(signal, Signal::Timer(TimerKind::ScrollSync)) {
        return Flow::Continue;
    }
    if ctx.scroll_limiter.complete() {
        Flow::Continue
    } else {
        tracing::debug!(target: "folio.scroll", "stray scroll timer ignored");
        Flow::Halt
    }
}

/// Whether `signal` is the scroll window elapsing.
pub(crate) fn is_scroll_window(signal: &Signal) -> bool {
    matches!(signal, Signal::Timer(TimerKind::ScrollSync))
}
