#![forbid(unsafe_code)]

//! Resize reconciliation.
//!
//! After the resize window closes the geometry cache is re-measured. Nothing
//! else runs: the active-section highlight stays keyed to pre-resize geometry
//! until the next scroll window closes.

use folio_core::{Effects, LayoutProbe, Signal, TimerKind};

use crate::context::PageContext;
use crate::dispatch::Flow;

/// `Timer(GeometryRefresh)`: re-measure the geometry cache.
pub(crate) fn on_resize_window(
    signal: &Signal,
    ctx: &mut PageContext,
    probe: &dyn LayoutProbe,
    _effects: &mut Effects,
) -> Flow {
    if !matches!(signal, Signal::Timer(TimerKind::GeometryRefresh)) {
        return Flow::Continue;
    }
    if !ctx.resize_limiter.complete() {
        tracing::debug!(target: "folio.resize", "stray resize timer ignored");
        return Flow::Continue;
    }
    let measured = ctx.geometry.refresh(probe);
    tracing::debug!(
        target: "folio.resize",
        sections = ctx.geometry.len(),
        measured,
        "geometry cache refreshed"
    );
    Flow::Continue
}
