#![forbid(unsafe_code)]

//! Active-section resolution and nav-link highlighting.

use folio_core::{Effects, LayoutProbe, LinkRole, NavLinkOutline, Signal, class};

use super::geometry_cache::{CachedSection, GeometryCache};
use crate::context::PageContext;
use crate::dispatch::Flow;

/// Pick the current section for a scroll offset.
///
/// `scroll_y + bias` is compared against the cached top edges, bottom
/// section first. Returns `None` when the biased position is above every
/// section.
#[must_use]
pub fn resolve(cache: &GeometryCache, scroll_y: f64, bias: f64) -> Option<usize> {
    cache.current_index(scroll_y + bias)
}

/// Set `active` on the links pointing at `current` and clear it everywhere else.
///
/// Every internal link gets an explicit add or remove on every pass, so the
/// result never depends on the previous highlight state. The resume button
/// is skipped: its `active` class belongs to the dropdown. A current section
/// without an id (or with an empty one) highlights nothing.
pub fn highlight(links: &[NavLinkOutline], current: Option<&CachedSection>, effects: &mut Effects) {
    let current_id = current
        .and_then(|section| section.id.as_deref())
        .filter(|id| !id.is_empty());
    let highlightable = links
        .iter()
        .filter(|link| link.is_internal() && !link.role.contains(LinkRole::RESUME_BUTTON));
    for link in highlightable {
        let on = current_id.is_some_and(|id| link.points_at(id));
        effects.set_class(link.node, class::ACTIVE, on);
    }
}

/// `Timer(ScrollSync)`: re-resolve the active section.
pub(crate) fn on_scroll_window(
    signal: &Signal,
    ctx: &mut PageContext,
    probe: &dyn LayoutProbe,
    effects: &mut Effects,
) -> Flow {
    if !super::is_scroll_window(signal) {
        return Flow::Continue;
    }
    let scroll_y = probe.scroll_y();
    let current = resolve(&ctx.geometry, scroll_y, ctx.config.activation_bias);
    if current != ctx.active_section {
        tracing::debug!(
            target: "folio.scroll",
            scroll_y,
            section = current
                .and_then(|i| ctx.geometry.get(i))
                .and_then(|s| s.id.as_deref())
                .unwrap_or("<none>"),
            "active section changed"
        );
    }
    ctx.active_section = current;
    highlight(
        &ctx.nav_links,
        current.and_then(|index| ctx.geometry.get(index)),
        effects,
    );
    Flow::Continue
}
