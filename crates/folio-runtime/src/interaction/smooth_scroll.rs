#![forbid(unsafe_code)]

//! In-page navigation through the platform's smooth scrolling.

use folio_core::{Effect, Effects, LayoutProbe, LinkRole, Signal};

use crate::context::PageContext;
use crate::dispatch::Flow;

/// `Click`: an internal nav link scrolls smoothly instead of jumping.
///
/// External links (and the resume button) keep the browser's default
/// navigation. An internal link whose fragment names no element only has
/// its jump suppressed.
pub(crate) fn on_click(
    signal: &Signal,
    ctx: &mut PageContext,
    _probe: &dyn LayoutProbe,
    effects: &mut Effects,
) -> Flow {
    let Signal::Click(click) = signal else {
        return Flow::Continue;
    };
    let link = click.path.iter().find_map(|node| {
        ctx.nav_links.iter().find(|link| {
            link.node == *node
                && !link
                    .role
                    .intersects(LinkRole::DROPDOWN_ITEM | LinkRole::RESUME_BUTTON)
        })
    });
    let Some(link) = link.filter(|link| link.is_internal()) else {
        return Flow::Continue;
    };
    effects.push(Effect::PreventDefault);
    match link.target {
        Some(target) => {
            tracing::debug!(target: "folio.scroll", href = %link.href, "smooth scroll");
            effects.push(Effect::ScrollIntoView { target });
        }
        None => {
            tracing::debug!(target: "folio.scroll", href = %link.href, "fragment has no target");
        }
    }
    Flow::Continue
}
