#![forbid(unsafe_code)]

//! Collapsible navigation menu behind the hamburger button.

use folio_core::effect::ARIA_EXPANDED;
use folio_core::{Effects, Key, LayoutProbe, LinkRole, NodeId, Signal, class};

use crate::context::PageContext;
use crate::dispatch::Flow;

/// Two-state open/closed menu. `aria-expanded` on the hamburger mirrors `open`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavMenu {
    hamburger: NodeId,
    menu: NodeId,
    open: bool,
}

impl NavMenu {
    #[must_use]
    pub(crate) fn new(hamburger: NodeId, menu: NodeId) -> Self {
        Self {
            hamburger,
            menu,
            open: false,
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    fn render(&self, effects: &mut Effects) {
        effects.set_class(self.menu, class::ACTIVE, self.open);
        effects.set_class(self.hamburger, class::ACTIVE, self.open);
        effects.set_attribute(
            self.hamburger,
            ARIA_EXPANDED,
            if self.open { "true" } else { "false" },
        );
    }

    pub(crate) fn toggle(&mut self, effects: &mut Effects) {
        self.open = !self.open;
        self.render(effects);
        tracing::debug!(target: "folio.menu", open = self.open, "menu toggled");
    }

    /// Close the menu if it is open. Returns whether anything changed.
    pub(crate) fn close(&mut self, effects: &mut Effects) -> bool {
        if !self.open {
            return false;
        }
        self.open = false;
        self.render(effects);
        tracing::debug!(target: "folio.menu", "menu closed");
        true
    }

    /// Whether a click with this path landed inside the hamburger or the menu.
    fn contains(&self, path: &[NodeId]) -> bool {
        path.contains(&self.hamburger) || path.contains(&self.menu)
    }
}

/// `Click`: the hamburger toggles the menu.
pub(crate) fn on_hamburger_click(
    signal: &Signal,
    ctx: &mut PageContext,
    _probe: &dyn LayoutProbe,
    effects: &mut Effects,
) -> Flow {
    let (Signal::Click(click), Some(menu)) = (signal, ctx.menu.as_mut()) else {
        return Flow::Continue;
    };
    if click.within(menu.hamburger) {
        menu.toggle(effects);
    }
    Flow::Continue
}

/// `Click`: following a plain nav link closes the menu.
///
/// The resume button and dropdown entries keep the menu open.
pub(crate) fn on_nav_link_click(
    signal: &Signal,
    ctx: &mut PageContext,
    _probe: &dyn LayoutProbe,
    effects: &mut Effects,
) -> Flow {
    let (Signal::Click(click), Some(menu)) = (signal, ctx.menu.as_mut()) else {
        return Flow::Continue;
    };
    let closing_link = ctx.nav_links.iter().any(|link| {
        !link
            .role
            .intersects(LinkRole::RESUME_BUTTON | LinkRole::DROPDOWN_ITEM)
            && click.within(link.node)
    });
    if closing_link {
        menu.close(effects);
    }
    Flow::Continue
}

/// `Click`: a click outside the hamburger and the menu closes the menu.
pub(crate) fn on_click_outside(
    signal: &Signal,
    ctx: &mut PageContext,
    _probe: &dyn LayoutProbe,
    effects: &mut Effects,
) -> Flow {
    let (Signal::Click(click), Some(menu)) = (signal, ctx.menu.as_mut()) else {
        return Flow::Continue;
    };
    if !menu.contains(&click.path) {
        menu.close(effects);
    }
    Flow::Continue
}

/// `KeyDown`: Escape closes an open menu.
pub(crate) fn on_key(
    signal: &Signal,
    ctx: &mut PageContext,
    _probe: &dyn LayoutProbe,
    effects: &mut Effects,
) -> Flow {
    let (Signal::KeyDown(key), Some(menu)) = (signal, ctx.menu.as_mut()) else {
        return Flow::Continue;
    };
    if key.key == Key::Escape {
        menu.close(effects);
    }
    Flow::Continue
}
