#![forbid(unsafe_code)]

//! Resume dropdown attached to the nav bar.

use folio_core::{Effect, Effects, LayoutProbe, NodeId, Signal, class};

use crate::context::PageContext;
use crate::dispatch::Flow;

/// Two-state dropdown: `active` on the button and `show` on the panel when open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeDropdown {
    button: NodeId,
    panel: NodeId,
    items: Vec<NodeId>,
    open: bool,
}

impl ResumeDropdown {
    #[must_use]
    pub(crate) fn new(button: NodeId, panel: NodeId, items: Vec<NodeId>) -> Self {
        Self {
            button,
            panel,
            items,
            open: false,
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    fn render(&self, effects: &mut Effects) {
        effects.set_class(self.button, class::ACTIVE, self.open);
        effects.set_class(self.panel, class::SHOW, self.open);
    }

    fn toggle(&mut self, effects: &mut Effects) {
        self.open = !self.open;
        self.render(effects);
    }

    fn close(&mut self, effects: &mut Effects) {
        if self.open {
            self.open = false;
            self.render(effects);
        }
    }
}

/// `Click`: the button toggles the dropdown and stops the click there.
///
/// Halting keeps the document-level "click outside" reactions from closing
/// the dropdown again in the same dispatch. The button is a `href="#"` link,
/// so its jump to the top of the page is suppressed too.
pub(crate) fn on_button_click(
    signal: &Signal,
    ctx: &mut PageContext,
    _probe: &dyn LayoutProbe,
    effects: &mut Effects,
) -> Flow {
    let (Signal::Click(click), Some(dropdown)) = (signal, ctx.dropdown.as_mut()) else {
        return Flow::Continue;
    };
    if !click.within(dropdown.button) {
        return Flow::Continue;
    }
    effects.push(Effect::PreventDefault);
    effects.push(Effect::StopPropagation);
    dropdown.toggle(effects);
    tracing::debug!(target: "folio.menu", open = dropdown.open, "resume dropdown toggled");
    Flow::Halt
}

/// `Click`: choosing an entry closes the dropdown and the mobile menu.
pub(crate) fn on_item_click(
    signal: &Signal,
    ctx: &mut PageContext,
    _probe: &dyn LayoutProbe,
    effects: &mut Effects,
) -> Flow {
    let (Signal::Click(click), Some(dropdown)) = (signal, ctx.dropdown.as_mut()) else {
        return Flow::Continue;
    };
    if click.closest(&dropdown.items).is_none() {
        return Flow::Continue;
    }
    dropdown.close(effects);
    if let Some(menu) = ctx.menu.as_mut() {
        menu.close(effects);
    }
    Flow::Continue
}

/// `Click`: a click outside the button and panel closes the dropdown.
pub(crate) fn on_click_outside(
    signal: &Signal,
    ctx: &mut PageContext,
    _probe: &dyn LayoutProbe,
    effects: &mut Effects,
) -> Flow {
    let (Signal::Click(click), Some(dropdown)) = (signal, ctx.dropdown.as_mut()) else {
        return Flow::Continue;
    };
    if !click.within(dropdown.button) && !click.within(dropdown.panel) {
        dropdown.close(effects);
    }
    Flow::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dropdown() -> ResumeDropdown {
        ResumeDropdown::new(NodeId::new(1), NodeId::new(2), vec![NodeId::new(3)])
    }

    #[test]
    fn toggle_shows_panel_and_marks_button() {
        let mut dropdown = dropdown();
        let mut effects = Effects::new();
        dropdown.toggle(&mut effects);
        assert!(dropdown.is_open());
        assert_eq!(
            effects.into_vec(),
            vec![
                Effect::AddClass {
                    target: NodeId::new(1),
                    class: "active"
                },
                Effect::AddClass {
                    target: NodeId::new(2),
                    class: "show"
                },
            ]
        );
    }

    #[test]
    fn close_when_closed_emits_nothing() {
        let mut dropdown = dropdown();
        let mut effects = Effects::new();
        dropdown.close(&mut effects);
        assert!(effects.is_empty());
    }

    #[test]
    fn second_toggle_hides_panel() {
        let mut dropdown = dropdown();
        dropdown.toggle(&mut Effects::new());
        let mut effects = Effects::new();
        dropdown.toggle(&mut effects);
        assert!(!dropdown.is_open());
        assert!(effects.as_slice().contains(&Effect::RemoveClass {
            target: NodeId::new(2),
            class: "show"
        }));
    }
}
