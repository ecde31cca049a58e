#![forbid(unsafe_code)]

//! Project card focus: one focused card, every other card dimmed.

use folio_core::{Effect, Effects, LayoutProbe, NodeId, Signal, class};

use crate::context::PageContext;
use crate::dispatch::Flow;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardFocus {
    cards: Vec<NodeId>,
    focused: Option<NodeId>,
}

impl CardFocus {
    #[must_use]
    pub(crate) fn new(cards: Vec<NodeId>) -> Self {
        Self {
            cards,
            focused: None,
        }
    }

    #[must_use]
    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    fn clear_all(&mut self, effects: &mut Effects) {
        for &card in &self.cards {
            effects.remove_class(card, class::FOCUSED);
            effects.remove_class(card, class::DIMMED);
        }
        self.focused = None;
    }

    /// Focus `card`, or unfocus everything if it already was focused.
    pub(crate) fn toggle(&mut self, card: NodeId, effects: &mut Effects) {
        let was_focused = self.focused == Some(card);
        self.clear_all(effects);
        if was_focused {
            return;
        }
        effects.add_class(card, class::FOCUSED);
        for &other in self.cards.iter().filter(|&&other| other != card) {
            effects.add_class(other, class::DIMMED);
        }
        self.focused = Some(card);
    }
}

/// `Click`: clicking a card (but not a link inside it) toggles its focus.
pub(crate) fn on_card_click(
    signal: &Signal,
    ctx: &mut PageContext,
    _probe: &dyn LayoutProbe,
    effects: &mut Effects,
) -> Flow {
    let (Signal::Click(click), Some(cards)) = (signal, ctx.cards.as_mut()) else {
        return Flow::Continue;
    };
    if click.target_is_anchor {
        return Flow::Continue;
    }
    if let Some(card) = click.closest(&cards.cards) {
        cards.toggle(card, effects);
    }
    Flow::Continue
}

/// `KeyDown`: Enter or Space on a card toggles its focus.
pub(crate) fn on_card_key(
    signal: &Signal,
    ctx: &mut PageContext,
    _probe: &dyn LayoutProbe,
    effects: &mut Effects,
) -> Flow {
    let (Signal::KeyDown(key), Some(cards)) = (signal, ctx.cards.as_mut()) else {
        return Flow::Continue;
    };
    if !key.key.is_activation() {
        return Flow::Continue;
    }
    if let Some(card) = key.closest(&cards.cards) {
        effects.push(Effect::PreventDefault);
        cards.toggle(card, effects);
    }
    Flow::Continue
}

/// `Click`: clicking anywhere outside the cards clears the focus.
pub(crate) fn on_click_outside(
    signal: &Signal,
    ctx: &mut PageContext,
    _probe: &dyn LayoutProbe,
    effects: &mut Effects,
) -> Flow {
    let (Signal::Click(click), Some(cards)) = (signal, ctx.cards.as_mut()) else {
        return Flow::Continue;
    };
    if cards.focused.is_some() && click.closest(&cards.cards).is_none() {
        cards.clear_all(effects);
    }
    Flow::Continue
}
