#![forbid(unsafe_code)]

//! Side effects requested by the runtime.
//!
//! Reactions never touch the page directly. They append [`Effect`] values to
//! an [`Effects`] list, and the host applies the list in order once the
//! signal has been fully dispatched. The only mutations a host is ever asked
//! to make are class membership, one ARIA attribute, preference persistence,
//! and calls into platform primitives (timers, smooth scrolling, the email
//! relay, blocking notices).

use core::time::Duration;

use crate::event::{SignalKind, TimerKind};
use crate::node::NodeId;

/// Class names the runtime toggles on host elements.
pub mod class {
    /// Highlighted nav link, open menu/hamburger, open resume button, revealed section.
    pub const ACTIVE: &str = "active";
    /// Baseline applied to every section before its first reveal pass.
    pub const REVEAL: &str = "reveal";
    /// Open resume dropdown.
    pub const SHOW: &str = "show";
    /// Dark theme on the document body.
    pub const DARK_THEME: &str = "dark-theme";
    /// Focused project card.
    pub const FOCUSED: &str = "focused";
    /// Project card dimmed because another card is focused.
    pub const DIMMED: &str = "dimmed";
}

/// ARIA attribute mirrored from the navigation menu's open state.
pub const ARIA_EXPANDED: &str = "aria-expanded";

/// One host mutation or platform call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Add `class` to the element's class list.
    AddClass { target: NodeId, class: &'static str },
    /// Remove `class` from the element's class list.
    RemoveClass { target: NodeId, class: &'static str },
    /// Set an attribute on the element.
    SetAttribute {
        target: NodeId,
        name: &'static str,
        value: String,
    },
    /// Persist a preference through the storage capability.
    Persist { key: String, value: String },
    /// Fire [`crate::Signal::Timer`] with `timer` after `delay`.
    ScheduleTimer { timer: TimerKind, delay: Duration },
    /// Smoothly scroll the element's top edge into view.
    ScrollIntoView { target: NodeId },
    /// Suppress the browser's default action for the current event.
    PreventDefault,
    /// Stop the current event from reaching document-level listeners.
    StopPropagation,
    /// Initialize the email relay client once.
    InitRelay { public_key: String },
    /// Send the form's fields through the email relay.
    SendForm {
        form: NodeId,
        service_id: String,
        template_id: String,
    },
    /// Clear the form's fields.
    ResetForm { form: NodeId },
    /// Show a blocking notice to the user.
    Notify { message: String },
    /// No reaction listens for `kind` any more; the host may drop its listener.
    Release(SignalKind),
}

impl Effect {
    /// Whether this effect mutates class membership or attributes.
    #[must_use]
    pub const fn is_mutation(&self) -> bool {
        matches!(
            self,
            Self::AddClass { .. } | Self::RemoveClass { .. } | Self::SetAttribute { .. }
        )
    }
}

/// Ordered effect list built up while a signal is dispatched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Effects {
    list: Vec<Effect>,
}

impl Effects {
    /// Create an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an arbitrary effect.
    pub fn push(&mut self, effect: Effect) {
        self.list.push(effect);
    }

    pub fn add_class(&mut self, target: NodeId, class: &'static str) {
        self.list.push(Effect::AddClass { target, class });
    }

    pub fn remove_class(&mut self, target: NodeId, class: &'static str) {
        self.list.push(Effect::RemoveClass { target, class });
    }

    /// Add or remove `class` depending on `on`.
    pub fn set_class(&mut self, target: NodeId, class: &'static str, on: bool) {
        if on {
            self.add_class(target, class);
        } else {
            self.remove_class(target, class);
        }
    }

    pub fn set_attribute(&mut self, target: NodeId, name: &'static str, value: impl Into<String>) {
        self.list.push(Effect::SetAttribute {
            target,
            name,
            value: value.into(),
        });
    }

    /// Number of effects recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Borrow the recorded effects.
    #[must_use]
    pub fn as_slice(&self) -> &[Effect] {
        &self.list
    }

    /// Consume the list.
    #[must_use]
    pub fn into_vec(self) -> Vec<Effect> {
        self.list
    }
}

impl IntoIterator for Effects {
    type Item = Effect;
    type IntoIter = std::vec::IntoIter<Effect>;

    fn into_iter(self) -> Self::IntoIter {
        self.list.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn set_class_picks_add_or_remove() {
        let node = NodeId::new(1);
        let mut effects = Effects::new();
        effects.set_class(node, class::ACTIVE, true);
        effects.set_class(node, class::ACTIVE, false);
        assert_eq!(
            effects.into_vec(),
            vec![
                Effect::AddClass {
                    target: node,
                    class: "active"
                },
                Effect::RemoveClass {
                    target: node,
                    class: "active"
                },
            ]
        );
    }

    #[test]
    fn only_dom_writes_count_as_mutations() {
        let node = NodeId::new(2);
        assert!(
            Effect::SetAttribute {
                target: node,
                name: ARIA_EXPANDED,
                value: "true".into()
            }
            .is_mutation()
        );
        assert!(!Effect::PreventDefault.is_mutation());
        assert!(!Effect::Release(SignalKind::Load).is_mutation());
    }
}
