#![forbid(unsafe_code)]

//! Signal-dispatch table.
//!
//! Each [`SignalKind`] maps to an ordered list of registered reactions. A
//! reaction is a plain function of `(signal, context, probe)` that appends
//! effects and returns a [`Flow`] telling the table what to do next:
//!
//! - [`Flow::Continue`]: run the next reaction for this signal.
//! - [`Flow::Halt`]: skip the remaining reactions for this signal (the
//!   host-side equivalent of stopping propagation).
//! - [`Flow::Retire`]: remove every registration of this reaction, for all
//!   signal kinds, once the current signal has been dispatched.
//!
//! Retirement is a table transition, not a listener side effect: when it
//! leaves a DOM-backed kind with no reactions, the table emits
//! [`Effect::Release`] so the host can drop its listener.

use std::collections::BTreeMap;

use folio_core::{Effect, Effects, LayoutProbe, Signal, SignalKind};

use crate::context::PageContext;

/// What the table does after a reaction returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Halt,
    Retire,
}

/// Stable identity of a reaction, shared by all its registrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReactionId {
    ScrollThrottle,
    ResizeThrottle,
    ScrollWindow,
    ActiveSection,
    Reveal,
    GeometryRefresh,
    Theme,
    Menu,
    Dropdown,
    SmoothScroll,
    CardFocus,
    ContactForm,
}

/// Signature every reaction implements.
pub type ReactionFn = fn(&Signal, &mut PageContext, &dyn LayoutProbe, &mut Effects) -> Flow;

/// One entry in a signal's reaction list.
#[derive(Debug, Clone, Copy)]
pub struct Registration {
    pub id: ReactionId,
    /// Label used in trace output.
    pub label: &'static str,
    pub run: ReactionFn,
}

/// Ordered reaction lists keyed by signal kind.
#[derive(Debug, Clone, Default)]
pub struct DispatchTable {
    routes: BTreeMap<SignalKind, Vec<Registration>>,
    reactions_run: u64,
}

impl DispatchTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a reaction to `kind`'s list.
    pub fn register(
        &mut self,
        kind: SignalKind,
        id: ReactionId,
        label: &'static str,
        run: ReactionFn,
    ) {
        self.routes
            .entry(kind)
            .or_default()
            .push(Registration { id, label, run });
    }

    /// Remove every registration of `id`.
    ///
    /// Returns the kinds that were left without any reaction.
    pub fn retire(&mut self, id: ReactionId) -> Vec<SignalKind> {
        let mut emptied = Vec::new();
        for (kind, list) in &mut self.routes {
            let before = list.len();
            list.retain(|registration| registration.id != id);
            if before != list.len() && list.is_empty() {
                emptied.push(*kind);
            }
        }
        self.routes.retain(|_, list| !list.is_empty());
        emptied
    }

    /// Whether any reaction listens for `kind`.
    #[must_use]
    pub fn is_subscribed(&self, kind: SignalKind) -> bool {
        self.routes.get(&kind).is_some_and(|list| !list.is_empty())
    }

    /// Whether `id` is still registered anywhere.
    #[must_use]
    pub fn contains(&self, id: ReactionId) -> bool {
        self.routes
            .values()
            .any(|list| list.iter().any(|registration| registration.id == id))
    }

    /// Kinds with at least one reaction, in table order.
    #[must_use]
    pub fn subscribed_kinds(&self) -> Vec<SignalKind> {
        self.routes.keys().copied().collect()
    }

    /// Labels registered for `kind`, in dispatch order.
    #[must_use]
    pub fn labels(&self, kind: SignalKind) -> Vec<&'static str> {
        self.routes
            .get(&kind)
            .map(|list| list.iter().map(|r| r.label).collect())
            .unwrap_or_default()
    }

    /// Reactions executed since creation.
    #[must_use]
    pub const fn reactions_run(&self) -> u64 {
        self.reactions_run
    }

    /// Run `signal` through its reaction list.
    pub fn dispatch(
        &mut self,
        signal: &Signal,
        ctx: &mut PageContext,
        probe: &dyn LayoutProbe,
    ) -> Effects {
        let kind = signal.kind();
        let mut effects = Effects::new();
        let mut retiring = Vec::new();
        let mut ran = 0u64;

        let span = tracing::debug_span!(
            "folio.dispatch",
            signal = kind.label(),
            reactions = tracing::field::Empty,
        );
        let _guard = span.enter();

        if let Some(list) = self.routes.get(&kind) {
            for registration in list {
                ran += 1;
                let flow = (registration.run)(signal, ctx, probe, &mut effects);
                tracing::trace!(
                    target: "folio.dispatch",
                    reaction = registration.label,
                    flow = ?flow,
                    "reaction ran"
                );
                match flow {
                    Flow::Continue => {}
                    Flow::Halt => break,
                    Flow::Retire => retiring.push(registration.id),
                }
            }
        }
        span.record("reactions", ran);
        self.reactions_run = self.reactions_run.saturating_add(ran);

        for id in retiring {
            for emptied in self.retire(id) {
                tracing::debug!(
                    target: "folio.dispatch",
                    reaction = ?id,
                    signal = emptied.label(),
                    "last reaction retired"
                );
                if emptied.dom_event().is_some() {
                    effects.push(Effect::Release(emptied));
                }
            }
        }

        effects
    }
}
