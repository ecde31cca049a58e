#![forbid(unsafe_code)]

//! One-shot section reveal.
//!
//! # State machines
//!
//! Per section: `pending → revealed`, one way, triggered when the section's
//! live top edge rises `reveal_margin` above the viewport bottom.
//!
//! Tracker: `Active → Retired`, one way, once every section is revealed.
//! Retirement is reported to the dispatch table as [`Flow::Retire`], which
//! unregisters the tracker from both its scroll-window and load triggers.
//! A retired tracker performs no measurements and emits no effects.

use std::collections::HashSet;

use folio_core::{Effects, LayoutProbe, NodeId, Signal, class};

use crate::context::PageContext;
use crate::dispatch::Flow;

/// Lifecycle of the whole tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerPhase {
    Active,
    Retired,
}

/// Reveals each section exactly once.
#[derive(Debug, Clone)]
pub struct RevealTracker {
    sections: Vec<NodeId>,
    revealed: HashSet<NodeId>,
    margin: f64,
    phase: TrackerPhase,
}

impl RevealTracker {
    /// Track `sections` in document order.
    #[must_use]
    pub fn new(sections: Vec<NodeId>, margin: f64) -> Self {
        Self {
            sections,
            revealed: HashSet::new(),
            margin,
            phase: TrackerPhase::Active,
        }
    }

    /// Mark every section pending so the first pass causes no layout shift.
    pub fn apply_baseline(&self, effects: &mut Effects) {
        for &section in &self.sections {
            effects.add_class(section, class::REVEAL);
        }
    }

    /// Reveal every pending section that has scrolled far enough into view.
    ///
    /// Returns the phase after the pass.
    pub fn evaluate(&mut self, probe: &dyn LayoutProbe, effects: &mut Effects) -> TrackerPhase {
        if self.phase == TrackerPhase::Retired {
            return TrackerPhase::Retired;
        }
        if self.is_complete() {
            self.retire();
            return self.phase;
        }

        let threshold = probe.viewport_height() - self.margin;
        for &section in &self.sections {
            if self.revealed.contains(&section) {
                continue;
            }
            let Some(top) = probe.client_top(section) else {
                continue;
            };
            if top < threshold {
                effects.add_class(section, class::ACTIVE);
                self.revealed.insert(section);
                tracing::debug!(
                    target: "folio.reveal",
                    section = %section,
                    top,
                    threshold,
                    "section revealed"
                );
            }
        }

        if self.is_complete() {
            self.retire();
        }
        self.phase
    }

    fn retire(&mut self) {
        self.phase = TrackerPhase::Retired;
        tracing::debug!(
            target: "folio.reveal",
            sections = self.sections.len(),
            "all sections revealed; tracker retired"
        );
    }

    #[must_use]
    pub fn phase(&self) -> TrackerPhase {
        self.phase
    }

    #[must_use]
    pub fn is_revealed(&self, section: NodeId) -> bool {
        self.revealed.contains(&section)
    }

    #[must_use]
    pub fn revealed_count(&self) -> usize {
        self.revealed.len()
    }

    #[must_use]
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.revealed.len() == self.sections.len()
    }
}

fn run(ctx: &mut PageContext, probe: &dyn LayoutProbe, effects: &mut Effects) -> Flow {
    match ctx.reveal.evaluate(probe, effects) {
        TrackerPhase::Active => Flow::Continue,
        TrackerPhase::Retired => Flow::Retire,
    }
}

/// `Timer(ScrollSync)`: reveal after the scroll window closes.
pub(crate) fn on_scroll_window(
    signal: &Signal,
    ctx: &mut PageContext,
    probe: &dyn LayoutProbe,
    effects: &mut Effects,
) -> Flow {
    if !super::is_scroll_window(signal) {
        return Flow::Continue;
    }
    run(ctx, probe, effects)
}

/// `Load`: unconditional first pass.
pub(crate) fn on_load(
    _signal: &Signal,
    ctx: &mut PageContext,
    probe: &dyn LayoutProbe,
    effects: &mut Effects,
) -> Flow {
    run(ctx, probe, effects)
}
