#![forbid(unsafe_code)]

//! A mounted page driven by a fake host.
//!
//! [`PageSession`] wires a [`folio_runtime::Page`] to a [`FakePage`] the way
//! the browser host does: signals are delivered only while the host still
//! listens for their kind, effects are applied immediately after each
//! dispatch, and timers fire when the virtual clock advances.

use core::time::Duration;

use folio_core::{
    ClickSignal, Effect, Key, KeySignal, NodeId, PageOutline, Signal, TimerKind,
};
use folio_runtime::{Page, PageConfig, PageConfigError};

use crate::fake_page::FakePage;

/// Page plus host, advanced in virtual time.
#[derive(Debug)]
pub struct PageSession {
    page: Page,
    host: FakePage,
    dispatched: u64,
}

impl PageSession {
    /// Mount `outline` on `host` and apply the mount effects.
    pub fn mount(
        outline: &PageOutline,
        config: PageConfig,
        mut host: FakePage,
    ) -> Result<Self, PageConfigError> {
        let (page, effects) = Page::mount(outline, config, &host, host.preferences())?;
        host.apply(effects);
        Ok(Self {
            page,
            host,
            dispatched: 0,
        })
    }

    #[must_use]
    pub fn page(&self) -> &Page {
        &self.page
    }

    #[must_use]
    pub fn host(&self) -> &FakePage {
        &self.host
    }

    /// Mutable host access for changing layout between signals.
    pub fn host_mut(&mut self) -> &mut FakePage {
        &mut self.host
    }

    /// Signals actually dispatched to the page.
    #[must_use]
    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }

    /// Deliver one signal and apply its effects.
    ///
    /// Returns the effects, or an empty list when the host no longer listens
    /// for the signal's kind.
    pub fn send(&mut self, signal: Signal) -> Vec<Effect> {
        if !self.host.is_listening(signal.kind()) {
            return Vec::new();
        }
        self.dispatched += 1;
        let effects = self.page.dispatch(&signal, &self.host);
        self.host.apply(effects.clone());
        effects
    }

    pub fn load(&mut self) -> Vec<Effect> {
        self.send(Signal::Load)
    }

    /// Move the window and emit one scroll signal.
    pub fn scroll_to(&mut self, scroll_y: f64) -> Vec<Effect> {
        self.host.set_scroll_y(scroll_y);
        self.send(Signal::Scroll)
    }

    pub fn resize(&mut self) -> Vec<Effect> {
        self.send(Signal::Resize)
    }

    pub fn click(&mut self, path: impl Into<Vec<NodeId>>) -> Vec<Effect> {
        self.send(Signal::Click(ClickSignal::new(path)))
    }

    pub fn click_anchor(&mut self, path: impl Into<Vec<NodeId>>) -> Vec<Effect> {
        self.send(Signal::Click(ClickSignal::new(path).on_anchor()))
    }

    pub fn key(&mut self, key: Key, path: impl Into<Vec<NodeId>>) -> Vec<Effect> {
        self.send(Signal::KeyDown(KeySignal::new(key).at(path)))
    }

    pub fn submit(&mut self, form: NodeId) -> Vec<Effect> {
        self.send(Signal::Submit { form })
    }

    /// Report how the relay settled the last send.
    pub fn relay_settles(&mut self, outcome: Result<(), String>) -> Vec<Effect> {
        self.send(Signal::RelayOutcome(outcome))
    }

    /// Advance virtual time by `by`, firing every timer that falls due.
    ///
    /// Returns the timers fired, in order.
    pub fn advance(&mut self, by: Duration) -> Vec<TimerKind> {
        let deadline = self.host.clock().now() + by;
        let mut fired = Vec::new();
        while let Some(timer) = self.host.clock_mut().pop_due(deadline) {
            fired.push(timer);
            self.send(Signal::Timer(timer));
        }
        self.host.clock_mut().set_now(deadline);
        fired
    }

    pub fn advance_ms(&mut self, ms: u64) -> Vec<TimerKind> {
        self.advance(Duration::from_millis(ms))
    }
}
