#![forbid(unsafe_code)]

//! In-memory page host.
//!
//! [`FakePage`] plays the browser: it answers layout queries from a table of
//! section geometry, applies effects to class and attribute maps, stores
//! preferences, queues timers on a [`VirtualClock`], and records every relay
//! call and notice so tests can assert on them.
//!
//! # Layout model
//!
//! `measure(node)` returns the node's document geometry. `client_top(node)`
//! is `offset_top - scroll_y` unless a test pins it with
//! [`FakePage::pin_client_top`]. Every layout query bumps
//! [`FakePage::layout_queries`].
//!
//! # JSONL transcript
//!
//! ```json
//! {"event":"effect","at_ms":50,"kind":"add_class","target":3,"class":"active"}
//! {"event":"effect","at_ms":50,"kind":"schedule_timer","timer":"scroll_sync","delay_ms":50}
//! ```

use std::cell::Cell;
use std::collections::{BTreeSet, HashMap};

use folio_core::{Effect, LayoutProbe, NodeId, PreferenceStore, SectionGeometry, SignalKind};
use serde_json::{Value, json};

use crate::clock::VirtualClock;

/// `localStorage` stand-in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryPreferences {
    values: HashMap<String, String>,
}

impl MemoryPreferences {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.set(key, value);
        self
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_owned(), value.to_owned());
    }
}

/// One `SendForm` the host performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelaySend {
    pub form: NodeId,
    pub service_id: String,
    pub template_id: String,
}

/// A fake browser page.
#[derive(Debug, Default)]
pub struct FakePage {
    scroll_y: f64,
    viewport_height: f64,
    layout: HashMap<NodeId, SectionGeometry>,
    pinned_tops: HashMap<NodeId, f64>,
    queries: Cell<u64>,
    classes: HashMap<NodeId, BTreeSet<&'static str>>,
    attributes: HashMap<(NodeId, &'static str), String>,
    prefs: MemoryPreferences,
    clock: VirtualClock,
    released: BTreeSet<SignalKind>,
    relay_key: Option<String>,
    sends: Vec<RelaySend>,
    notices: Vec<String>,
    scrolled_to: Vec<NodeId>,
    resets: Vec<NodeId>,
    prevented: u32,
    stopped: u32,
    mutations: u64,
    transcript: Vec<Value>,
}

impl FakePage {
    /// A page scrolled to the top of a viewport `viewport_height` tall.
    #[must_use]
    pub fn new(viewport_height: f64) -> Self {
        Self {
            viewport_height,
            ..Self::default()
        }
    }

    /// Lay out `node` at `offset_top` with `height`.
    #[must_use]
    pub fn with_section(mut self, node: NodeId, offset_top: f64, height: f64) -> Self {
        self.set_layout(node, SectionGeometry::new(offset_top, height));
        self
    }

    #[must_use]
    pub fn with_preferences(mut self, prefs: MemoryPreferences) -> Self {
        self.prefs = prefs;
        self
    }

    pub fn set_layout(&mut self, node: NodeId, geometry: SectionGeometry) {
        self.layout.insert(node, geometry);
    }

    /// Forget a node's layout, as if it were detached.
    pub fn remove_layout(&mut self, node: NodeId) {
        self.layout.remove(&node);
    }

    pub fn set_scroll_y(&mut self, scroll_y: f64) {
        self.scroll_y = scroll_y;
    }

    pub fn set_viewport_height(&mut self, viewport_height: f64) {
        self.viewport_height = viewport_height;
    }

    /// Force `client_top(node)` regardless of scroll position.
    pub fn pin_client_top(&mut self, node: NodeId, top: f64) {
        self.pinned_tops.insert(node, top);
    }

    // ── Inspection ──

    #[must_use]
    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.classes
            .get(&node)
            .is_some_and(|set| set.contains(class))
    }

    /// Nodes currently carrying `class`, sorted.
    #[must_use]
    pub fn nodes_with_class(&self, class: &str) -> Vec<NodeId> {
        let mut nodes: Vec<NodeId> = self
            .classes
            .iter()
            .filter(|(_, set)| set.contains(class))
            .map(|(node, _)| *node)
            .collect();
        nodes.sort();
        nodes
    }

    #[must_use]
    pub fn attribute(&self, node: NodeId, name: &'static str) -> Option<&str> {
        self.attributes.get(&(node, name)).map(String::as_str)
    }

    #[must_use]
    pub fn preferences(&self) -> &MemoryPreferences {
        &self.prefs
    }

    #[must_use]
    pub fn clock(&self) -> &VirtualClock {
        &self.clock
    }

    pub(crate) fn clock_mut(&mut self) -> &mut VirtualClock {
        &mut self.clock
    }

    /// Whether the host still delivers `kind`.
    #[must_use]
    pub fn is_listening(&self, kind: SignalKind) -> bool {
        !self.released.contains(&kind)
    }

    #[must_use]
    pub fn released(&self) -> Vec<SignalKind> {
        self.released.iter().copied().collect()
    }

    /// Layout queries answered so far.
    #[must_use]
    pub fn layout_queries(&self) -> u64 {
        self.queries.get()
    }

    /// Class and attribute mutations applied so far.
    #[must_use]
    pub fn mutations(&self) -> u64 {
        self.mutations
    }

    #[must_use]
    pub fn relay_key(&self) -> Option<&str> {
        self.relay_key.as_deref()
    }

    #[must_use]
    pub fn relay_sends(&self) -> &[RelaySend] {
        &self.sends
    }

    #[must_use]
    pub fn notices(&self) -> &[String] {
        &self.notices
    }

    #[must_use]
    pub fn scrolled_to(&self) -> &[NodeId] {
        &self.scrolled_to
    }

    #[must_use]
    pub fn reset_forms(&self) -> &[NodeId] {
        &self.resets
    }

    /// Default actions suppressed so far.
    #[must_use]
    pub fn prevented_defaults(&self) -> u32 {
        self.prevented
    }

    #[must_use]
    pub fn stopped_propagations(&self) -> u32 {
        self.stopped
    }

    /// Applied effects, one JSON object per line.
    #[must_use]
    pub fn transcript_jsonl(&self) -> String {
        self.transcript
            .iter()
            .map(Value::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    // ── Effects ──

    /// Apply effects in order.
    pub fn apply(&mut self, effects: impl IntoIterator<Item = Effect>) {
        for effect in effects {
            self.record(&effect);
            if effect.is_mutation() {
                self.mutations += 1;
            }
            self.apply_one(effect);
        }
    }

    fn apply_one(&mut self, effect: Effect) {
        match effect {
            Effect::AddClass { target, class } => {
                self.classes.entry(target).or_default().insert(class);
            }
            Effect::RemoveClass { target, class } => {
                if let Some(set) = self.classes.get_mut(&target) {
                    set.remove(class);
                }
            }
            Effect::SetAttribute {
                target,
                name,
                value,
            } => {
                self.attributes.insert((target, name), value);
            }
            Effect::Persist { key, value } => self.prefs.set(&key, &value),
            Effect::ScheduleTimer { timer, delay } => self.clock.schedule(timer, delay),
            Effect::ScrollIntoView { target } => self.scrolled_to.push(target),
            Effect::PreventDefault => self.prevented += 1,
            Effect::StopPropagation => self.stopped += 1,
            Effect::InitRelay { public_key } => self.relay_key = Some(public_key),
            Effect::SendForm {
                form,
                service_id,
                template_id,
            } => self.sends.push(RelaySend {
                form,
                service_id,
                template_id,
            }),
            Effect::ResetForm { form } => self.resets.push(form),
            Effect::Notify { message } => self.notices.push(message),
            Effect::Release(kind) => {
                tracing::debug!(target: "folio.harness", signal = kind.label(), "listener released");
                self.released.insert(kind);
            }
        }
    }

    fn record(&mut self, effect: &Effect) {
        let at_ms = self.clock.now().as_millis() as u64;
        let entry = match effect {
            Effect::AddClass { target, class } => {
                json!({"event":"effect","at_ms":at_ms,"kind":"add_class","target":target.get(),"class":class})
            }
            Effect::RemoveClass { target, class } => {
                json!({"event":"effect","at_ms":at_ms,"kind":"remove_class","target":target.get(),"class":class})
            }
            Effect::SetAttribute {
                target,
                name,
                value,
            } => {
                json!({"event":"effect","at_ms":at_ms,"kind":"set_attribute","target":target.get(),"name":name,"value":value})
            }
            Effect::Persist { key, value } => {
                json!({"event":"effect","at_ms":at_ms,"kind":"persist","key":key,"value":value})
            }
            Effect::ScheduleTimer { timer, delay } => {
                json!({"event":"effect","at_ms":at_ms,"kind":"schedule_timer","timer":timer.label(),"delay_ms":delay.as_millis() as u64})
            }
            Effect::ScrollIntoView { target } => {
                json!({"event":"effect","at_ms":at_ms,"kind":"scroll_into_view","target":target.get()})
            }
            Effect::PreventDefault => json!({"event":"effect","at_ms":at_ms,"kind":"prevent_default"}),
            Effect::StopPropagation => json!({"event":"effect","at_ms":at_ms,"kind":"stop_propagation"}),
            Effect::InitRelay { .. } => json!({"event":"effect","at_ms":at_ms,"kind":"init_relay"}),
            Effect::SendForm { form, .. } => {
                json!({"event":"effect","at_ms":at_ms,"kind":"send_form","form":form.get()})
            }
            Effect::ResetForm { form } => {
                json!({"event":"effect","at_ms":at_ms,"kind":"reset_form","form":form.get()})
            }
            Effect::Notify { message } => {
                json!({"event":"effect","at_ms":at_ms,"kind":"notify","message":message})
            }
            Effect::Release(kind) => {
                json!({"event":"effect","at_ms":at_ms,"kind":"release","signal":kind.label()})
            }
        };
        self.transcript.push(entry);
    }
}

impl LayoutProbe for FakePage {
    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    fn measure(&self, node: NodeId) -> Option<SectionGeometry> {
        self.queries.set(self.queries.get() + 1);
        self.layout.get(&node).copied()
    }

    fn client_top(&self, node: NodeId) -> Option<f64> {
        self.queries.set(self.queries.get() + 1);
        if let Some(top) = self.pinned_tops.get(&node) {
            return Some(*top);
        }
        self.layout
            .get(&node)
            .map(|geometry| geometry.offset_top - self.scroll_y)
    }
}
