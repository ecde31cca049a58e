#![forbid(unsafe_code)]

//! Canonical page signals.
//!
//! Hosts translate browser events into [`Signal`] values and hand them to the
//! runtime one at a time. Every signal is handled to completion before the
//! next one is dispatched; there is no concurrency between signals.
//!
//! # Design Notes
//!
//! - Click and key signals carry the registered ancestors of the event
//!   target (`path`), innermost first. "Is the target inside X" questions are
//!   answered from that path instead of querying the live page.
//! - Timers are signals too: the host fires [`Signal::Timer`] when a delay
//!   requested through an effect elapses.

use crate::node::NodeId;

/// Which rate-limited handler a timer belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Scroll-driven highlighting and reveal.
    ScrollSync,
    /// Resize-driven geometry refresh.
    GeometryRefresh,
}

impl TimerKind {
    /// Stable label for logs and host bookkeeping.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ScrollSync => "scroll_sync",
            Self::GeometryRefresh => "geometry_refresh",
        }
    }
}

/// Dispatch key for a [`Signal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SignalKind {
    Scroll,
    Resize,
    Load,
    Timer,
    Click,
    KeyDown,
    Submit,
    RelayOutcome,
}

impl SignalKind {
    /// Every kind, in dispatch-table order.
    pub const ALL: [SignalKind; 8] = [
        Self::Scroll,
        Self::Resize,
        Self::Load,
        Self::Timer,
        Self::Click,
        Self::KeyDown,
        Self::Submit,
        Self::RelayOutcome,
    ];

    /// Whether handlers for this kind promise not to block default scrolling.
    #[must_use]
    pub const fn is_passive(self) -> bool {
        matches!(self, Self::Scroll | Self::Resize)
    }

    /// DOM event type the host listens for, if the kind maps to one.
    #[must_use]
    pub const fn dom_event(self) -> Option<&'static str> {
        match self {
            Self::Scroll => Some("scroll"),
            Self::Resize => Some("resize"),
            Self::Load => Some("load"),
            Self::Click => Some("click"),
            Self::KeyDown => Some("keydown"),
            Self::Submit => Some("submit"),
            Self::Timer | Self::RelayOutcome => None,
        }
    }

    /// Stable label for logs.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Scroll => "scroll",
            Self::Resize => "resize",
            Self::Load => "load",
            Self::Timer => "timer",
            Self::Click => "click",
            Self::KeyDown => "keydown",
            Self::Submit => "submit",
            Self::RelayOutcome => "relay_outcome",
        }
    }
}

/// Keys the runtime reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Enter,
    Space,
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value.
    #[must_use]
    pub fn from_dom(key: &str) -> Self {
        match key {
            "Escape" | "Esc" => Self::Escape,
            "Enter" => Self::Enter,
            " " | "Spacebar" => Self::Space,
            _ => Self::Other,
        }
    }

    /// Whether the key activates a focusable control.
    #[must_use]
    pub const fn is_activation(self) -> bool {
        matches!(self, Self::Enter | Self::Space)
    }
}

/// A click anywhere on the document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClickSignal {
    /// Registered elements containing the click target, innermost first.
    pub path: Vec<NodeId>,
    /// The click target itself is an `<a>` element.
    pub target_is_anchor: bool,
}

impl ClickSignal {
    /// Create a click whose target sits inside `path`.
    #[must_use]
    pub fn new(path: impl Into<Vec<NodeId>>) -> Self {
        Self {
            path: path.into(),
            target_is_anchor: false,
        }
    }

    /// Mark the click target as an anchor.
    #[must_use]
    pub fn on_anchor(mut self) -> Self {
        self.target_is_anchor = true;
        self
    }

    /// Whether `node` contains (or is) the click target.
    #[must_use]
    pub fn within(&self, node: NodeId) -> bool {
        self.path.contains(&node)
    }

    /// First element of `candidates` containing the click target.
    #[must_use]
    pub fn closest(&self, candidates: &[NodeId]) -> Option<NodeId> {
        self.path.iter().copied().find(|n| candidates.contains(n))
    }
}

/// A key press delivered to the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySignal {
    pub key: Key,
    /// Registered elements containing the focused target, innermost first.
    pub path: Vec<NodeId>,
}

impl KeySignal {
    /// Create a key signal with an empty target path.
    #[must_use]
    pub fn new(key: Key) -> Self {
        Self {
            key,
            path: Vec::new(),
        }
    }

    /// Attach the target path.
    #[must_use]
    pub fn at(mut self, path: impl Into<Vec<NodeId>>) -> Self {
        self.path = path.into();
        self
    }

    /// First element of `candidates` containing the key target.
    #[must_use]
    pub fn closest(&self, candidates: &[NodeId]) -> Option<NodeId> {
        self.path.iter().copied().find(|n| candidates.contains(n))
    }
}

/// Canonical page signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    /// The window scrolled.
    Scroll,
    /// The viewport changed size.
    Resize,
    /// The page finished loading.
    Load,
    /// A delay requested through [`crate::Effect::ScheduleTimer`] elapsed.
    Timer(TimerKind),
    Click(ClickSignal),
    KeyDown(KeySignal),
    /// A form was submitted.
    Submit { form: NodeId },
    /// The email relay settled a previous send; `Err` carries diagnostic detail.
    RelayOutcome(Result<(), String>),
}

impl Signal {
    /// Dispatch key for this signal.
    #[must_use]
    pub const fn kind(&self) -> SignalKind {
        match self {
            Self::Scroll => SignalKind::Scroll,
            Self::Resize => SignalKind::Resize,
            Self::Load => SignalKind::Load,
            Self::Timer(_) => SignalKind::Timer,
            Self::Click(_) => SignalKind::Click,
            Self::KeyDown(_) => SignalKind::KeyDown,
            Self::Submit { .. } => SignalKind::Submit,
            Self::RelayOutcome(_) => SignalKind::RelayOutcome,
        }
    }
}
