#![forbid(unsafe_code)]

//! Core: signals, effects, geometry snapshots, and rate limiting.
//!
//! # Role in folio
//! `folio-core` is the vocabulary shared by the page runtime and every host.
//! It defines how the host names its elements ([`node::NodeId`]), which
//! browser signals reach the runtime ([`event::Signal`]), and which side
//! effects the runtime asks the host to perform ([`effect::Effect`]).
//!
//! # Primary responsibilities
//! - **Signals**: canonical scroll/resize/load/timer/click/key/submit inputs.
//! - **Effects**: class and attribute mutations, timers, persistence, relay calls.
//! - **Geometry**: section offset/height snapshots measured by the host.
//! - **RateLimiter**: trailing-edge coalescing of high-frequency signals.
//! - **Host capabilities**: the [`host::LayoutProbe`] and
//!   [`host::PreferenceStore`] traits.
//!
//! # How it fits in the system
//! The runtime (`folio-runtime`) consumes [`event::Signal`] values and
//! produces [`effect::Effect`] lists. Hosts (`folio-web` in the browser,
//! `folio-harness` in tests) own the real elements, apply effects, and fire
//! timers. Nothing in this crate touches a live page.

pub mod effect;
pub mod event;
pub mod geometry;
pub mod host;
pub mod node;
pub mod outline;
pub mod rate_limiter;

pub use effect::{Effect, Effects, class};
pub use event::{ClickSignal, Key, KeySignal, Signal, SignalKind, TimerKind};
pub use geometry::SectionGeometry;
pub use host::{LayoutProbe, PreferenceStore};
pub use node::NodeId;
pub use outline::{LinkRole, NavLinkOutline, PageOutline, SectionOutline};
pub use rate_limiter::{Admission, RateLimiter};
