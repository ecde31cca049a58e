#![forbid(unsafe_code)]

//! Deterministic test host for the folio page runtime.
//!
//! # Role in folio
//! Tests drive a real [`folio_runtime::Page`] against a [`FakePage`]: a
//! layout table, class/attribute maps, in-memory preferences, a
//! [`VirtualClock`] standing in for `setTimeout`, and recorders for relay
//! calls and notices. Nothing here touches a browser.
//!
//! # Example
//! ```ignore
//! let mut session = PageSession::mount(&portfolio_outline(), PageConfig::default(), portfolio_host())?;
//! session.scroll_to(550.0);
//! session.advance_ms(50);
//! assert!(session.host().has_class(LINK_ABOUT, "active"));
//! ```

pub mod clock;
pub mod fake_page;
pub mod fixture;
pub mod session;

pub use clock::VirtualClock;
pub use fake_page::{FakePage, MemoryPreferences, RelaySend};
pub use session::PageSession;
