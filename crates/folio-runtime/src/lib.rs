#![forbid(unsafe_code)]

//! Runtime: the page controller and its reactions.
//!
//! # Role in folio
//! `folio-runtime` owns everything the portfolio page does in response to
//! browser signals. It is host-independent: hosts describe the page once as a
//! [`folio_core::PageOutline`], then feed signals to [`Page::dispatch`] and
//! apply the returned [`folio_core::Effect`] lists.
//!
//! # Primary responsibilities
//! - **PageContext**: the single explicit state object shared by reactions.
//! - **DispatchTable**: ordered, retirable reactions per signal kind.
//! - **Scroll sync**: geometry cache, active-section resolver, one-shot
//!   reveal tracker, resize reconciler, all behind trailing-edge limiters.
//! - **Interactions**: theme, navigation menu, resume dropdown, smooth
//!   scrolling, project card focus, contact form.
//! - **PageConfig**: tunables with TOML/JSON loading (`page-config` feature).
//!
//! # Example
//! ```ignore
//! let (mut page, initial) = Page::mount(&outline, PageConfig::default(), &probe, &prefs)?;
//! host.apply(initial);
//! let effects = page.dispatch(&Signal::Scroll, &probe);
//! host.apply(effects);
//! ```

pub mod config;
pub mod context;
pub mod dispatch;
pub mod interaction;
pub mod page;
pub mod scroll_sync;

pub use config::{NoticeConfig, PageConfig, PageConfigError, RelayConfig};
pub use context::PageContext;
pub use dispatch::{DispatchTable, Flow, ReactionFn, ReactionId, Registration};
pub use interaction::theme::Theme;
pub use page::Page;
pub use scroll_sync::geometry_cache::{CachedSection, GeometryCache};
pub use scroll_sync::reveal::{RevealTracker, TrackerPhase};
