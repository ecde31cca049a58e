#![forbid(unsafe_code)]

//! Browser host for the folio page runtime.
//!
//! # Role in folio
//! `folio-web` binds [`folio_runtime::Page`] to a live document. On `wasm32`
//! it exports `PortfolioPage`, which discovers the page, registers the
//! listeners the runtime subscribes to, and applies every returned effect to
//! real elements.
//!
//! The discovery and element-registry logic is generic over the element
//! handle and tested natively; only the thin DOM adapter is `wasm32`-only.
//!
//! ```js
//! import init, { PortfolioPage } from "./pkg/folio_web.js";
//! await init();
//! const page = new PortfolioPage(JSON.stringify({ relay: { public_key: "pk", service_id: "s", template_id: "t" } }));
//! ```

pub mod discover;
pub mod error;
pub mod redeliver;
pub mod registry;

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::PortfolioPage;

pub use discover::{Discovered, FoundLink, parse_config};
pub use error::WebHostError;
pub use redeliver::must_redeliver;
pub use registry::ElementRegistry;
