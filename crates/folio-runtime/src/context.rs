#![forbid(unsafe_code)]

//! The page's explicit state.
//!
//! Everything the reactions read or write lives in one [`PageContext`] owned
//! by the [`crate::Page`] controller and passed to each reaction by mutable
//! reference. There is no module-level mutable state anywhere in the runtime.

use folio_core::{NavLinkOutline, NodeId, RateLimiter};

use crate::config::PageConfig;
use crate::interaction::cards::CardFocus;
use crate::interaction::contact::ContactForm;
use crate::interaction::dropdown::ResumeDropdown;
use crate::interaction::menu::NavMenu;
use crate::interaction::theme::ThemeState;
use crate::scroll_sync::geometry_cache::GeometryCache;
use crate::scroll_sync::reveal::RevealTracker;

/// State shared by every reaction of one page.
#[derive(Debug, Clone)]
pub struct PageContext {
    pub(crate) config: PageConfig,
    /// Section geometry; written only by the resize reconciler.
    pub(crate) geometry: GeometryCache,
    /// Links inside the navigation menu, in document order.
    pub(crate) nav_links: Vec<NavLinkOutline>,
    /// Index into `geometry` chosen by the last resolver pass.
    pub(crate) active_section: Option<usize>,
    pub(crate) reveal: RevealTracker,
    pub(crate) scroll_limiter: RateLimiter,
    pub(crate) resize_limiter: RateLimiter,
    pub(crate) theme: ThemeState,
    pub(crate) menu: Option<NavMenu>,
    pub(crate) dropdown: Option<ResumeDropdown>,
    pub(crate) cards: Option<CardFocus>,
    pub(crate) contact: Option<ContactForm>,
}

impl PageContext {
    #[must_use]
    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    #[must_use]
    pub fn geometry(&self) -> &GeometryCache {
        &self.geometry
    }

    #[must_use]
    pub fn nav_links(&self) -> &[NavLinkOutline] {
        &self.nav_links
    }

    /// Id of the section chosen by the last resolver pass.
    #[must_use]
    pub fn active_section_id(&self) -> Option<&str> {
        self.active_section
            .and_then(|index| self.geometry.get(index))
            .and_then(|entry| entry.id.as_deref())
    }

    /// Node of the section chosen by the last resolver pass.
    #[must_use]
    pub fn active_section_node(&self) -> Option<NodeId> {
        self.active_section
            .and_then(|index| self.geometry.get(index))
            .map(|entry| entry.node)
    }

    #[must_use]
    pub fn reveal(&self) -> &RevealTracker {
        &self.reveal
    }

    #[must_use]
    pub fn scroll_limiter(&self) -> &RateLimiter {
        &self.scroll_limiter
    }

    #[must_use]
    pub fn resize_limiter(&self) -> &RateLimiter {
        &self.resize_limiter
    }

    #[must_use]
    pub fn theme(&self) -> &ThemeState {
        &self.theme
    }

    #[must_use]
    pub fn menu(&self) -> Option<&NavMenu> {
        self.menu.as_ref()
    }

    #[must_use]
    pub fn dropdown(&self) -> Option<&ResumeDropdown> {
        self.dropdown.as_ref()
    }

    #[must_use]
    pub fn cards(&self) -> Option<&CardFocus> {
        self.cards.as_ref()
    }

    #[must_use]
    pub fn contact(&self) -> Option<&ContactForm> {
        self.contact.as_ref()
    }
}
