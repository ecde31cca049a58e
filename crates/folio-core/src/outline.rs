#![forbid(unsafe_code)]

//! The page structure a host discovers once at startup.
//!
//! The outline is fixed for the life of the page: sections, links, and
//! optional controls are never added or removed afterwards. Every optional
//! control is an `Option`; a missing control means its feature is simply
//! not wired.

use bitflags::bitflags;

use crate::node::NodeId;

bitflags! {
    /// Special roles a navigation link can play.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct LinkRole: u8 {
        /// The link is the resume dropdown's toggle button.
        const RESUME_BUTTON = 0b0001;
        /// The link is an entry inside the resume dropdown.
        const DROPDOWN_ITEM = 0b0010;
    }
}

/// One page section, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionOutline {
    pub node: NodeId,
    /// The section's `id` attribute, if any.
    pub id: Option<String>,
}

impl SectionOutline {
    #[must_use]
    pub fn new(node: NodeId, id: impl Into<String>) -> Self {
        Self {
            node,
            id: Some(id.into()),
        }
    }

    /// A section without an `id` attribute.
    #[must_use]
    pub const fn anonymous(node: NodeId) -> Self {
        Self { node, id: None }
    }
}

/// A link inside the navigation menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLinkOutline {
    pub node: NodeId,
    /// Raw `href` attribute.
    pub href: String,
    pub role: LinkRole,
    /// Element the fragment resolves to, when `href` is `#id` and the id exists.
    pub target: Option<NodeId>,
}

impl NavLinkOutline {
    #[must_use]
    pub fn new(node: NodeId, href: impl Into<String>) -> Self {
        Self {
            node,
            href: href.into(),
            role: LinkRole::empty(),
            target: None,
        }
    }

    #[must_use]
    pub fn with_role(mut self, role: LinkRole) -> Self {
        self.role = role;
        self
    }

    #[must_use]
    pub fn targeting(mut self, target: NodeId) -> Self {
        self.target = Some(target);
        self
    }

    /// Whether the link points inside the page (`href` starts with `#`).
    #[must_use]
    pub fn is_internal(&self) -> bool {
        self.href.starts_with('#')
    }

    /// The id the link points at, without the leading `#`.
    #[must_use]
    pub fn fragment(&self) -> Option<&str> {
        self.href.strip_prefix('#')
    }

    /// Whether the link highlights for the section named `id`.
    #[must_use]
    pub fn points_at(&self, id: &str) -> bool {
        self.fragment() == Some(id)
    }
}

/// Everything the runtime needs to know about the page's structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOutline {
    /// The document body, carrier of the theme class.
    pub body: NodeId,
    /// Sections in document order.
    pub sections: Vec<SectionOutline>,
    /// Links inside the navigation menu, in document order.
    pub nav_links: Vec<NavLinkOutline>,
    pub theme_toggle: Option<NodeId>,
    pub hamburger: Option<NodeId>,
    pub nav_menu: Option<NodeId>,
    pub resume_button: Option<NodeId>,
    pub resume_dropdown: Option<NodeId>,
    /// Entries inside the resume dropdown.
    pub dropdown_items: Vec<NodeId>,
    pub project_cards: Vec<NodeId>,
    pub contact_form: Option<NodeId>,
}

impl PageOutline {
    /// An outline with only a body and nothing to wire.
    #[must_use]
    pub fn new(body: NodeId) -> Self {
        Self {
            body,
            sections: Vec::new(),
            nav_links: Vec::new(),
            theme_toggle: None,
            hamburger: None,
            nav_menu: None,
            resume_button: None,
            resume_dropdown: None,
            dropdown_items: Vec::new(),
            project_cards: Vec::new(),
            contact_form: None,
        }
    }

    /// Resolve `#id` to a registered section.
    #[must_use]
    pub fn section_by_id(&self, id: &str) -> Option<NodeId> {
        self.sections
            .iter()
            .find(|s| s.id.as_deref() == Some(id))
            .map(|s| s.node)
    }
}
