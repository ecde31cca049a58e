#![forbid(unsafe_code)]

//! Page discovery: from found elements to a [`PageOutline`].
//!
//! The `wasm32` host runs the selector queries below once at startup and
//! hands the raw results to [`Discovered::into_outline`], which registers
//! every element and resolves link roles and fragment targets. Keeping the
//! second half generic lets native tests cover it with plain string handles.

use folio_core::{LinkRole, NavLinkOutline, PageOutline, SectionOutline};
use folio_runtime::{PageConfig, PageConfigError};

use crate::registry::ElementRegistry;

/// Selectors and ids the stock page markup uses.
pub mod selector {
    pub const SECTIONS: &str = "section";
    pub const NAV_LINKS: &str = ".nav-menu a";
    pub const DROPDOWN_ITEMS: &str = ".dropdown-item";
    pub const PROJECT_CARDS: &str = ".project-card";

    pub const THEME_TOGGLE_ID: &str = "themeToggle";
    pub const HAMBURGER_ID: &str = "hamburger";
    pub const NAV_MENU_ID: &str = "navMenu";
    pub const RESUME_BUTTON_ID: &str = "resumeBtn";
    pub const RESUME_DROPDOWN_ID: &str = "resumeDropdown";
    pub const CONTACT_FORM_ID: &str = "contactForm";

    /// Class marking entries of the resume dropdown.
    pub const DROPDOWN_ITEM_CLASS: &str = "dropdown-item";
}

/// A navigation link as found in the markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundLink<E> {
    pub element: E,
    /// Raw `href` attribute; absent attributes read as empty.
    pub href: String,
    pub id: String,
    /// Raw `class` attribute.
    pub classes: String,
    /// Element whose id the fragment names, for `#id` hrefs. Any element
    /// qualifies, not only sections.
    pub target: Option<E>,
}

/// Raw query results, before registration.
#[derive(Debug, Clone)]
pub struct Discovered<E> {
    pub body: E,
    /// `section` elements with their raw `id` attribute.
    pub sections: Vec<(E, String)>,
    pub nav_links: Vec<FoundLink<E>>,
    pub theme_toggle: Option<E>,
    pub hamburger: Option<E>,
    pub nav_menu: Option<E>,
    pub resume_button: Option<E>,
    pub resume_dropdown: Option<E>,
    pub dropdown_items: Vec<E>,
    pub project_cards: Vec<E>,
    pub contact_form: Option<E>,
}

impl<E: PartialEq> Discovered<E> {
    /// An empty page with only a body.
    pub fn new(body: E) -> Self {
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

    /// Register every element and build the outline.
    ///
    /// A link without a found target falls back to the section carrying the
    /// fragment's id.
    pub fn into_outline(self, registry: &mut ElementRegistry<E>) -> PageOutline {
        let mut outline = PageOutline::new(registry.register(self.body));

        outline.sections = self
            .sections
            .into_iter()
            .map(|(element, raw_id)| {
                let node = registry.register(element);
                match section_id(&raw_id) {
                    Some(id) => SectionOutline::new(node, id),
                    None => SectionOutline::anonymous(node),
                }
            })
            .collect();

        let mut nav_links = Vec::with_capacity(self.nav_links.len());
        for found in self.nav_links {
            let node = registry.register(found.element);
            let mut link = NavLinkOutline::new(node, found.href.as_str())
                .with_role(link_role(&found.classes, &found.id));
            let target = match found.target {
                Some(element) => Some(registry.register(element)),
                None => fragment_target(&found.href).and_then(|id| outline.section_by_id(id)),
            };
            if let Some(target) = target {
                link = link.targeting(target);
            }
            nav_links.push(link);
        }
        outline.nav_links = nav_links;

        outline.theme_toggle = self.theme_toggle.map(|e| registry.register(e));
        outline.hamburger = self.hamburger.map(|e| registry.register(e));
        outline.nav_menu = self.nav_menu.map(|e| registry.register(e));
        outline.resume_button = self.resume_button.map(|e| registry.register(e));
        outline.resume_dropdown = self.resume_dropdown.map(|e| registry.register(e));
        outline.dropdown_items = self
            .dropdown_items
            .into_iter()
            .map(|e| registry.register(e))
            .collect();
        outline.project_cards = self
            .project_cards
            .into_iter()
            .map(|e| registry.register(e))
            .collect();
        outline.contact_form = self.contact_form.map(|e| registry.register(e));
        outline
    }
}

/// Role of a nav link given its `class` and `id` attributes.
#[must_use]
pub fn link_role(classes: &str, id: &str) -> LinkRole {
    let mut role = LinkRole::empty();
    if id == selector::RESUME_BUTTON_ID {
        role |= LinkRole::RESUME_BUTTON;
    }
    if classes
        .split_ascii_whitespace()
        .any(|c| c == selector::DROPDOWN_ITEM_CLASS)
    {
        role |= LinkRole::DROPDOWN_ITEM;
    }
    role
}

/// A section's id, or `None` for a missing or blank attribute.
#[must_use]
pub fn section_id(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// The id an `href` points at: `"#about"` gives `about`; a bare `"#"` and
/// external URLs give nothing.
#[must_use]
pub fn fragment_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Page configuration from the JSON string passed by the embedding script.
///
/// # Errors
///
/// Returns [`PageConfigError::Json`] for malformed input and
/// [`PageConfigError::Validation`] for out-of-range values.
pub fn parse_config(json: Option<&str>) -> Result<PageConfig, PageConfigError> {
    match json.map(str::trim) {
        None | Some("") => Ok(PageConfig::default()),
        Some(json) => PageConfig::from_json_str(json),
    }
}
