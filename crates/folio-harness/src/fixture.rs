#![forbid(unsafe_code)]

//! The stock portfolio page as an outline plus a matching fake host.
//!
//! Node numbering is stable so tests can name elements directly:
//!
//! | Node | Element |
//! |------|---------|
//! | 0 | `<body>` |
//! | 1..=4 | sections `home`, `about`, `projects`, `contact` |
//! | 10..=13 | nav links `#home`, `#about`, `#projects`, `#contact` |
//! | 14 | resume button (nav link, `href="#"`) |
//! | 15, 16 | resume dropdown items |
//! | 20 | theme toggle |
//! | 21 | hamburger |
//! | 22 | nav menu |
//! | 23 | resume dropdown panel |
//! | 30..=32 | project cards |
//! | 33 | link inside card 30 |
//! | 40 | contact form |

use folio_core::{LinkRole, NavLinkOutline, NodeId, PageOutline, SectionOutline};

use crate::fake_page::FakePage;

pub const BODY: NodeId = NodeId::new(0);
pub const HOME: NodeId = NodeId::new(1);
pub const ABOUT: NodeId = NodeId::new(2);
pub const PROJECTS: NodeId = NodeId::new(3);
pub const CONTACT: NodeId = NodeId::new(4);

pub const LINK_HOME: NodeId = NodeId::new(10);
pub const LINK_ABOUT: NodeId = NodeId::new(11);
pub const LINK_PROJECTS: NodeId = NodeId::new(12);
pub const LINK_CONTACT: NodeId = NodeId::new(13);
pub const RESUME_BUTTON: NodeId = NodeId::new(14);
pub const RESUME_VIEW: NodeId = NodeId::new(15);
pub const RESUME_DOWNLOAD: NodeId = NodeId::new(16);

pub const THEME_TOGGLE: NodeId = NodeId::new(20);
pub const HAMBURGER: NodeId = NodeId::new(21);
pub const NAV_MENU: NodeId = NodeId::new(22);
pub const RESUME_PANEL: NodeId = NodeId::new(23);

pub const CARD_A: NodeId = NodeId::new(30);
pub const CARD_B: NodeId = NodeId::new(31);
pub const CARD_C: NodeId = NodeId::new(32);
pub const CARD_A_LINK: NodeId = NodeId::new(33);

pub const CONTACT_FORM: NodeId = NodeId::new(40);

/// Section ids and tops: home 0, about 600, projects 1400, contact 2200.
pub const SECTION_TOPS: [(NodeId, &str, f64); 4] = [
    (HOME, "home", 0.0),
    (ABOUT, "about", 600.0),
    (PROJECTS, "projects", 1400.0),
    (CONTACT, "contact", 2200.0),
];

/// Every element of the stock page.
#[must_use]
pub fn portfolio_outline() -> PageOutline {
    let mut outline = PageOutline::new(BODY);
    outline.sections = SECTION_TOPS
        .iter()
        .map(|(node, id, _)| SectionOutline::new(*node, *id))
        .collect();
    outline.nav_links = vec![
        NavLinkOutline::new(LINK_HOME, "#home").targeting(HOME),
        NavLinkOutline::new(LINK_ABOUT, "#about").targeting(ABOUT),
        NavLinkOutline::new(LINK_PROJECTS, "#projects").targeting(PROJECTS),
        NavLinkOutline::new(LINK_CONTACT, "#contact").targeting(CONTACT),
        NavLinkOutline::new(RESUME_BUTTON, "#").with_role(LinkRole::RESUME_BUTTON),
        NavLinkOutline::new(RESUME_VIEW, "resume.pdf").with_role(LinkRole::DROPDOWN_ITEM),
        NavLinkOutline::new(RESUME_DOWNLOAD, "resume.pdf").with_role(LinkRole::DROPDOWN_ITEM),
    ];
    outline.theme_toggle = Some(THEME_TOGGLE);
    outline.hamburger = Some(HAMBURGER);
    outline.nav_menu = Some(NAV_MENU);
    outline.resume_button = Some(RESUME_BUTTON);
    outline.resume_dropdown = Some(RESUME_PANEL);
    outline.dropdown_items = vec![RESUME_VIEW, RESUME_DOWNLOAD];
    outline.project_cards = vec![CARD_A, CARD_B, CARD_C];
    outline.contact_form = Some(CONTACT_FORM);
    outline
}

/// A host laid out like the stock page, 800 px viewport, scrolled to the top.
#[must_use]
pub fn portfolio_host() -> FakePage {
    SECTION_TOPS
        .iter()
        .fold(FakePage::new(800.0), |page, (node, _, top)| {
            page.with_section(*node, *top, 800.0)
        })
}

/// Click path for a link inside the nav menu.
#[must_use]
pub fn in_menu(node: NodeId) -> Vec<NodeId> {
    vec![node, NAV_MENU]
}

/// Click path for a dropdown item.
#[must_use]
pub fn in_dropdown(item: NodeId) -> Vec<NodeId> {
    vec![item, RESUME_PANEL, NAV_MENU]
}
