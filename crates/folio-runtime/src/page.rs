#![forbid(unsafe_code)]

//! The page controller.
//!
//! [`Page::mount`] turns a discovered [`PageOutline`] into a [`PageContext`]
//! plus a [`DispatchTable`], wiring only the features whose elements exist.
//! Afterwards the host feeds every signal to [`Page::dispatch`] and applies
//! the returned effects in order.
//!
//! # Reaction order
//!
//! | Signal     | Reactions                                                         |
//! |------------|-------------------------------------------------------------------|
//! | `Scroll`   | scroll limiter                                                    |
//! | `Resize`   | resize limiter                                                    |
//! | `Timer`    | scroll window, active section, reveal, geometry refresh           |
//! | `Load`     | reveal                                                            |
//! | `Click`    | theme, hamburger, nav link, resume button, dropdown item,         |
//! |            | smooth scroll, card, then menu/dropdown/card "click outside"      |
//! | `KeyDown`  | menu (Escape), card (Enter/Space)                                 |
//! | `Submit`   | contact form                                                      |
//! | `RelayOutcome` | contact form                                                  |

use folio_core::{
    Effect, Effects, LayoutProbe, PageOutline, PreferenceStore, RateLimiter, Signal, SignalKind,
};

use crate::config::{PageConfig, PageConfigError};
use crate::context::PageContext;
use crate::dispatch::{DispatchTable, ReactionId};
use crate::interaction::{
    cards::{self, CardFocus},
    contact::{self, ContactForm},
    dropdown::{self, ResumeDropdown},
    menu::{self, NavMenu},
    smooth_scroll,
    theme::{self, ThemeState},
};
use crate::scroll_sync::{
    self, active_section, geometry_cache::GeometryCache, reveal, reveal::RevealTracker, resize,
};

/// A mounted page: its state and its reaction table.
#[derive(Debug, Clone)]
pub struct Page {
    ctx: PageContext,
    table: DispatchTable,
}

impl Page {
    /// Build the page state from its outline and wire its reactions.
    ///
    /// Returns the page together with the effects the host must apply before
    /// the first signal: the reveal baseline, the stored theme, and the relay
    /// initialization.
    ///
    /// # Errors
    ///
    /// Returns [`PageConfigError::Validation`] when `config` is invalid.
    pub fn mount(
        outline: &PageOutline,
        config: PageConfig,
        probe: &dyn LayoutProbe,
        prefs: &dyn PreferenceStore,
    ) -> Result<(Self, Vec<Effect>), PageConfigError> {
        let config = config.validated()?;
        let mut effects = Effects::new();

        let geometry = GeometryCache::build(&outline.sections, probe);
        let reveal = RevealTracker::new(
            outline.sections.iter().map(|s| s.node).collect(),
            config.reveal_margin,
        );
        reveal.apply_baseline(&mut effects);

        let theme = ThemeState::load(
            outline.body,
            outline.theme_toggle,
            &config.theme_key,
            prefs,
            &mut effects,
        );

        let menu = outline
            .hamburger
            .zip(outline.nav_menu)
            .map(|(hamburger, nav)| NavMenu::new(hamburger, nav));
        let dropdown = outline
            .resume_button
            .zip(outline.resume_dropdown)
            .map(|(button, panel)| ResumeDropdown::new(button, panel, outline.dropdown_items.clone()));
        let cards = (!outline.project_cards.is_empty())
            .then(|| CardFocus::new(outline.project_cards.clone()));
        let contact = outline.contact_form.map(|form| {
            if let Some(relay) = &config.relay {
                effects.push(Effect::InitRelay {
                    public_key: relay.public_key.clone(),
                });
            }
            ContactForm::new(form, config.relay.clone(), config.notices.clone())
        });

        let ctx = PageContext {
            scroll_limiter: RateLimiter::new(config.scroll_window()),
            resize_limiter: RateLimiter::new(config.resize_window()),
            geometry,
            nav_links: outline.nav_links.clone(),
            active_section: None,
            reveal,
            theme,
            menu,
            dropdown,
            cards,
            contact,
            config,
        };
        let table = wire(&ctx);

        tracing::info!(
            target: "folio.dispatch",
            sections = ctx.geometry.len(),
            nav_links = ctx.nav_links.len(),
            menu = ctx.menu.is_some(),
            dropdown = ctx.dropdown.is_some(),
            cards = ctx.cards.is_some(),
            contact = ctx.contact.is_some(),
            "page mounted"
        );

        Ok((Self { ctx, table }, effects.into_vec()))
    }

    /// Run one signal through the reaction table.
    pub fn dispatch(&mut self, signal: &Signal, probe: &dyn LayoutProbe) -> Vec<Effect> {
        self.table.dispatch(signal, &mut self.ctx, probe).into_vec()
    }

    #[must_use]
    pub fn context(&self) -> &PageContext {
        &self.ctx
    }

    #[must_use]
    pub fn table(&self) -> &DispatchTable {
        &self.table
    }

    /// Whether any reaction still listens for `kind`.
    #[must_use]
    pub fn is_subscribed(&self, kind: SignalKind) -> bool {
        self.table.is_subscribed(kind)
    }

    /// Kinds the host must deliver, in table order.
    #[must_use]
    pub fn subscriptions(&self) -> Vec<SignalKind> {
        self.table.subscribed_kinds()
    }

    /// Reactions executed since mount.
    #[must_use]
    pub fn reactions_run(&self) -> u64 {
        self.table.reactions_run()
    }
}

fn wire(ctx: &PageContext) -> DispatchTable {
    use ReactionId as R;
    use SignalKind as K;

    let mut table = DispatchTable::new();

    table.register(K::Scroll, R::ScrollThrottle, "scroll_limiter", scroll_sync::throttle_scroll);
    table.register(K::Resize, R::ResizeThrottle, "resize_limiter", scroll_sync::throttle_resize);

    table.register(K::Timer, R::ScrollWindow, "scroll_window", scroll_sync::close_scroll_window);
    table.register(K::Timer, R::ActiveSection, "active_section", active_section::on_scroll_window);
    if ctx.reveal.section_count() > 0 {
        table.register(K::Timer, R::Reveal, "reveal", reveal::on_scroll_window);
    }
    table.register(K::Timer, R::GeometryRefresh, "geometry_refresh", resize::on_resize_window);
    table.register(K::Load, R::Reveal, "reveal", reveal::on_load);

    if ctx.theme.toggle_button().is_some() {
        table.register(K::Click, R::Theme, "theme", theme::on_click);
    }
    if ctx.menu.is_some() {
        table.register(K::Click, R::Menu, "hamburger", menu::on_hamburger_click);
        table.register(K::Click, R::Menu, "nav_link_close", menu::on_nav_link_click);
    }
    if ctx.dropdown.is_some() {
        table.register(K::Click, R::Dropdown, "resume_button", dropdown::on_button_click);
        table.register(K::Click, R::Dropdown, "dropdown_item", dropdown::on_item_click);
    }
    if ctx.nav_links.iter().any(|link| link.is_internal()) {
        table.register(K::Click, R::SmoothScroll, "smooth_scroll", smooth_scroll::on_click);
    }
    if ctx.cards.is_some() {
        table.register(K::Click, R::CardFocus, "card", cards::on_card_click);
    }
    if ctx.menu.is_some() {
        table.register(K::Click, R::Menu, "menu_outside", menu::on_click_outside);
    }
    if ctx.dropdown.is_some() {
        table.register(K::Click, R::Dropdown, "dropdown_outside", dropdown::on_click_outside);
    }
    if ctx.cards.is_some() {
        table.register(K::Click, R::CardFocus, "card_outside", cards::on_click_outside);
    }

    if ctx.menu.is_some() {
        table.register(K::KeyDown, R::Menu, "menu_escape", menu::on_key);
    }
    if ctx.cards.is_some() {
        table.register(K::KeyDown, R::CardFocus, "card_key", cards::on_card_key);
    }

    if ctx.contact.is_some() {
        table.register(K::Submit, R::ContactForm, "contact_submit", contact::on_submit);
        table.register(K::RelayOutcome, R::ContactForm, "contact_outcome", contact::on_outcome);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::{ClickSignal, NavLinkOutline, NodeId, SectionGeometry, SectionOutline, TimerKind};
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    struct StillProbe;

    impl LayoutProbe for StillProbe {
        fn scroll_y(&self) -> f64 {
            0.0
        }

        fn viewport_height(&self) -> f64 {
            800.0
        }

        fn measure(&self, _node: NodeId) -> Option<SectionGeometry> {
            Some(SectionGeometry::new(0.0, 400.0))
        }

        fn client_top(&self, _node: NodeId) -> Option<f64> {
            Some(2000.0)
        }
    }

    #[derive(Default)]
    struct Prefs(HashMap<String, String>);

    impl PreferenceStore for Prefs {
        fn get(&self, key: &str) -> Option<String> {
            self.0.get(key).cloned()
        }

        fn set(&mut self, key: &str, value: &str) {
            self.0.insert(key.to_owned(), value.to_owned());
        }
    }

    fn full_outline() -> PageOutline {
        let mut outline = PageOutline::new(NodeId::new(0));
        outline.sections = vec![SectionOutline::new(NodeId::new(1), "home")];
        outline.nav_links = vec![NavLinkOutline::new(NodeId::new(10), "#home").targeting(NodeId::new(1))];
        outline.theme_toggle = Some(NodeId::new(20));
        outline.hamburger = Some(NodeId::new(21));
        outline.nav_menu = Some(NodeId::new(22));
        outline.resume_button = Some(NodeId::new(23));
        outline.resume_dropdown = Some(NodeId::new(24));
        outline.project_cards = vec![NodeId::new(30)];
        outline.contact_form = Some(NodeId::new(40));
        outline
    }

    fn mount(outline: &PageOutline) -> Page {
        let (page, _) = Page::mount(outline, PageConfig::default(), &StillProbe, &Prefs::default())
            .expect("default config is valid");
        page
    }

    #[test]
    fn click_reactions_run_element_first_outside_last() {
        let page = mount(&full_outline());
        assert_eq!(
            page.table().labels(SignalKind::Click),
            vec![
                "theme",
                "hamburger",
                "nav_link_close",
                "resume_button",
                "dropdown_item",
                "smooth_scroll",
                "card",
                "menu_outside",
                "dropdown_outside",
                "card_outside",
            ]
        );
        assert_eq!(
            page.table().labels(SignalKind::Timer),
            vec!["scroll_window", "active_section", "reveal", "geometry_refresh"]
        );
    }

    #[test]
    fn bare_page_wires_only_scroll_sync() {
        let page = mount(&PageOutline::new(NodeId::new(0)));
        assert_eq!(
            page.subscriptions(),
            vec![SignalKind::Scroll, SignalKind::Resize, SignalKind::Load, SignalKind::Timer]
        );
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = PageConfig {
            scroll_window_ms: 0,
            ..PageConfig::default()
        };
        let result = Page::mount(&full_outline(), config, &StillProbe, &Prefs::default());
        assert!(matches!(result, Err(PageConfigError::Validation(_))));
    }

    #[test]
    fn resume_button_halts_outside_reactions() {
        let mut page = mount(&full_outline());
        let before = page.reactions_run();
        let effects = page.dispatch(
            &Signal::Click(ClickSignal::new(vec![NodeId::new(23)])),
            &StillProbe,
        );
        assert_eq!(page.reactions_run() - before, 4);
        assert!(effects.contains(&Effect::StopPropagation));
        assert!(page.context().dropdown().is_some_and(|d| d.is_open()));
    }

    #[test]
    fn empty_page_releases_load_after_first_pass() {
        let mut page = mount(&PageOutline::new(NodeId::new(0)));
        let effects = page.dispatch(&Signal::Load, &StillProbe);
        assert_eq!(effects, vec![Effect::Release(SignalKind::Load)]);
        assert!(!page.is_subscribed(SignalKind::Load));
        assert!(page.is_subscribed(SignalKind::Timer));
    }

    #[test]
    fn stray_scroll_timer_is_halted() {
        let mut page = mount(&full_outline());
        let before = page.reactions_run();
        let effects = page.dispatch(&Signal::Timer(TimerKind::ScrollSync), &StillProbe);
        assert!(effects.is_empty());
        assert_eq!(page.reactions_run() - before, 1);
    }
}
