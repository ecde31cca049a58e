#![no_main]

use folio_core::{Key, class};
use folio_harness::PageSession;
use folio_harness::fixture::{
    BODY, CARD_A, CARD_B, CARD_C, CARD_A_LINK, CONTACT_FORM, HAMBURGER, LINK_ABOUT, LINK_CONTACT,
    LINK_HOME, LINK_PROJECTS, NAV_MENU, RESUME_BUTTON, RESUME_DOWNLOAD, RESUME_PANEL, RESUME_VIEW,
    THEME_TOGGLE, in_dropdown, in_menu, portfolio_host, portfolio_outline,
};
use folio_runtime::{PageConfig, RelayConfig, TrackerPhase};
use libfuzzer_sys::fuzz_target;

const NAV_LINKS: [folio_core::NodeId; 4] = [LINK_HOME, LINK_ABOUT, LINK_PROJECTS, LINK_CONTACT];

fuzz_target!(|data: &[u8]| {
    let config = PageConfig::default().with_relay(RelayConfig::new("pk", "service", "template"));
    let Ok(mut session) = PageSession::mount(&portfolio_outline(), config, portfolio_host()) else {
        return;
    };

    // Each op is two bytes: selector and argument.
    for op in data.chunks_exact(2).take(512) {
        let arg = op[1];
        match op[0] % 16 {
            0 => drop(session.scroll_to(f64::from(arg) * 12.0)),
            1 => drop(session.resize()),
            2 => drop(session.load()),
            3 => drop(session.advance_ms(u64::from(arg))),
            4 => drop(session.click([THEME_TOGGLE])),
            5 => drop(session.click([HAMBURGER])),
            6 => drop(session.click_anchor(in_menu(NAV_LINKS[usize::from(arg) % 4]))),
            7 => drop(session.click_anchor(in_menu(RESUME_BUTTON))),
            8 => drop(session.click_anchor(in_dropdown(if arg % 2 == 0 {
                RESUME_VIEW
            } else {
                RESUME_DOWNLOAD
            }))),
            9 => drop(session.click([[CARD_A, CARD_B, CARD_C][usize::from(arg) % 3]])),
            10 => drop(session.click_anchor([CARD_A_LINK, CARD_A])),
            11 => drop(session.click([BODY])),
            12 => drop(session.click([RESUME_PANEL, NAV_MENU])),
            13 => {
                let key = [Key::Escape, Key::Enter, Key::Space, Key::Other][usize::from(arg) % 4];
                drop(session.key(key, [[CARD_A, CARD_B, BODY][usize::from(arg) % 3]]));
            }
            14 => drop(session.submit(CONTACT_FORM)),
            _ => drop(session.relay_settles(if arg % 2 == 0 {
                Ok(())
            } else {
                Err("rejected".into())
            })),
        }

        let host = session.host();
        let ctx = session.page().context();

        let highlighted = NAV_LINKS
            .iter()
            .filter(|link| host.has_class(**link, class::ACTIVE))
            .count();
        assert!(highlighted <= 1, "more than one nav link highlighted");

        assert!(host.nodes_with_class(class::FOCUSED).len() <= 1, "two focused cards");
        if ctx.reveal().phase() == TrackerPhase::Retired {
            assert!(ctx.reveal().is_complete(), "tracker retired early");
        }
        assert!(ctx.reveal().revealed_count() <= ctx.reveal().section_count());
    }
});
