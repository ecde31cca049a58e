#![forbid(unsafe_code)]

//! End-to-end scroll synchronization against the fake host.
//!
//! Covers the active-section highlight, the one-shot reveal tracker and its
//! retirement, trailing-edge rate limiting, and resize reconciliation.
//!
//! Run:
//!   cargo test -p folio-runtime --test scroll_sync_e2e

use folio_core::{Effect, NodeId, PageOutline, SectionGeometry, SectionOutline, Signal, SignalKind, TimerKind, class};
use folio_harness::fixture::{
    ABOUT, CONTACT, HOME, LINK_ABOUT, LINK_CONTACT, LINK_HOME, LINK_PROJECTS, PROJECTS,
    portfolio_host, portfolio_outline,
};
use folio_harness::{FakePage, PageSession};
use folio_runtime::{GeometryCache, PageConfig, TrackerPhase};
use pretty_assertions::assert_eq;

fn session() -> PageSession {
    PageSession::mount(&portfolio_outline(), PageConfig::default(), portfolio_host())
        .expect("default config is valid")
}

fn active_links(session: &PageSession) -> Vec<NodeId> {
    [LINK_HOME, LINK_ABOUT, LINK_PROJECTS, LINK_CONTACT]
        .into_iter()
        .filter(|link| session.host().has_class(*link, class::ACTIVE))
        .collect()
}

// ── Mount ──

#[test]
fn mount_applies_reveal_baseline_to_every_section() {
    let session = session();
    assert_eq!(
        session.host().nodes_with_class(class::REVEAL),
        vec![HOME, ABOUT, PROJECTS, CONTACT]
    );
    assert!(session.host().nodes_with_class(class::ACTIVE).is_empty());
}

// ── Active section ──

#[test]
fn scroll_550_highlights_about() {
    let mut session = session();
    session.scroll_to(550.0);
    assert!(active_links(&session).is_empty(), "nothing runs before the window closes");

    assert_eq!(session.advance_ms(50), vec![TimerKind::ScrollSync]);
    assert_eq!(active_links(&session), vec![LINK_ABOUT]);
    assert_eq!(session.page().context().active_section_id(), Some("about"));
    assert_eq!(session.page().context().active_section_node(), Some(ABOUT));
}

#[test]
fn highlight_moves_between_sections() {
    let mut session = session();
    session.scroll_to(1300.0);
    session.advance_ms(50);
    assert_eq!(active_links(&session), vec![LINK_PROJECTS]);

    session.scroll_to(0.0);
    session.advance_ms(50);
    assert_eq!(active_links(&session), vec![LINK_HOME]);
}

#[test]
fn position_above_first_section_clears_highlight() {
    let mut outline = PageOutline::new(NodeId::new(0));
    outline.sections = vec![SectionOutline::new(NodeId::new(1), "intro")];
    outline.nav_links = vec![folio_core::NavLinkOutline::new(NodeId::new(10), "#intro")];
    let host = FakePage::new(800.0).with_section(NodeId::new(1), 500.0, 400.0);
    let mut session = PageSession::mount(&outline, PageConfig::default(), host).expect("mount");

    session.scroll_to(400.0);
    session.advance_ms(50);
    assert!(session.host().has_class(NodeId::new(10), class::ACTIVE));

    session.scroll_to(0.0);
    session.advance_ms(50);
    assert!(!session.host().has_class(NodeId::new(10), class::ACTIVE));
    assert_eq!(session.page().context().active_section_id(), None);
}

// ── Rate limiting ──

#[test]
fn burst_runs_once_a_window_after_first_signal() {
    let mut session = session();
    session.scroll_to(100.0);
    for y in [200.0, 300.0, 400.0, 550.0] {
        assert!(session.advance_ms(10).is_empty());
        let effects = session.scroll_to(y);
        assert!(effects.is_empty(), "coalesced scrolls schedule nothing");
    }
    assert_eq!(session.host().clock().pending(), 1, "one timer per burst");
    assert!(session.advance_ms(9).is_empty(), "window runs from the first signal");
    assert_eq!(session.advance_ms(1), vec![TimerKind::ScrollSync]);
    assert_eq!(session.host().clock().fired(), 1);

    // The handler observed the position at fire time.
    assert_eq!(active_links(&session), vec![LINK_ABOUT]);
    assert_eq!(session.page().context().scroll_limiter().coalesced_count(), 4);
}

#[test]
fn new_window_opens_after_fire() {
    let mut session = session();
    session.scroll_to(100.0);
    session.advance_ms(50);
    let effects = session.scroll_to(600.0);
    assert_eq!(
        effects,
        vec![Effect::ScheduleTimer {
            timer: TimerKind::ScrollSync,
            delay: core::time::Duration::from_millis(50),
        }]
    );
}

#[test]
fn stray_timer_runs_nothing() {
    let mut session = session();
    let effects = session.send(Signal::Timer(TimerKind::ScrollSync));
    assert!(effects.is_empty());
    assert!(active_links(&session).is_empty());
}

// ── Reveal ──

fn single_section(top: f64) -> PageSession {
    let mut outline = PageOutline::new(NodeId::new(0));
    outline.sections = vec![SectionOutline::new(NodeId::new(1), "work")];
    let host = FakePage::new(800.0).with_section(NodeId::new(1), top, 400.0);
    PageSession::mount(&outline, PageConfig::default(), host).expect("mount")
}

#[test]
fn reveal_waits_for_margin_above_viewport_bottom() {
    let mut session = single_section(850.0);
    session.load();
    assert!(!session.host().has_class(NodeId::new(1), class::ACTIVE), "850 >= 700");

    session.scroll_to(200.0);
    session.advance_ms(50);
    assert!(session.host().has_class(NodeId::new(1), class::ACTIVE), "650 < 700");
}

#[test]
fn taller_viewport_reveals_without_scrolling() {
    let mut session = single_section(850.0);
    session.load();
    assert!(!session.host().has_class(NodeId::new(1), class::ACTIVE));

    session.host_mut().set_viewport_height(1000.0);
    session.scroll_to(0.0);
    session.advance_ms(50);
    assert!(session.host().has_class(NodeId::new(1), class::ACTIVE), "850 < 900");
    assert_eq!(session.page().context().reveal().phase(), TrackerPhase::Retired);
}

#[test]
fn load_reveals_sections_already_in_view() {
    let mut session = session();
    session.load();
    assert!(session.host().has_class(HOME, class::ACTIVE));
    assert!(session.host().has_class(ABOUT, class::ACTIVE));
    assert!(!session.host().has_class(PROJECTS, class::ACTIVE));
    assert_eq!(session.page().context().reveal().revealed_count(), 2);
}

#[test]
fn revealed_section_stays_revealed_after_scrolling_back() {
    let mut session = session();
    session.scroll_to(1000.0);
    session.advance_ms(50);
    assert!(session.host().has_class(PROJECTS, class::ACTIVE));

    session.scroll_to(0.0);
    session.advance_ms(50);
    assert!(session.host().has_class(PROJECTS, class::ACTIVE));
}

#[test]
fn tracker_retires_and_stops_measuring() {
    let mut session = session();
    session.scroll_to(2000.0);
    session.advance_ms(50);

    let reveal = session.page().context().reveal();
    assert_eq!(reveal.phase(), TrackerPhase::Retired);
    assert_eq!(reveal.revealed_count(), 4);
    assert!(!session.page().is_subscribed(SignalKind::Load));
    assert_eq!(session.host().released(), vec![SignalKind::Load]);

    let queries = session.host().layout_queries();
    for y in [1500.0, 700.0, 0.0] {
        session.scroll_to(y);
        session.advance_ms(50);
    }
    assert_eq!(session.host().layout_queries(), queries);
    assert!(session.load().is_empty(), "host dropped its load listener");

    // Highlighting keeps working after retirement.
    assert_eq!(active_links(&session), vec![LINK_HOME]);
}

#[test]
fn retired_tracker_emits_no_section_mutations() {
    let mut session = session();
    session.scroll_to(2000.0);
    session.advance_ms(50);
    let sections = [HOME, ABOUT, PROJECTS, CONTACT];

    session.scroll_to(10.0);
    let deadline = core::time::Duration::from_millis(50);
    let before = session.host().transcript_jsonl().lines().count();
    session.advance(deadline);
    let transcript = session.host().transcript_jsonl();
    let touched_section = transcript.lines().skip(before).any(|line| {
        let value: serde_json::Value = serde_json::from_str(line).expect("json line");
        sections
            .iter()
            .any(|s| value["target"].as_u64() == Some(u64::from(s.get())))
    });
    assert!(!touched_section);
}

#[test]
fn empty_page_retires_without_queries() {
    let host = FakePage::new(800.0);
    let mut session =
        PageSession::mount(&PageOutline::new(NodeId::new(0)), PageConfig::default(), host)
            .expect("mount");
    let queries = session.host().layout_queries();
    let effects = session.load();
    assert_eq!(effects, vec![Effect::Release(SignalKind::Load)]);
    assert_eq!(session.host().layout_queries(), queries);
}

#[test]
fn reveal_identity_is_the_element_not_the_id() {
    let mut outline = PageOutline::new(NodeId::new(0));
    outline.sections = vec![
        SectionOutline::new(NodeId::new(1), "dup"),
        SectionOutline::new(NodeId::new(2), "dup"),
    ];
    let host = FakePage::new(800.0)
        .with_section(NodeId::new(1), 0.0, 400.0)
        .with_section(NodeId::new(2), 2000.0, 400.0);
    let mut session = PageSession::mount(&outline, PageConfig::default(), host).expect("mount");
    session.load();
    assert!(session.host().has_class(NodeId::new(1), class::ACTIVE));
    assert!(!session.host().has_class(NodeId::new(2), class::ACTIVE));
    assert_eq!(
        session.page().context().reveal().phase(),
        TrackerPhase::Active
    );
}

// ── Resize ──

#[test]
fn resize_refresh_matches_fresh_measurement() {
    let mut session = session();
    session.host_mut().set_layout(ABOUT, SectionGeometry::new(900.0, 700.0));
    session.host_mut().set_layout(CONTACT, SectionGeometry::new(2600.0, 500.0));
    session.resize();
    assert_eq!(session.advance_ms(250), vec![TimerKind::GeometryRefresh]);

    let fresh = GeometryCache::build(&portfolio_outline().sections, session.host());
    assert_eq!(session.page().context().geometry(), &fresh);
}

#[test]
fn resize_window_runs_from_first_signal() {
    let mut session = session();
    session.resize();
    assert!(session.advance_ms(100).is_empty());
    assert!(session.resize().is_empty());
    assert_eq!(session.advance_ms(150), vec![TimerKind::GeometryRefresh]);
}

#[test]
fn highlight_stays_stale_until_next_scroll_window() {
    let mut session = session();
    session.scroll_to(550.0);
    session.advance_ms(50);
    assert_eq!(active_links(&session), vec![LINK_ABOUT]);

    session.host_mut().set_layout(ABOUT, SectionGeometry::new(1000.0, 400.0));
    let mutations = session.host().mutations();
    session.resize();
    session.advance_ms(250);
    assert_eq!(session.host().mutations(), mutations, "refresh does not re-highlight");
    assert_eq!(active_links(&session), vec![LINK_ABOUT]);

    session.scroll_to(550.0);
    session.advance_ms(50);
    assert_eq!(active_links(&session), vec![LINK_HOME]);
}

#[test]
fn unmeasurable_section_keeps_previous_geometry() {
    let mut session = session();
    let before = session.page().context().geometry().get(1).cloned();
    session.host_mut().remove_layout(ABOUT);
    session.resize();
    session.advance_ms(250);
    assert_eq!(session.page().context().geometry().get(1).cloned(), before);
}

#[test]
fn scroll_and_resize_limit_independently() {
    let mut session = session();
    session.resize();
    session.advance_ms(10);
    session.scroll_to(550.0);
    assert_eq!(session.advance_ms(50), vec![TimerKind::ScrollSync]);
    assert_eq!(session.advance_ms(190), vec![TimerKind::GeometryRefresh]);
    assert_eq!(active_links(&session), vec![LINK_ABOUT]);
}
