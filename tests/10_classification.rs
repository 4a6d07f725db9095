mod common;

use pistac_gate::auth::{AuthStatus, AuthView};
use pistac_gate::{Classification, Element, MarkerConfig, RestrictedKind};

#[test]
fn exempt_marker_wins_at_any_depth() {
    let markers = MarkerConfig::default();
    let restricted = [
        Element::new("button"),
        Element::new("div").with_class("btn-primary"),
        Element::new("article").with_class("card-interactive"),
    ];

    // Insert an exempt element at every position of every restricted path
    for leaf in &restricted {
        let base = vec![Element::new("span"), leaf.clone(), Element::new("main")];
        for position in 0..=base.len() {
            let mut path = base.clone();
            path.insert(position, Element::new("div").with_class("guest-allowed"));
            assert_eq!(markers.classify(&path), Classification::Exempt, "path {:?}", path);
        }
    }
}

#[test]
fn exempt_paths_never_suppressed_for_guests() {
    let (mut gate, _) = common::gate(AuthView::fixed(AuthStatus::guest()));
    let mut page = common::page();

    for target in [page.exempt, page.nested_exempt, page.zone_button] {
        let outcome = gate.dispatch(&mut page.tree, target);
        assert!(!outcome.suppressed());
        assert!(!outcome.event.default_prevented());
        assert_eq!(outcome.classification, Some(Classification::Exempt));
        assert_eq!(outcome.event.handled_by.first(), Some(&target));
    }
    assert_eq!(page.hits(), 3);
    assert!(!gate.prompt().is_open());
}

#[test]
fn unmarked_paths_pass_through_for_guests_and_members() {
    for status in [AuthStatus::guest(), AuthStatus::authenticated()] {
        let (mut gate, _) = common::gate(AuthView::fixed(status));
        let mut page = common::page();

        for target in [page.link, page.text] {
            let outcome = gate.dispatch(&mut page.tree, target);
            assert!(!outcome.suppressed());
            assert!(outcome.request.is_none());
            if status.is_guest() {
                assert_eq!(outcome.classification, Some(Classification::Unclassified));
            } else {
                assert_eq!(outcome.classification, None);
            }
        }
        assert_eq!(page.hits(), 2);
        assert!(!gate.prompt().is_open());
    }
}

#[test]
fn restricted_ancestor_gates_plain_leaf() {
    let (mut gate, _) = common::gate(AuthView::fixed(AuthStatus::guest()));
    let mut page = common::page();

    let outcome = gate.dispatch(&mut page.tree, page.card_title);
    assert!(outcome.suppressed());
    assert_eq!(
        outcome.classification,
        Some(Classification::Restricted(RestrictedKind::InteractiveCard))
    );
    assert_eq!(page.hits(), 0);
}

#[test]
fn custom_registry_changes_what_is_gated() {
    let markers = MarkerConfig {
        exempt: "class:always-on".parse().unwrap(),
        restricted: MarkerConfig::parse_restricted("primary_action=.cta, a").unwrap(),
    };
    let (gate, _) = common::gate(AuthView::fixed(AuthStatus::guest()));
    let mut gate = gate.with_markers(markers);
    let mut page = common::page();

    // Plain buttons are no longer recognised; links now are
    assert!(!gate.dispatch(&mut page.tree, page.button).suppressed());
    assert!(gate.dispatch(&mut page.tree, page.link).suppressed());
    // guest-allowed is no longer the exempt marker
    assert!(!gate.dispatch(&mut page.tree, page.exempt).suppressed());
}
