mod common;

use std::sync::atomic::Ordering;

use pistac_gate::auth::{AuthStatus, IdentityProvider};
use pistac_gate::GateView;

#[test]
fn scripted_clicks_dismissal_and_sign_in() {
    let provider = IdentityProvider::with_status(AuthStatus::guest());
    let (mut gate, sign_ins) = common::gate(provider.view());
    let mut page = common::page();

    // Closed initially
    assert!(!gate.prompt().is_open());
    assert_eq!(gate.prompt().message(), "");

    // Primary action: suppressed, prompt opens with its label
    let first = gate.dispatch(&mut page.tree, page.primary);
    assert!(first.suppressed());
    assert_eq!(first.request.as_ref().map(|r| r.action_label.as_str()), Some("buy this workshop"));
    assert!(gate.prompt().is_open());
    assert_eq!(gate.prompt().message(), "Sign in to buy this workshop");

    // Dismiss closes
    gate.dismiss_prompt();
    assert!(!gate.prompt().is_open());

    // Generic button: suppressed, prompt reopens with the default label
    let second = gate.dispatch(&mut page.tree, page.button);
    assert!(second.suppressed());
    assert_eq!(gate.prompt().message(), "Sign in to use this feature");
    match gate.render() {
        GateView::Guarded { prompt: Some(prompt), .. } => {
            assert_eq!(prompt.message, "Sign in to use this feature");
        }
        other => panic!("expected open prompt, got {:?}", other.mode()),
    }

    // Exempt button: passes through and leaves the prompt as it was
    let third = gate.dispatch(&mut page.tree, page.exempt);
    assert!(!third.suppressed());
    assert_eq!(third.event.handled_by, vec![page.exempt]);
    assert_eq!(page.hits(), 1);

    // Sign-in affordance delegates, auth unchanged until the provider says so
    gate.prompt_sign_in();
    assert_eq!(sign_ins.load(Ordering::SeqCst), 1);
    assert!(gate.prompt().is_open());

    // Authentication closes the prompt without dismissal
    provider.set(AuthStatus::authenticated());
    assert!(matches!(gate.render(), GateView::Content(_)));
    assert!(!gate.prompt().is_open());
}

#[test]
fn dismissing_a_closed_prompt_is_a_no_op() {
    let provider = IdentityProvider::with_status(AuthStatus::guest());
    let (mut gate, _) = common::gate(provider.view());
    gate.dismiss_prompt();
    gate.dismiss_prompt();
    assert!(!gate.prompt().is_open());
    assert!(gate.prompt().view().is_none());
}

#[test]
fn banner_opens_prompt_and_closed_prompt_ignores_sign_in() {
    let provider = IdentityProvider::with_status(AuthStatus::guest());
    let (mut gate, sign_ins) = common::gate(provider.view());

    gate.prompt_sign_in();
    assert_eq!(sign_ins.load(Ordering::SeqCst), 0);

    gate.banner_sign_in();
    assert!(gate.prompt().is_open());
    gate.prompt_sign_in();
    assert_eq!(sign_ins.load(Ordering::SeqCst), 1);
}

#[test]
fn sign_in_transition_closes_prompt_before_next_render() {
    let provider = IdentityProvider::with_status(AuthStatus::guest());
    let (mut gate, sign_ins) = common::gate(provider.view());
    let mut page = common::page();

    assert!(gate.dispatch(&mut page.tree, page.primary).suppressed());
    assert!(gate.prompt().is_open());

    provider.set(AuthStatus::authenticated());
    assert!(!gate.prompt().is_open());
    gate.prompt_sign_in();
    assert_eq!(sign_ins.load(Ordering::SeqCst), 0);
}
