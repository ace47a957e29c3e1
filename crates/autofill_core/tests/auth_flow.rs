use std::sync::Once;

use autofill_core::{update, Effect, Msg, Phase, SessionState, UiState, UX_DELAY};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(autofill_logging::initialize_for_tests);
}

/// A session that has located its form and injected the trigger.
fn ready_session() -> SessionState {
    let state = SessionState::new("example.com");
    let (state, _) = update(state, Msg::SessionStarted);
    let (state, _) = update(state, Msg::CheckCompleted { is_present: true });
    let (state, _) = update(state, Msg::FormDiscovered { has_username: true });
    assert_eq!(state.view().phase, Phase::Ready);
    state
}

fn clicked_session() -> SessionState {
    let state = ready_session();
    let (state, effects) = update(state, Msg::TriggerClicked);
    assert_eq!(
        effects,
        vec![
            Effect::ShowLoading,
            Effect::SendAuth {
                domain: "example.com".to_string(),
            },
        ]
    );
    state
}

#[test]
fn click_shows_loading_and_requests_auth() {
    init_logging();
    let state = clicked_session();
    let view = state.view();
    assert_eq!(view.phase, Phase::Authenticating);
    assert_eq!(view.ui, UiState::Loading);
}

#[test]
fn click_before_discovery_sends_nothing() {
    init_logging();
    let state = SessionState::new("example.com");
    let (state, _) = update(state, Msg::SessionStarted);

    // No form context yet, so no auth request may be issued.
    let (state, effects) = update(state, Msg::TriggerClicked);
    assert!(effects.is_empty());
    assert_eq!(state.view().ui, UiState::Hidden);
}

#[test]
fn second_click_while_loading_is_ignored() {
    init_logging();
    let state = clicked_session();
    let (state, effects) = update(state, Msg::TriggerClicked);
    assert!(effects.is_empty());
    assert_eq!(state.view().ui, UiState::Loading);
}

#[test]
fn granted_auth_fills_and_defers_submit() {
    init_logging();
    let state = clicked_session();
    let (state, effects) = update(
        state,
        Msg::AuthGranted {
            username: "u".to_string(),
            password: "p".to_string(),
        },
    );

    assert_eq!(
        effects,
        vec![
            Effect::ShowSuccess,
            Effect::FillCredentials {
                username: "u".to_string(),
                password: "p".to_string(),
            },
            Effect::ScheduleSubmit { delay: UX_DELAY },
        ]
    );
    assert_eq!(state.view().ui, UiState::Success);

    // Submission happens only once the cosmetic delay has elapsed, and the
    // overlay comes down before the form goes out.
    let (state, effects) = update(state, Msg::SubmitDelayElapsed);
    assert_eq!(effects, vec![Effect::RemoveOverlay, Effect::SubmitForm]);
    let view = state.view();
    assert_eq!(view.phase, Phase::Submitted);
    assert_eq!(view.ui, UiState::Hidden);
}

#[test]
fn denied_auth_shows_error_then_dismisses() {
    init_logging();
    let state = clicked_session();
    let (state, effects) = update(state, Msg::AuthDenied);

    assert_eq!(
        effects,
        vec![Effect::ShowError, Effect::ScheduleDismiss { delay: UX_DELAY }]
    );
    assert_eq!(state.view().ui, UiState::Error);

    let (state, effects) = update(state, Msg::DismissDelayElapsed);
    assert_eq!(effects, vec![Effect::RemoveOverlay]);
    let view = state.view();
    assert_eq!(view.ui, UiState::Hidden);
    // The trigger is still in the form; the user may retry.
    assert_eq!(view.phase, Phase::Ready);
}

#[test]
fn retry_after_denial_requests_auth_again() {
    init_logging();
    let state = clicked_session();
    let (state, _) = update(state, Msg::AuthDenied);
    let (state, _) = update(state, Msg::DismissDelayElapsed);

    let (_, effects) = update(state, Msg::TriggerClicked);
    assert!(effects.contains(&Effect::SendAuth {
        domain: "example.com".to_string(),
    }));
}

#[test]
fn transport_failure_during_auth_reaches_error_state() {
    init_logging();
    let state = clicked_session();
    let (state, effects) = update(state, Msg::TransportFailed);

    assert_eq!(
        effects,
        vec![Effect::ShowError, Effect::ScheduleDismiss { delay: UX_DELAY }]
    );
    assert_eq!(state.view().ui, UiState::Error);
}

#[test]
fn stray_timer_messages_are_ignored() {
    init_logging();
    let state = ready_session();

    let (state, effects) = update(state, Msg::SubmitDelayElapsed);
    assert!(effects.is_empty());
    let (state, effects) = update(state, Msg::DismissDelayElapsed);
    assert!(effects.is_empty());
    assert_eq!(state.view().ui, UiState::Hidden);

    // A submit timer firing while the error indicator shows is equally inert.
    let state = clicked_session();
    let (state, _) = update(state, Msg::AuthDenied);
    let (state, effects) = update(state, Msg::SubmitDelayElapsed);
    assert!(effects.is_empty());
    assert_eq!(state.view().ui, UiState::Error);
}

#[test]
fn late_auth_reply_after_dismissal_is_ignored() {
    init_logging();
    let state = clicked_session();
    let (state, _) = update(state, Msg::AuthDenied);
    let (state, _) = update(state, Msg::DismissDelayElapsed);

    let (state, effects) = update(
        state,
        Msg::AuthGranted {
            username: "u".to_string(),
            password: "p".to_string(),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.view().ui, UiState::Hidden);
}
