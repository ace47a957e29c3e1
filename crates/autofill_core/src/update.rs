use crate::{Effect, Msg, Phase, SessionState, UiState, RETRY_INTERVAL, UX_DELAY};

/// Pure update function: applies a message to the session and returns any effects.
pub fn update(mut state: SessionState, msg: Msg) -> (SessionState, Vec<Effect>) {
    let effects = match msg {
        Msg::SessionStarted => {
            if state.phase() != Phase::Idle {
                return (state, Vec::new());
            }
            state.set_phase(Phase::AwaitingCheck);
            vec![Effect::SendCheck {
                domain: state.domain().to_owned(),
            }]
        }
        Msg::CheckCompleted { is_present } => {
            if state.phase() != Phase::AwaitingCheck {
                return (state, Vec::new());
            }
            if is_present {
                state.begin_discovery();
                vec![Effect::AttemptDiscovery]
            } else {
                state.set_phase(Phase::Inactive);
                Vec::new()
            }
        }
        Msg::FormDiscovered { has_username } => {
            // Discovery on an already-populated session is a no-op; this is
            // what keeps repeated attempts from duplicating the trigger.
            if state.phase() != Phase::Discovering {
                return (state, Vec::new());
            }
            state.complete_discovery(has_username);
            if state.trigger_injected() {
                Vec::new()
            } else {
                state.mark_trigger_injected();
                vec![Effect::InjectTrigger]
            }
        }
        Msg::FormNotFound => {
            if state.phase() != Phase::Discovering {
                return (state, Vec::new());
            }
            if state.consume_discovery_attempt() > 0 {
                vec![Effect::ScheduleRetry {
                    delay: RETRY_INTERVAL,
                }]
            } else {
                // Silent and non-fatal: the page may simply have no login form.
                state.abandon_discovery();
                Vec::new()
            }
        }
        Msg::RetryTick => {
            if state.phase() == Phase::Discovering && state.attempts_remaining() > 0 {
                vec![Effect::AttemptDiscovery]
            } else {
                Vec::new()
            }
        }
        Msg::TriggerClicked => {
            // No `auth` request may leave a session without an established
            // form context, and never while an earlier one is animating.
            if state.phase() != Phase::Ready || state.ui() != UiState::Hidden {
                return (state, Vec::new());
            }
            state.set_phase(Phase::Authenticating);
            state.set_ui(UiState::Loading);
            vec![
                Effect::ShowLoading,
                Effect::SendAuth {
                    domain: state.domain().to_owned(),
                },
            ]
        }
        Msg::AuthGranted { username, password } => {
            if state.phase() != Phase::Authenticating || state.ui() != UiState::Loading {
                return (state, Vec::new());
            }
            state.set_ui(UiState::Success);
            vec![
                Effect::ShowSuccess,
                Effect::FillCredentials { username, password },
                Effect::ScheduleSubmit { delay: UX_DELAY },
            ]
        }
        Msg::AuthDenied => deny(&mut state),
        Msg::TransportFailed => match state.phase() {
            // A failed `check` leaves the session dormant, same as "absent".
            Phase::AwaitingCheck => {
                state.set_phase(Phase::Inactive);
                Vec::new()
            }
            Phase::Authenticating => deny(&mut state),
            _ => Vec::new(),
        },
        Msg::SubmitDelayElapsed => {
            if state.ui() != UiState::Success {
                return (state, Vec::new());
            }
            state.set_ui(UiState::Hidden);
            state.set_phase(Phase::Submitted);
            // Contract: the overlay is removed first, then the form submits.
            vec![Effect::RemoveOverlay, Effect::SubmitForm]
        }
        Msg::DismissDelayElapsed => {
            if state.ui() != UiState::Error {
                return (state, Vec::new());
            }
            state.set_ui(UiState::Hidden);
            // The trigger stays in the form; the user may try again.
            state.set_phase(Phase::Ready);
            vec![Effect::RemoveOverlay]
        }
    };

    (state, effects)
}

fn deny(state: &mut SessionState) -> Vec<Effect> {
    if state.phase() != Phase::Authenticating || state.ui() != UiState::Loading {
        return Vec::new();
    }
    state.set_ui(UiState::Error);
    vec![Effect::ShowError, Effect::ScheduleDismiss { delay: UX_DELAY }]
}
