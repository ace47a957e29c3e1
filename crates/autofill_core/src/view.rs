use crate::{Phase, UiState};

/// Read-only projection of the session for runtimes and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub domain: String,
    pub phase: Phase,
    pub ui: UiState,
    pub attempts_remaining: Option<u8>,
    pub has_form: bool,
    pub has_username: bool,
    pub trigger_injected: bool,
}
