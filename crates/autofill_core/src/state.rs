use url::Url;

use crate::view::SessionView;

/// Hard cap on form-discovery attempts for late-rendering pages.
pub const MAX_DISCOVERY_ATTEMPTS: u8 = 10;
/// Spacing between discovery attempts.
pub const RETRY_INTERVAL: std::time::Duration = std::time::Duration::from_millis(500);
/// Cosmetic delay letting the success/failure animation play before
/// the form is submitted or the overlay dismissed.
pub const UX_DELAY: std::time::Duration = std::time::Duration::from_millis(600);

/// Status-indicator state. Exactly one indicator element is visible at a
/// time; every transition tears the previous one down first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiState {
    #[default]
    Hidden,
    Loading,
    Success,
    Error,
}

/// Coarse lifecycle of one page session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Page loaded, `check` not yet sent.
    #[default]
    Idle,
    /// Waiting for the `check` reply.
    AwaitingCheck,
    /// No identity enrolled for this domain; the session stays dormant.
    Inactive,
    /// Polling the page for a login form.
    Discovering,
    /// Form located and trigger injected; waiting for a click.
    Ready,
    /// `auth` request outstanding or its outcome still animating.
    Authenticating,
    /// Credentials filled and the form submitted; the page navigates away.
    Submitted,
    /// Discovery attempts exhausted without finding a form.
    GaveUp,
}

/// Transient discovery bookkeeping; lives only during the polling window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryState {
    pub attempts_remaining: u8,
}

/// What discovery learned about the located form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormSummary {
    /// A missing username field degrades to password-only autofill.
    pub has_username: bool,
}

/// The whole per-page session, owned by the runtime and passed explicitly
/// through `update` rather than read from ambient globals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    domain: String,
    phase: Phase,
    ui: UiState,
    retry: Option<RetryState>,
    form: Option<FormSummary>,
    trigger_injected: bool,
}

impl SessionState {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            phase: Phase::default(),
            ui: UiState::default(),
            retry: None,
            form: None,
            trigger_injected: false,
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn ui(&self) -> UiState {
        self.ui
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            domain: self.domain.clone(),
            phase: self.phase,
            ui: self.ui,
            attempts_remaining: self.retry.map(|r| r.attempts_remaining),
            has_form: self.form.is_some(),
            has_username: self.form.is_some_and(|f| f.has_username),
            trigger_injected: self.trigger_injected,
        }
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    pub(crate) fn set_ui(&mut self, ui: UiState) {
        self.ui = ui;
    }

    pub(crate) fn begin_discovery(&mut self) {
        self.phase = Phase::Discovering;
        self.retry = Some(RetryState {
            attempts_remaining: MAX_DISCOVERY_ATTEMPTS,
        });
    }

    /// Consumes one discovery attempt and returns how many are left.
    pub(crate) fn consume_discovery_attempt(&mut self) -> u8 {
        let retry = self.retry.get_or_insert(RetryState {
            attempts_remaining: MAX_DISCOVERY_ATTEMPTS,
        });
        retry.attempts_remaining = retry.attempts_remaining.saturating_sub(1);
        retry.attempts_remaining
    }

    pub(crate) fn attempts_remaining(&self) -> u8 {
        self.retry.map_or(0, |r| r.attempts_remaining)
    }

    pub(crate) fn complete_discovery(&mut self, has_username: bool) {
        self.phase = Phase::Ready;
        self.form = Some(FormSummary { has_username });
        self.retry = None;
    }

    pub(crate) fn abandon_discovery(&mut self) {
        self.phase = Phase::GaveUp;
        self.retry = None;
    }

    pub(crate) fn trigger_injected(&self) -> bool {
        self.trigger_injected
    }

    pub(crate) fn mark_trigger_injected(&mut self) {
        self.trigger_injected = true;
    }
}

/// Extracts the host name used as the protocol `domain` from a page URL.
/// The service strips any `www.` prefix itself, so the host is passed as-is.
pub fn domain_from_url(page_url: &str) -> Option<String> {
    Url::parse(page_url)
        .ok()
        .and_then(|url| url.host_str().map(ToOwned::to_owned))
}
