#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Page load finished; the session should ask whether an identity is enrolled.
    SessionStarted,
    /// Reply to the startup `check` request.
    CheckCompleted { is_present: bool },
    /// A discovery attempt located a login form.
    FormDiscovered { has_username: bool },
    /// A discovery attempt found no usable login form.
    FormNotFound,
    /// The 500 ms retry timer elapsed; another discovery attempt may run.
    RetryTick,
    /// User clicked the autofill trigger inside the form.
    TriggerClicked,
    /// The service produced credentials for this domain.
    AuthGranted { username: String, password: String },
    /// The service explicitly refused authentication.
    AuthDenied,
    /// The relay could not reach the service (timeout, network, bad body).
    TransportFailed,
    /// The 600 ms cosmetic delay before form submission elapsed.
    SubmitDelayElapsed,
    /// The 600 ms cosmetic delay before overlay dismissal elapsed.
    DismissDelayElapsed,
}
