use std::time::Duration;

/// Side effects requested by the state machine, executed by the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Ask the background relay whether an identity exists for the domain.
    SendCheck { domain: String },
    /// Request credentials for the domain over the background relay.
    SendAuth { domain: String },
    /// Run the form locator against the current page snapshot.
    AttemptDiscovery,
    /// Arm the retry timer for the next discovery attempt.
    ScheduleRetry { delay: Duration },
    /// Inject the stylesheet and the trigger button into the located form.
    InjectTrigger,
    /// Show the overlay with the spinning indicator.
    ShowLoading,
    /// Swap the indicator for the checkmark.
    ShowSuccess,
    /// Swap the indicator for the cross.
    ShowError,
    /// Write the credential pair into the located fields.
    FillCredentials { username: String, password: String },
    /// Arm the cosmetic delay before form submission.
    ScheduleSubmit { delay: Duration },
    /// Arm the cosmetic delay before overlay dismissal.
    ScheduleDismiss { delay: Duration },
    /// Detach the indicator and then the overlay from the document.
    RemoveOverlay,
    /// Submit the located form.
    SubmitForm,
}
