//! Autofill core: pure page-session state machine and view helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{
    domain_from_url, FormSummary, Phase, RetryState, SessionState, UiState,
    MAX_DISCOVERY_ATTEMPTS, RETRY_INTERVAL, UX_DELAY,
};
pub use update::update;
pub use view::SessionView;
