//! Autofill app: the content-script runtime host wiring the pure session
//! state machine to the page model and the background relay.
mod config;
mod session;

pub use config::{AppConfig, CONFIG_FILENAME};
pub use session::ContentSession;
