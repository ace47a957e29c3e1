//! Autofill engine: the background context. Wire protocol, HTTP proxy to
//! the local authentication service, and the single-flight message relay.
mod protocol;
mod relay;
mod service;

pub use protocol::{parse_reply, InboundMessage, OutboundMessage, ProtocolError};
pub use relay::{BackgroundRelay, RelayBusy, RelayEvent};
pub use service::{AuthService, HttpAuthService, ServiceError, ServiceSettings};
