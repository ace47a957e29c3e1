use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use log::warn;

use crate::protocol::{InboundMessage, OutboundMessage};
use crate::service::{AuthService, HttpAuthService, ServiceError, ServiceSettings};

/// Reply pushed back to the content side over the relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayEvent {
    CheckCompleted { is_present: bool },
    AuthGranted { username: String, password: String },
    AuthDenied,
    /// The service was unreachable, timed out, or answered garbage.
    TransportFailed,
}

/// Observable single-flight rejection: the message was never sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("a relay request is already in flight")]
pub struct RelayBusy;

/// The message channel between one page session and the background
/// context. One instance per page; events arrive in send order; nothing
/// is redelivered across instances.
pub struct BackgroundRelay {
    cmd_tx: mpsc::Sender<OutboundMessage>,
    event_rx: mpsc::Receiver<RelayEvent>,
    in_flight: Arc<AtomicBool>,
}

impl BackgroundRelay {
    /// Connects a relay to the local authentication service.
    pub fn connect(settings: &ServiceSettings) -> Result<Self, ServiceError> {
        Ok(Self::spawn(Arc::new(HttpAuthService::new(settings)?)))
    }

    /// Starts the background worker over an arbitrary service
    /// implementation; tests inject fakes through this seam.
    pub fn spawn(service: Arc<dyn AuthService>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel::<OutboundMessage>();
        let (event_tx, event_rx) = mpsc::channel();
        let in_flight = Arc::new(AtomicBool::new(false));
        let gate = in_flight.clone();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(message) = cmd_rx.recv() {
                let event = runtime.block_on(async {
                    match service.exchange(&message).await {
                        Ok(reply) => reply_event(&message, reply),
                        Err(err) => {
                            warn!("auth service exchange failed: {err}");
                            RelayEvent::TransportFailed
                        }
                    }
                });
                let _ = event_tx.send(event);
                // The gate opens only once the reply is on the channel.
                gate.store(false, Ordering::Release);
            }
        });

        Self {
            cmd_tx,
            event_rx,
            in_flight,
        }
    }

    /// Submits a message unless another one is still in flight. The
    /// rejection is observable; nothing is queued or coalesced.
    pub fn submit(&self, message: OutboundMessage) -> Result<(), RelayBusy> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(RelayBusy);
        }
        if self.cmd_tx.send(message).is_err() {
            // Worker gone; only happens during teardown.
            self.in_flight.store(false, Ordering::Release);
            return Err(RelayBusy);
        }
        Ok(())
    }

    pub fn try_recv(&self) -> Option<RelayEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<RelayEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

/// Maps a reply onto a relay event in the context of what was asked.
/// Non-answers (`empty`, or the service's blanket `auth_fail` while its
/// vault is locked) read as "absent" for a check and "denied" for an auth.
fn reply_event(sent: &OutboundMessage, reply: InboundMessage) -> RelayEvent {
    match (sent, reply) {
        (OutboundMessage::Check { .. }, InboundMessage::Check { is_present }) => {
            RelayEvent::CheckCompleted { is_present }
        }
        (OutboundMessage::Check { .. }, _) => RelayEvent::CheckCompleted { is_present: false },
        (OutboundMessage::Auth { .. }, InboundMessage::Auth { username, password }) => {
            RelayEvent::AuthGranted { username, password }
        }
        (OutboundMessage::Auth { .. }, _) => RelayEvent::AuthDenied,
    }
}
