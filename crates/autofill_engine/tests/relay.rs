use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};
use std::time::Duration;

use autofill_engine::{
    AuthService, BackgroundRelay, InboundMessage, OutboundMessage, RelayBusy, RelayEvent,
    ServiceError,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(autofill_logging::initialize_for_tests);
}

/// Fake service with a configurable response delay and a call counter.
struct SlowService {
    delay: Duration,
    reply: InboundMessage,
    calls: AtomicUsize,
}

impl SlowService {
    fn new(delay: Duration, reply: InboundMessage) -> Arc<Self> {
        Arc::new(Self {
            delay,
            reply,
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait::async_trait]
impl AuthService for SlowService {
    async fn exchange(&self, _message: &OutboundMessage) -> Result<InboundMessage, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        Ok(self.reply.clone())
    }
}

struct FailingService;

#[async_trait::async_trait]
impl AuthService for FailingService {
    async fn exchange(&self, _message: &OutboundMessage) -> Result<InboundMessage, ServiceError> {
        Err(ServiceError::Timeout)
    }
}

fn auth_msg() -> OutboundMessage {
    OutboundMessage::Auth {
        domain: "example.com".to_string(),
    }
}

#[test]
fn second_submit_while_in_flight_is_rejected_observably() {
    init_logging();
    let service = SlowService::new(
        Duration::from_millis(150),
        InboundMessage::Auth {
            username: "u".to_string(),
            password: "p".to_string(),
        },
    );
    let relay = BackgroundRelay::spawn(service.clone());

    assert_eq!(relay.submit(auth_msg()), Ok(()));
    // The first request is still in flight; the second never reaches the
    // service and the caller can tell.
    assert_eq!(relay.submit(auth_msg()), Err(RelayBusy));

    let event = relay
        .recv_timeout(Duration::from_secs(2))
        .expect("first reply");
    assert_eq!(
        event,
        RelayEvent::AuthGranted {
            username: "u".to_string(),
            password: "p".to_string(),
        }
    );

    // Exactly one request produced a matching response.
    assert!(relay.try_recv().is_none());
    assert_eq!(service.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn gate_reopens_after_the_reply_is_delivered() {
    init_logging();
    let service = SlowService::new(Duration::from_millis(10), InboundMessage::AuthFail);
    let relay = BackgroundRelay::spawn(service.clone());

    assert_eq!(relay.submit(auth_msg()), Ok(()));
    assert_eq!(
        relay.recv_timeout(Duration::from_secs(2)),
        Some(RelayEvent::AuthDenied)
    );

    // A fresh request goes straight through once the gate is open again.
    assert_eq!(relay.submit(auth_msg()), Ok(()));
    assert_eq!(
        relay.recv_timeout(Duration::from_secs(2)),
        Some(RelayEvent::AuthDenied)
    );
    assert_eq!(service.calls.load(Ordering::SeqCst), 2);
}

#[test]
fn transport_failure_becomes_a_terminal_event() {
    init_logging();
    let relay = BackgroundRelay::spawn(Arc::new(FailingService));

    assert_eq!(relay.submit(auth_msg()), Ok(()));
    assert_eq!(
        relay.recv_timeout(Duration::from_secs(2)),
        Some(RelayEvent::TransportFailed)
    );
}

#[test]
fn check_reply_carries_the_presence_flag() {
    init_logging();
    let service = SlowService::new(
        Duration::from_millis(5),
        InboundMessage::Check { is_present: true },
    );
    let relay = BackgroundRelay::spawn(service);

    relay
        .submit(OutboundMessage::Check {
            domain: "example.com".to_string(),
        })
        .expect("submit");
    assert_eq!(
        relay.recv_timeout(Duration::from_secs(2)),
        Some(RelayEvent::CheckCompleted { is_present: true })
    );
}

#[test]
fn locked_vault_reply_to_check_reads_as_absent() {
    init_logging();
    // The original service answers auth_fail to everything while its vault
    // is locked; for a check that must read as "no identity here".
    let service = SlowService::new(Duration::from_millis(5), InboundMessage::AuthFail);
    let relay = BackgroundRelay::spawn(service);

    relay
        .submit(OutboundMessage::Check {
            domain: "example.com".to_string(),
        })
        .expect("submit");
    assert_eq!(
        relay.recv_timeout(Duration::from_secs(2)),
        Some(RelayEvent::CheckCompleted { is_present: false })
    );
}
