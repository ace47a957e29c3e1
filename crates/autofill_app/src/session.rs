use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use autofill_core::{update, Effect, Msg, SessionState, SessionView};
use autofill_dom::{
    create_trigger, fill_credentials, inject_styles, locate_login_form, remove_overlay,
    show_loading, submit_form, FormContext, OverlayHandle, PageDom,
};
use autofill_engine::{BackgroundRelay, OutboundMessage, RelayEvent};
use autofill_logging::{autofill_debug, autofill_info, autofill_warn};

static NEXT_SESSION_TAG: AtomicU64 = AtomicU64::new(1);

/// One content-script session: owns the page snapshot, the session state,
/// the relay to the background context, and the handles to whatever it
/// injected. Dropping the session is page teardown; pending timers fire
/// into a dead mailbox.
pub struct ContentSession {
    state: SessionState,
    page: PageDom,
    relay: BackgroundRelay,
    form: Option<FormContext>,
    overlay: Option<OverlayHandle>,
    msg_tx: mpsc::Sender<Msg>,
    msg_rx: mpsc::Receiver<Msg>,
}

impl ContentSession {
    pub fn start(page: PageDom, domain: &str, relay: BackgroundRelay) -> Self {
        let tag = NEXT_SESSION_TAG.fetch_add(1, Ordering::Relaxed);
        autofill_logging::set_session_tag(tag);
        autofill_info!("session {tag} started for {domain}");

        let (msg_tx, msg_rx) = mpsc::channel();
        // Kick off the startup check; it is processed on the first pump.
        let _ = msg_tx.send(Msg::SessionStarted);

        Self {
            state: SessionState::new(domain),
            page,
            relay,
            form: None,
            overlay: None,
            msg_tx,
            msg_rx,
        }
    }

    pub fn view(&self) -> SessionView {
        self.state.view()
    }

    pub fn page(&self) -> &PageDom {
        &self.page
    }

    /// Mutable access to the page snapshot; late-rendering pages grow
    /// their form through this between pumps.
    pub fn page_mut(&mut self) -> &mut PageDom {
        &mut self.page
    }

    /// A user click on the injected trigger.
    pub fn click_trigger(&self) {
        let _ = self.msg_tx.send(Msg::TriggerClicked);
    }

    /// Applies everything currently waiting: relay events first, then the
    /// session mailbox. Returns the number of messages applied.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Some(event) = self.relay.try_recv() {
            self.dispatch(relay_msg(event));
            applied += 1;
        }
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.dispatch(msg);
            applied += 1;
        }
        applied
    }

    /// Pumps until `predicate` holds for the session view or the deadline
    /// passes; returns whether the predicate held.
    pub fn pump_until(
        &mut self,
        deadline: Duration,
        predicate: impl Fn(&SessionView) -> bool,
    ) -> bool {
        let started = Instant::now();
        loop {
            self.pump();
            if predicate(&self.view()) {
                return true;
            }
            if started.elapsed() >= deadline {
                return false;
            }
            thread::sleep(Duration::from_millis(5));
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let (state, effects) = update(self.state.clone(), msg);
        self.state = state;
        for effect in effects {
            self.run_effect(effect);
        }
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::SendCheck { domain } => {
                if let Err(err) = self.relay.submit(OutboundMessage::Check { domain }) {
                    autofill_warn!("check not sent: {err}");
                }
            }
            Effect::SendAuth { domain } => {
                if let Err(err) = self.relay.submit(OutboundMessage::Auth { domain }) {
                    autofill_warn!("auth not sent: {err}");
                }
            }
            Effect::AttemptDiscovery => match locate_login_form(&self.page) {
                Some(ctx) => {
                    let has_username = ctx.username.is_some();
                    self.form = Some(ctx);
                    let _ = self.msg_tx.send(Msg::FormDiscovered { has_username });
                }
                None => {
                    autofill_debug!("no login form on this snapshot");
                    let _ = self.msg_tx.send(Msg::FormNotFound);
                }
            },
            Effect::ScheduleRetry { delay } => self.schedule(Msg::RetryTick, delay),
            Effect::InjectTrigger => {
                inject_styles(&mut self.page);
                if let Some(ctx) = self.form {
                    create_trigger(&mut self.page, &ctx);
                }
            }
            Effect::ShowLoading => {
                // One indicator at a time: tear down any leftover first.
                if let Some(handle) = self.overlay.take() {
                    remove_overlay(&mut self.page, handle);
                }
                self.overlay = Some(show_loading(&mut self.page));
            }
            Effect::ShowSuccess => {
                if let Some(handle) = &mut self.overlay {
                    autofill_dom::indicate_success(&mut self.page, handle);
                }
            }
            Effect::ShowError => {
                if let Some(handle) = &mut self.overlay {
                    autofill_dom::indicate_error(&mut self.page, handle);
                }
            }
            Effect::FillCredentials { username, password } => {
                if let Some(ctx) = self.form {
                    fill_credentials(&mut self.page, &ctx, &username, &password);
                }
            }
            Effect::ScheduleSubmit { delay } => self.schedule(Msg::SubmitDelayElapsed, delay),
            Effect::ScheduleDismiss { delay } => self.schedule(Msg::DismissDelayElapsed, delay),
            Effect::RemoveOverlay => {
                if let Some(handle) = self.overlay.take() {
                    remove_overlay(&mut self.page, handle);
                }
            }
            Effect::SubmitForm => {
                if let Some(ctx) = self.form {
                    autofill_info!("submitting login form");
                    submit_form(&mut self.page, &ctx);
                }
            }
        }
    }

    /// Arms a one-shot timer that posts `msg` back into the mailbox.
    /// There is no cancellation; stale messages are filtered by `update`.
    fn schedule(&self, msg: Msg, delay: Duration) {
        let tx = self.msg_tx.clone();
        thread::spawn(move || {
            thread::sleep(delay);
            let _ = tx.send(msg);
        });
    }
}

fn relay_msg(event: RelayEvent) -> Msg {
    match event {
        RelayEvent::CheckCompleted { is_present } => Msg::CheckCompleted { is_present },
        RelayEvent::AuthGranted { username, password } => Msg::AuthGranted { username, password },
        RelayEvent::AuthDenied => Msg::AuthDenied,
        RelayEvent::TransportFailed => Msg::TransportFailed,
    }
}
