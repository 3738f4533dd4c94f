use std::sync::{Arc, Mutex, Once};
use std::time::{Duration, Instant};

use folio_core::{
    update, CaptchaToken, ContactState, DeliveryFailure, Effect, Field, Msg, RelayReadiness,
    SubmissionStatus,
};
use folio_engine::{
    captcha_channel, CaptchaVerifier, EngineEvent, EngineHandle, FailureKind, Relay, RelayError,
    RelayMessage,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(folio_logging::initialize_for_tests);
}

/// Relay double that records every call and answers with a fixed result.
struct RecordingRelay {
    calls: Mutex<Vec<RelayMessage>>,
    result: Result<(), RelayError>,
    delay: Duration,
}

impl RecordingRelay {
    fn new(result: Result<(), RelayError>) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            result,
            delay: Duration::from_millis(0),
        })
    }

    fn slow(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            result: Ok(()),
            delay,
        })
    }

    fn calls(&self) -> Vec<RelayMessage> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Relay for RecordingRelay {
    async fn send(&self, message: &RelayMessage) -> Result<(), RelayError> {
        self.calls.lock().unwrap().push(message.clone());
        tokio::time::sleep(self.delay).await;
        self.result.clone()
    }
}

/// Minimal page loop: runs effects on the engine and feeds events back.
struct Page {
    state: ContactState,
    engine: EngineHandle,
    verifier: CaptchaVerifier,
    reset_after: Option<Duration>,
}

impl Page {
    fn new(relay: Arc<dyn Relay>, readiness: RelayReadiness) -> Self {
        let (captcha, verifier) = captcha_channel("site_key");
        Self {
            state: ContactState::new(readiness),
            engine: EngineHandle::new(relay, captcha).unwrap(),
            verifier,
            reset_after: None,
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        for effect in effects {
            match effect {
                Effect::SendMessage {
                    submission_id,
                    message,
                } => self.engine.send_message(
                    submission_id,
                    RelayMessage {
                        from_name: message.from_name,
                        from_email: message.from_email,
                        message: message.message,
                        to_email: "owner@example.com".to_string(),
                        captcha_response: message.captcha_response,
                    },
                ),
                Effect::ResetCaptcha => self.engine.reset_captcha(),
                Effect::ScheduleStatusReset {
                    submission_id,
                    after,
                } => self
                    .engine
                    .schedule_status_reset(submission_id, self.reset_after.unwrap_or(after)),
            }
        }
    }

    fn fill(&mut self, name: &str, email: &str, message: &str) {
        for (field, value) in [
            (Field::Name, name),
            (Field::Email, email),
            (Field::Message, message),
        ] {
            self.dispatch(Msg::FieldChanged {
                field,
                value: value.to_string(),
            });
        }
    }

    /// Pumps engine events until `done` holds or the deadline passes.
    fn pump_until(&mut self, done: impl Fn(&ContactState) -> bool) -> bool {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if done(&self.state) {
                return true;
            }
            if let Some(event) = self.engine.recv_timeout(Duration::from_millis(20)) {
                let msg = match event {
                    EngineEvent::DeliveryCompleted {
                        submission_id,
                        result,
                    } => Msg::DeliveryFinished {
                        submission_id,
                        result: result.map_err(|_| DeliveryFailure::Network),
                    },
                    EngineEvent::StatusResetElapsed { submission_id } => {
                        Msg::StatusResetElapsed { submission_id }
                    }
                    EngineEvent::CaptchaVerified(token) => {
                        Msg::CaptchaVerified(CaptchaToken::new(token))
                    }
                    EngineEvent::CaptchaExpired => Msg::CaptchaExpired,
                };
                self.dispatch(msg);
            }
        }
        done(&self.state)
    }
}

#[test]
fn jane_doe_scenario_delivers_once_and_clears_form() {
    init_logging();
    let relay = RecordingRelay::new(Ok(()));
    let mut page = Page::new(relay.clone(), RelayReadiness::Configured);
    page.reset_after = Some(Duration::from_millis(50));

    page.fill("Jane Doe", "jane@x.com", "Hi");
    page.verifier.verified("abc123");
    assert!(page.pump_until(|state| state.captcha_token().is_some()));

    page.dispatch(Msg::SubmitClicked);
    assert!(page.pump_until(|state| state.status() == SubmissionStatus::Success));

    let calls = relay.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].from_name, "Jane Doe");
    assert_eq!(calls[0].from_email, "jane@x.com");
    assert_eq!(calls[0].message, "Hi");
    assert_eq!(calls[0].captcha_response, "abc123");
    assert!(page.state.form().is_empty());
    assert!(page.state.captcha_token().is_none());

    assert!(page.pump_until(|state| state.status() == SubmissionStatus::Idle));
}

#[test]
fn missing_token_never_reaches_relay() {
    init_logging();
    let relay = RecordingRelay::new(Ok(()));
    let mut page = Page::new(relay.clone(), RelayReadiness::Configured);

    page.fill("Jane Doe", "jane@x.com", "Hi");
    page.dispatch(Msg::SubmitClicked);

    assert_eq!(page.state.status(), SubmissionStatus::Error);
    assert!(!page.state.is_submitting());
    std::thread::sleep(Duration::from_millis(50));
    assert!(page.engine.try_recv().is_none());
    assert_eq!(relay.calls().len(), 0);
}

#[test]
fn unconfigured_relay_never_reaches_relay() {
    init_logging();
    let relay = RecordingRelay::new(Ok(()));
    let mut page = Page::new(relay.clone(), RelayReadiness::NotConfigured);

    page.fill("Jane Doe", "jane@x.com", "Hi");
    page.dispatch(Msg::CaptchaVerified(CaptchaToken::from("abc123")));
    page.dispatch(Msg::SubmitClicked);

    let message = page.state.view().status_message.unwrap();
    assert!(message.contains("not configured"));
    assert_eq!(relay.calls().len(), 0);
}

#[test]
fn failed_delivery_preserves_input() {
    init_logging();
    let relay = RecordingRelay::new(Err(RelayError {
        kind: FailureKind::HttpStatus(500),
        message: "boom".to_string(),
    }));
    let mut page = Page::new(relay.clone(), RelayReadiness::Configured);

    page.fill("Jane Doe", "jane@x.com", "Hi");
    page.dispatch(Msg::CaptchaVerified(CaptchaToken::from("abc123")));
    page.dispatch(Msg::SubmitClicked);

    assert!(page.pump_until(|state| state.status() == SubmissionStatus::Error));
    assert_eq!(relay.calls().len(), 1);
    assert_eq!(page.state.form().name, "Jane Doe");
    assert_eq!(page.state.form().email, "jane@x.com");
    assert_eq!(page.state.form().message, "Hi");
}

#[test]
fn clicks_during_flight_do_not_duplicate_calls() {
    init_logging();
    let relay = RecordingRelay::slow(Duration::from_millis(100));
    let mut page = Page::new(relay.clone(), RelayReadiness::Configured);

    page.fill("Jane Doe", "jane@x.com", "Hi");
    page.dispatch(Msg::CaptchaVerified(CaptchaToken::from("abc123")));
    page.dispatch(Msg::SubmitClicked);
    page.dispatch(Msg::SubmitClicked);
    page.dispatch(Msg::SubmitClicked);

    assert!(page.pump_until(|state| state.status() == SubmissionStatus::Success));
    assert_eq!(relay.calls().len(), 1);
}

#[test]
fn widget_expiry_clears_token() {
    init_logging();
    let relay = RecordingRelay::new(Ok(()));
    let mut page = Page::new(relay, RelayReadiness::Configured);

    page.verifier.verified("abc123");
    assert!(page.pump_until(|state| state.captcha_token().is_some()));

    page.verifier.expired();
    assert!(page.pump_until(|state| state.captcha_token().is_none()));
}

#[test]
fn second_message_after_success_gets_fresh_token() {
    init_logging();
    let relay = RecordingRelay::new(Ok(()));
    let mut page = Page::new(relay.clone(), RelayReadiness::Configured);

    page.fill("Jane Doe", "jane@x.com", "Hi");
    page.verifier.verified("first");
    assert!(page.pump_until(|state| state.captcha_token().is_some()));
    page.dispatch(Msg::SubmitClicked);
    assert!(page.pump_until(|state| state.status() == SubmissionStatus::Success));
    assert!(page.state.captcha_token().is_none());

    // The widget is re-solved as soon as the success banner shows.
    page.verifier.verified("second");
    assert!(page.pump_until(|state| state.captcha_token().is_some()));

    page.fill("Jane Doe", "jane@x.com", "Hi again");
    page.dispatch(Msg::SubmitClicked);
    assert!(page.pump_until(|state| {
        !state.is_submitting() && state.status() == SubmissionStatus::Success
    }));

    let calls = relay.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].captcha_response, "first");
    assert_eq!(calls[1].captcha_response, "second");
    assert_eq!(calls[1].message, "Hi again");
}
