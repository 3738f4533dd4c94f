use std::sync::Arc;
use std::time::Duration;

use folio_core::{CaptchaToken, DeliveryFailure, Effect, Msg};
use folio_engine::{
    CaptchaWidgetHandle, EngineEvent, EngineHandle, FailureKind, Relay, RelayError, RelayMessage,
};
use folio_logging::{folio_debug, folio_warn};

/// Stands in for the relay when credentials are missing; the core never
/// sends through it.
pub struct DisabledRelay;

#[async_trait::async_trait]
impl Relay for DisabledRelay {
    async fn send(&self, _message: &RelayMessage) -> Result<(), RelayError> {
        Err(RelayError {
            kind: FailureKind::Network,
            message: "relay not configured".to_string(),
        })
    }
}

pub struct EffectRunner {
    engine: EngineHandle,
    to_email: String,
}

impl EffectRunner {
    pub fn new(
        relay: Arc<dyn Relay>,
        captcha: CaptchaWidgetHandle,
        to_email: String,
    ) -> std::io::Result<Self> {
        let engine = EngineHandle::new(relay, captcha)?;
        Ok(Self { engine, to_email })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SendMessage {
                    submission_id,
                    message,
                } => {
                    folio_debug!("SendMessage submission_id={}", submission_id);
                    self.engine.send_message(
                        submission_id,
                        RelayMessage {
                            from_name: message.from_name,
                            from_email: message.from_email,
                            message: message.message,
                            to_email: self.to_email.clone(),
                            captcha_response: message.captcha_response,
                        },
                    );
                }
                Effect::ResetCaptcha => self.engine.reset_captcha(),
                Effect::ScheduleStatusReset {
                    submission_id,
                    after,
                } => self.engine.schedule_status_reset(submission_id, after),
            }
        }
    }

    /// Waits up to `timeout` for the next engine event, as a core message.
    pub fn next_msg(&self, timeout: Duration) -> Option<Msg> {
        self.engine.recv_timeout(timeout).map(map_event)
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::DeliveryCompleted {
            submission_id,
            result,
        } => Msg::DeliveryFinished {
            submission_id,
            result: result.map_err(|err| {
                folio_warn!("Submission {} failed: {}", submission_id, err);
                map_failure(&err.kind)
            }),
        },
        EngineEvent::StatusResetElapsed { submission_id } => {
            Msg::StatusResetElapsed { submission_id }
        }
        EngineEvent::CaptchaVerified(token) => Msg::CaptchaVerified(CaptchaToken::new(token)),
        EngineEvent::CaptchaExpired => Msg::CaptchaExpired,
    }
}

fn map_failure(kind: &FailureKind) -> DeliveryFailure {
    match kind {
        FailureKind::HttpStatus(_) => DeliveryFailure::Rejected,
        FailureKind::Timeout => DeliveryFailure::Timeout,
        FailureKind::Network => DeliveryFailure::Network,
    }
}
