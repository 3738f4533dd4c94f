use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use folio_logging::{folio_debug, folio_info, folio_warn};

use crate::captcha::{CaptchaError, CaptchaWidgetHandle};
use crate::relay::Relay;
use crate::{EngineEvent, RelayMessage, SubmissionId};

enum EngineCommand {
    Send {
        submission_id: SubmissionId,
        message: RelayMessage,
    },
    ScheduleStatusReset {
        submission_id: SubmissionId,
        after: Duration,
    },
}

/// Runs relay calls and timers on a background tokio runtime.
///
/// Dropping the handle abandons anything still in flight.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
    captcha: CaptchaWidgetHandle,
}

impl EngineHandle {
    pub fn new(relay: Arc<dyn Relay>, captcha: CaptchaWidgetHandle) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()?;

        thread::Builder::new()
            .name("folio-engine".to_string())
            .spawn({
                let captcha = captcha.clone();
                move || {
                    runtime.spawn(forward_captcha(captcha, event_tx.clone()));
                    while let Ok(command) = cmd_rx.recv() {
                        handle_command(&runtime, relay.clone(), command, event_tx.clone());
                    }
                    folio_debug!("engine command channel closed; shutting down");
                }
            })?;

        Ok(Self {
            cmd_tx,
            event_rx,
            captcha,
        })
    }

    pub fn send_message(&self, submission_id: SubmissionId, message: RelayMessage) {
        let _ = self.cmd_tx.send(EngineCommand::Send {
            submission_id,
            message,
        });
    }

    pub fn schedule_status_reset(&self, submission_id: SubmissionId, after: Duration) {
        let _ = self.cmd_tx.send(EngineCommand::ScheduleStatusReset {
            submission_id,
            after,
        });
    }

    /// Clears the widget before returning, so a token verified after this
    /// call is never overwritten by the reset.
    pub fn reset_captcha(&self) {
        self.captcha.reset();
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

fn handle_command(
    runtime: &tokio::runtime::Runtime,
    relay: Arc<dyn Relay>,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Send {
            submission_id,
            message,
        } => {
            runtime.spawn(async move {
                folio_info!(
                    "Sending submission_id={} message_len={}",
                    submission_id,
                    message.message.len()
                );
                let result = relay.send(&message).await;
                match &result {
                    Ok(()) => folio_info!("Delivered submission_id={}", submission_id),
                    Err(err) => folio_warn!("Delivery failed submission_id={}: {}", submission_id, err),
                }
                let _ = event_tx.send(EngineEvent::DeliveryCompleted {
                    submission_id,
                    result,
                });
            });
        }
        EngineCommand::ScheduleStatusReset {
            submission_id,
            after,
        } => {
            runtime.spawn(async move {
                tokio::time::sleep(after).await;
                let _ = event_tx.send(EngineEvent::StatusResetElapsed { submission_id });
            });
        }
    }
}

async fn forward_captcha(mut captcha: CaptchaWidgetHandle, event_tx: mpsc::Sender<EngineEvent>) {
    loop {
        let event = match captcha.wait_for_token().await {
            Ok(token) => EngineEvent::CaptchaVerified(token),
            Err(CaptchaError::Expired) => EngineEvent::CaptchaExpired,
        };
        if event_tx.send(event).is_err() {
            break;
        }
    }
}
