use std::time::Duration;

/// How long a success banner stays up before the status reverts to idle.
pub const STATUS_RESET_DELAY: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Deliver the message through the relay. The engine adds the recipient.
    SendMessage {
        submission_id: crate::SubmissionId,
        message: crate::ContactMessage,
    },
    /// Clear the CAPTCHA widget so the next message needs a fresh token.
    ResetCaptcha,
    /// Report `Msg::StatusResetElapsed` for this submission after `after`.
    ScheduleStatusReset {
        submission_id: crate::SubmissionId,
        after: Duration,
    },
}
