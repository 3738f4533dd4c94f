use std::fmt;

pub type SubmissionId = u64;

/// One templated email as the relay sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayMessage {
    pub from_name: String,
    pub from_email: String,
    pub message: String,
    pub to_email: String,
    pub captcha_response: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    DeliveryCompleted {
        submission_id: SubmissionId,
        result: Result<(), RelayError>,
    },
    StatusResetElapsed {
        submission_id: SubmissionId,
    },
    CaptchaVerified(String),
    CaptchaExpired,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayError {
    pub kind: FailureKind,
    pub message: String,
}

impl RelayError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for RelayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}: {}", self.kind, self.message)
        }
    }
}

impl std::error::Error for RelayError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    HttpStatus(u16),
    Timeout,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
