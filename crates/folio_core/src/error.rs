use thiserror::Error;

use crate::CONTACT_EMAIL;

/// Why a relay attempt failed, as far as the page cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryFailure {
    /// The relay answered with a non-success status.
    Rejected,
    /// The relay did not answer in time.
    Timeout,
    /// The request never reached the relay.
    Network,
}

/// Submit outcomes that end in `SubmissionStatus::Error`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("relay credentials are not configured")]
    Configuration,
    #[error("captcha token missing")]
    Verification,
    #[error("delivery failed: {0:?}")]
    Delivery(DeliveryFailure),
}

impl SubmitError {
    /// Text shown next to the submit button.
    pub fn user_message(&self) -> String {
        match self {
            SubmitError::Configuration => format!(
                "The contact form is not configured yet. Please email me directly at {CONTACT_EMAIL}."
            ),
            SubmitError::Verification => {
                "Please complete the captcha verification before sending.".to_string()
            }
            SubmitError::Delivery(_) => {
                "Something went wrong. Please try again or contact me directly via email."
                    .to_string()
            }
        }
    }
}
