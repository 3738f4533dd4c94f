use crate::{Field, FormState, SubmissionStatus};

pub const SUCCESS_MESSAGE: &str = "Thank you for your message! I'll get back to you soon.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

impl FieldError {
    pub(crate) fn required(field: Field) -> Self {
        Self {
            field,
            message: "Please fill out this field.",
        }
    }

    pub(crate) fn invalid_email() -> Self {
        Self {
            field: Field::Email,
            message: "Please enter a valid email address.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContactViewModel {
    pub form: FormState,
    pub status: SubmissionStatus,
    pub status_message: Option<String>,
    pub submitting: bool,
    /// False while a relay call is in flight.
    pub submit_enabled: bool,
    pub captcha_verified: bool,
    pub field_errors: Vec<FieldError>,
    pub dirty: bool,
}

impl ContactViewModel {
    pub fn field_error(&self, field: Field) -> Option<&'static str> {
        self.field_errors
            .iter()
            .find(|err| err.field == field)
            .map(|err| err.message)
    }

    pub fn submit_label(&self) -> &'static str {
        if self.submitting {
            "Sending..."
        } else {
            "Send Message"
        }
    }
}
