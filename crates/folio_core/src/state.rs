use crate::view_model::{ContactViewModel, FieldError, SUCCESS_MESSAGE};
use crate::SubmitError;

pub type SubmissionId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Message];

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Your Name",
            Field::Email => "Email Address",
            Field::Message => "Your Message",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormState {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl FormState {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Message => &self.message,
        }
    }

    pub(crate) fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Message => self.message = value,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.email.is_empty() && self.message.is_empty()
    }
}

/// Opaque proof-of-humanity credential issued by the CAPTCHA widget.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CaptchaToken(String);

impl CaptchaToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<&str> for CaptchaToken {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Whether relay credentials are usable. Decided once by the config loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RelayReadiness {
    Configured,
    #[default]
    NotConfigured,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Success,
    Error,
}

/// Payload handed to the relay; field names follow the email template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub from_name: String,
    pub from_email: String,
    pub message: String,
    pub captcha_response: String,
}

/// Accepts what an `<input type="email">` would: one `@`, both sides
/// non-empty, no whitespace.
pub fn is_valid_email(value: &str) -> bool {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = trimmed.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => !local.is_empty() && !domain.is_empty(),
        _ => false,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContactState {
    form: FormState,
    status: SubmissionStatus,
    error: Option<SubmitError>,
    captcha_token: Option<CaptchaToken>,
    readiness: RelayReadiness,
    in_flight: Option<SubmissionId>,
    last_success: Option<SubmissionId>,
    next_submission_id: SubmissionId,
    field_errors: Vec<FieldError>,
    dirty: bool,
}

impl ContactState {
    pub fn new(readiness: RelayReadiness) -> Self {
        Self {
            readiness,
            next_submission_id: 1,
            ..Self::default()
        }
    }

    pub fn view(&self) -> ContactViewModel {
        let status_message = match (self.status, &self.error) {
            (SubmissionStatus::Success, _) => Some(SUCCESS_MESSAGE.to_string()),
            (SubmissionStatus::Error, Some(err)) => Some(err.user_message()),
            _ => None,
        };
        ContactViewModel {
            form: self.form.clone(),
            status: self.status,
            status_message,
            submitting: self.is_submitting(),
            submit_enabled: !self.is_submitting(),
            captcha_verified: self.captcha_token.is_some(),
            field_errors: self.field_errors.clone(),
            dirty: self.dirty,
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    pub fn error(&self) -> Option<&SubmitError> {
        self.error.as_ref()
    }

    pub fn captcha_token(&self) -> Option<&CaptchaToken> {
        self.captcha_token.as_ref()
    }

    pub fn readiness(&self) -> RelayReadiness {
        self.readiness
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Returns whether a render is pending and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_field(&mut self, field: Field, value: String) {
        self.form.set(field, value);
        self.field_errors.retain(|err| err.field != field);
        self.mark_dirty();
    }

    pub(crate) fn set_captcha_token(&mut self, token: Option<CaptchaToken>) {
        self.captcha_token = token.filter(|token| !token.is_blank());
        self.mark_dirty();
    }

    /// Mirrors the browser's required/type=email checks.
    pub(crate) fn validate_fields(&mut self) -> bool {
        let mut errors = Vec::new();
        for field in Field::ALL {
            if self.form.get(field).trim().is_empty() {
                errors.push(FieldError::required(field));
            } else if field == Field::Email && !is_valid_email(&self.form.email) {
                errors.push(FieldError::invalid_email());
            }
        }
        let valid = errors.is_empty();
        if self.field_errors != errors {
            self.field_errors = errors;
            self.mark_dirty();
        }
        valid
    }

    pub(crate) fn fail(&mut self, error: SubmitError) {
        self.status = SubmissionStatus::Error;
        self.error = Some(error);
        self.last_success = None;
        self.mark_dirty();
    }

    /// Enters the submitting state and builds the relay payload.
    /// Returns `None`, leaving state untouched, when no token is held.
    pub(crate) fn begin_submission(&mut self) -> Option<(SubmissionId, ContactMessage)> {
        let token = self.captcha_token.as_ref()?;
        let message = ContactMessage {
            from_name: self.form.name.trim().to_string(),
            from_email: self.form.email.trim().to_string(),
            message: self.form.message.trim().to_string(),
            captcha_response: token.as_str().to_string(),
        };
        let submission_id = self.next_submission_id;
        self.next_submission_id += 1;
        self.in_flight = Some(submission_id);
        self.status = SubmissionStatus::Idle;
        self.error = None;
        self.last_success = None;
        self.mark_dirty();
        Some((submission_id, message))
    }

    pub(crate) fn in_flight(&self) -> Option<SubmissionId> {
        self.in_flight
    }

    pub(crate) fn complete_success(&mut self, submission_id: SubmissionId) {
        self.in_flight = None;
        self.status = SubmissionStatus::Success;
        self.error = None;
        self.last_success = Some(submission_id);
        self.form = FormState::default();
        self.captcha_token = None;
        self.mark_dirty();
    }

    pub(crate) fn complete_failure(&mut self, failure: crate::DeliveryFailure) {
        self.in_flight = None;
        self.fail(SubmitError::Delivery(failure));
    }

    pub(crate) fn revert_success(&mut self, submission_id: SubmissionId) -> bool {
        if self.status != SubmissionStatus::Success || self.last_success != Some(submission_id) {
            return false;
        }
        self.status = SubmissionStatus::Idle;
        self.last_success = None;
        self.mark_dirty();
        true
    }
}
