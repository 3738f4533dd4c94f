#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited one of the form inputs.
    FieldChanged {
        field: crate::Field,
        value: String,
    },
    /// The CAPTCHA widget issued a token.
    CaptchaVerified(crate::CaptchaToken),
    /// The CAPTCHA widget's token expired or the widget was reset.
    CaptchaExpired,
    /// User clicked Send Message.
    SubmitClicked,
    /// Engine finished a relay attempt.
    DeliveryFinished {
        submission_id: crate::SubmissionId,
        result: Result<(), crate::DeliveryFailure>,
    },
    /// The success banner timer for a submission ran out.
    StatusResetElapsed { submission_id: crate::SubmissionId },
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
