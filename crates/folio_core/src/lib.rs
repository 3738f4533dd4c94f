//! Folio core: pure contact-form state machine, view model and site map.
mod effect;
mod error;
mod msg;
mod site;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, STATUS_RESET_DELAY};
pub use error::{DeliveryFailure, SubmitError};
pub use msg::Msg;
pub use site::{
    Page, SocialLink, CONTACT_EMAIL, SITE_DESCRIPTION, SITE_TITLE, SOCIAL_LINKS,
};
pub use state::{
    is_valid_email, CaptchaToken, ContactMessage, ContactState, Field, FormState,
    RelayReadiness, SubmissionId, SubmissionStatus,
};
pub use update::update;
pub use view_model::{ContactViewModel, FieldError, SUCCESS_MESSAGE};
