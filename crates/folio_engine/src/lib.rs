//! Folio engine: relay client, CAPTCHA handle and effect execution.
mod captcha;
mod config;
mod engine;
mod relay;
mod types;

pub use captcha::{captcha_channel, CaptchaError, CaptchaVerifier, CaptchaWidgetHandle};
pub use config::{is_placeholder, ConfigError, RelayConfig, RelaySettings, DEFAULT_ENDPOINT};
pub use engine::EngineHandle;
pub use relay::{EmailJsRelay, Relay};
pub use types::{EngineEvent, FailureKind, RelayError, RelayMessage, SubmissionId};
