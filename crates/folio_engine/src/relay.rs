use serde::Serialize;

use crate::config::{ConfigError, RelayConfig, RelaySettings};
use crate::{FailureKind, RelayError, RelayMessage};

#[async_trait::async_trait]
pub trait Relay: Send + Sync {
    async fn send(&self, message: &RelayMessage) -> Result<(), RelayError>;
}

#[derive(Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    #[serde(rename = "accessToken", skip_serializing_if = "Option::is_none")]
    access_token: Option<&'a str>,
    template_params: TemplateParams<'a>,
}

#[derive(Serialize)]
struct TemplateParams<'a> {
    from_name: &'a str,
    from_email: &'a str,
    message: &'a str,
    to_email: &'a str,
    #[serde(rename = "g-recaptcha-response")]
    captcha_response: &'a str,
}

/// Relay backed by the EmailJS REST endpoint.
#[derive(Debug, Clone)]
pub struct EmailJsRelay {
    config: RelayConfig,
    client: reqwest::Client,
}

impl EmailJsRelay {
    pub fn new(config: RelayConfig, settings: RelaySettings) -> Result<Self, ConfigError> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ConfigError::Client(err.to_string()))?;
        Ok(Self { config, client })
    }

    fn request_body<'a>(&'a self, message: &'a RelayMessage) -> SendRequest<'a> {
        SendRequest {
            service_id: &self.config.service_id,
            template_id: &self.config.template_id,
            user_id: &self.config.public_key,
            access_token: self.config.private_key.as_deref(),
            template_params: TemplateParams {
                from_name: &message.from_name,
                from_email: &message.from_email,
                message: &message.message,
                to_email: &message.to_email,
                captcha_response: &message.captcha_response,
            },
        }
    }
}

#[async_trait::async_trait]
impl Relay for EmailJsRelay {
    async fn send(&self, message: &RelayMessage) -> Result<(), RelayError> {
        let response = self
            .client
            .post(&self.config.endpoint)
            .json(&self.request_body(message))
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            // The relay explains rejections (bad captcha, quota) in the body.
            let body = response.text().await.unwrap_or_default();
            let detail = if body.trim().is_empty() {
                status.to_string()
            } else {
                body.trim().to_string()
            };
            return Err(RelayError::new(
                FailureKind::HttpStatus(status.as_u16()),
                detail,
            ));
        }
        Ok(())
    }
}

fn map_reqwest_error(err: reqwest::Error) -> RelayError {
    if err.is_timeout() {
        return RelayError::new(FailureKind::Timeout, err.to_string());
    }
    RelayError::new(FailureKind::Network, err.to_string())
}
