use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

const SERVICE_ID_VAR: &str = "EMAILJS_SERVICE_ID";
const TEMPLATE_ID_VAR: &str = "EMAILJS_TEMPLATE_ID";
const PUBLIC_KEY_VAR: &str = "EMAILJS_PUBLIC_KEY";
const PRIVATE_KEY_VAR: &str = "EMAILJS_PRIVATE_KEY";
const SITE_KEY_VAR: &str = "RECAPTCHA_SITE_KEY";
const TO_EMAIL_VAR: &str = "CONTACT_TO_EMAIL";
const ENDPOINT_VAR: &str = "EMAILJS_API_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("relay not configured; set {}", .missing.join(", "))]
    NotConfigured { missing: Vec<&'static str> },
    #[error("invalid relay endpoint {endpoint}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
    #[error("http client: {0}")]
    Client(String),
}

/// Relay and CAPTCHA settings, normally read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    /// Access token for server-side calls; the browser flow does without.
    pub private_key: Option<String>,
    pub captcha_site_key: String,
    pub to_email: Option<String>,
    pub endpoint: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            service_id: "YOUR_SERVICE_ID".to_string(),
            template_id: "YOUR_TEMPLATE_ID".to_string(),
            public_key: "YOUR_PUBLIC_KEY".to_string(),
            private_key: None,
            captcha_site_key: "YOUR_RECAPTCHA_SITE_KEY".to_string(),
            to_email: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

impl RelayConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; unset keys keep their placeholders.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let optional = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        Self {
            service_id: lookup(SERVICE_ID_VAR).unwrap_or(defaults.service_id),
            template_id: lookup(TEMPLATE_ID_VAR).unwrap_or(defaults.template_id),
            public_key: lookup(PUBLIC_KEY_VAR).unwrap_or(defaults.public_key),
            private_key: optional(PRIVATE_KEY_VAR),
            captcha_site_key: lookup(SITE_KEY_VAR).unwrap_or(defaults.captcha_site_key),
            to_email: optional(TO_EMAIL_VAR),
            endpoint: optional(ENDPOINT_VAR).unwrap_or(defaults.endpoint),
        }
    }

    /// Names of the relay and CAPTCHA settings still unset or left as
    /// placeholders.
    pub fn missing_settings(&self) -> Vec<&'static str> {
        [
            (SERVICE_ID_VAR, &self.service_id),
            (TEMPLATE_ID_VAR, &self.template_id),
            (PUBLIC_KEY_VAR, &self.public_key),
            (SITE_KEY_VAR, &self.captcha_site_key),
        ]
        .into_iter()
        .filter(|(_, value)| is_placeholder(value))
        .map(|(name, _)| name)
        .collect()
    }

    pub fn is_configured(&self) -> bool {
        self.missing_settings().is_empty()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let missing = self.missing_settings();
        if !missing.is_empty() {
            return Err(ConfigError::NotConfigured { missing });
        }
        reqwest::Url::parse(&self.endpoint).map_err(|err| ConfigError::InvalidEndpoint {
            endpoint: self.endpoint.clone(),
            reason: err.to_string(),
        })?;
        Ok(())
    }
}

/// Blank values and `YOUR_...` sentinels count as unset.
pub fn is_placeholder(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || trimmed.starts_with("YOUR_")
}

#[derive(Debug, Clone)]
pub struct RelaySettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for RelaySettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}
