//! Instance-scoped CAPTCHA widget handle.
//!
//! The widget integration reports through a [`CaptchaVerifier`]; the page
//! owns the [`CaptchaWidgetHandle`] and resolves tokens through
//! [`CaptchaWidgetHandle::wait_for_token`].

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::watch;

#[derive(Debug, Clone, PartialEq, Eq)]
enum WidgetState {
    Pending,
    Verified(String),
    Expired,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptchaError {
    #[error("captcha token expired")]
    Expired,
}

/// Creates a connected widget handle and verifier for one page instance.
pub fn captcha_channel(site_key: impl Into<String>) -> (CaptchaWidgetHandle, CaptchaVerifier) {
    let (tx, rx) = watch::channel(WidgetState::Pending);
    let tx = Arc::new(tx);
    let site_key: String = site_key.into();
    let handle = CaptchaWidgetHandle {
        site_key: Arc::from(site_key),
        tx: tx.clone(),
        rx,
    };
    (handle, CaptchaVerifier { tx })
}

#[derive(Debug, Clone)]
pub struct CaptchaWidgetHandle {
    site_key: Arc<str>,
    tx: Arc<watch::Sender<WidgetState>>,
    rx: watch::Receiver<WidgetState>,
}

impl CaptchaWidgetHandle {
    pub fn site_key(&self) -> &str {
        &self.site_key
    }

    /// Resolves with the next token the widget issues.
    ///
    /// Fails with `CaptchaError::Expired` when the widget expires the
    /// challenge instead. Resets done through this handle are skipped.
    pub async fn wait_for_token(&mut self) -> Result<String, CaptchaError> {
        loop {
            if self.rx.changed().await.is_err() {
                // Unreachable while this handle holds a sender.
                std::future::pending::<()>().await;
            }
            let state = self.rx.borrow_and_update().clone();
            match state {
                WidgetState::Verified(token) => return Ok(token),
                WidgetState::Expired => return Err(CaptchaError::Expired),
                WidgetState::Pending => continue,
            }
        }
    }

    /// Clears the widget so the next submission needs a fresh challenge.
    pub fn reset(&self) {
        self.tx.send_replace(WidgetState::Pending);
    }

    /// Whether the widget currently holds an unexpired token.
    #[cfg(test)]
    pub(crate) fn has_token(&self) -> bool {
        matches!(*self.rx.borrow(), WidgetState::Verified(_))
    }
}

/// Reporting side held by the widget integration.
#[derive(Debug, Clone)]
pub struct CaptchaVerifier {
    tx: Arc<watch::Sender<WidgetState>>,
}

impl CaptchaVerifier {
    pub fn verified(&self, token: impl Into<String>) {
        self.tx.send_replace(WidgetState::Verified(token.into()));
    }

    pub fn expired(&self) {
        self.tx.send_replace(WidgetState::Expired);
    }
}
