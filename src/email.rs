//! Outbound email delivery seam.
//!
//! The account flows treat email as fire-and-forget: a failed delivery is
//! logged and never affects the request that triggered it. The `EmailSender`
//! trait is the integration point for a real provider (SMTP, API, ...); the
//! default `LogEmailSender` just logs the payload, which is what local dev
//! wants.

use anyhow::{Context, Result};
use serde_json::json;
use tracing::info;

#[derive(Clone, Debug)]
pub struct EmailMessage {
    pub to_email: String,
    pub template: String,
    pub payload_json: String,
}

/// Email delivery abstraction.
pub trait EmailSender: Send + Sync {
    /// Deliver a message or return an error to be logged by the caller.
    fn send(&self, message: &EmailMessage) -> Result<()>;
}

/// Local dev sender that logs the payload instead of sending real email.
#[derive(Clone, Debug)]
pub struct LogEmailSender;

impl EmailSender for LogEmailSender {
    fn send(&self, message: &EmailMessage) -> Result<()> {
        info!(
            to_email = %message.to_email,
            template = %message.template,
            payload = %message.payload_json,
            "email send stub"
        );
        Ok(())
    }
}

/// Build the verification message for a freshly issued token.
///
/// # Errors
/// Returns an error if the payload cannot be serialized.
pub fn verification_message(email: &str, verify_url: &str) -> Result<EmailMessage> {
    let payload = json!({
        "email": email,
        "verify_url": verify_url,
    });
    Ok(EmailMessage {
        to_email: email.to_string(),
        template: "verify_email".to_string(),
        payload_json: serde_json::to_string(&payload).context("failed to serialize email payload")?,
    })
}

/// Build the link included in verification emails.
#[must_use]
pub fn build_verify_url(frontend_base_url: &str, token: &str) -> String {
    let base = frontend_base_url.trim_end_matches('/');
    format!("{base}/verify-email?token={token}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn build_verify_url_trims_trailing_slash() {
        let url = build_verify_url("http://localhost:3000/", "tok");
        assert_eq!(url, "http://localhost:3000/verify-email?token=tok");
    }

    #[test]
    fn verification_message_carries_the_link() {
        let message = verification_message("alice@example.com", "http://x/verify-email?token=t")
            .unwrap();
        assert_eq!(message.to_email, "alice@example.com");
        assert_eq!(message.template, "verify_email");
        let payload: serde_json::Value = serde_json::from_str(&message.payload_json).unwrap();
        assert_eq!(
            payload.get("verify_url").and_then(serde_json::Value::as_str),
            Some("http://x/verify-email?token=t")
        );
    }

    #[test]
    fn log_sender_always_succeeds() {
        let message = verification_message("bob@example.com", "http://x/v?token=t").unwrap();
        assert!(LogEmailSender.send(&message).is_ok());
    }
}
