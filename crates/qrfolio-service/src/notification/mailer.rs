//! [`Mailer`] implementations.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info};

use qrfolio_core::config::EmailConfig;
use qrfolio_core::error::{AppError, ErrorKind};
use qrfolio_core::result::AppResult;
use qrfolio_core::traits::{EmailMessage, Mailer};

#[derive(Serialize)]
struct ResendPayload<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
}

/// Sends mail through the Resend HTTP API.
#[derive(Debug, Clone)]
pub struct ResendMailer {
    client: Client,
    endpoint: String,
    api_key: String,
    from: String,
}

impl ResendMailer {
    /// Build a mailer from config. Returns `None` when no API key is set.
    pub fn from_config(config: &EmailConfig) -> Option<Self> {
        let api_key = config
            .resend_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())?;
        Some(Self::with_client(Client::new(), config, api_key))
    }

    /// Build a mailer around an existing [`Client`].
    pub fn with_client(client: Client, config: &EmailConfig, api_key: &str) -> Self {
        Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: api_key.to_string(),
            from: config.from.clone(),
        }
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, message: &EmailMessage) -> AppResult<bool> {
        let payload = ResendPayload {
            from: &self.from,
            to: &message.to,
            subject: &message.subject,
            html: &message.html,
        };

        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::ExternalService, "Email request failed", e))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AppError::external(format!(
                "Email provider returned HTTP {}: {}",
                status.as_u16(),
                body
            )));
        }

        debug!(to = %message.to, subject = %message.subject, "Email delivered");
        Ok(true)
    }
}

/// Stand-in used when no provider is configured: logs and reports the mail
/// as not sent.
#[derive(Debug, Clone, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: &EmailMessage) -> AppResult<bool> {
        info!(
            to = %message.to,
            subject = %message.subject,
            "Email not sent (no API key configured)"
        );
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resend_requires_key() {
        let mut config = EmailConfig::default();
        assert!(ResendMailer::from_config(&config).is_none());

        config.resend_api_key = Some("   ".to_string());
        assert!(ResendMailer::from_config(&config).is_none());

        config.resend_api_key = Some("re_123".to_string());
        let mailer = ResendMailer::from_config(&config).unwrap();
        assert_eq!(mailer.endpoint, "https://api.resend.com/emails");
        assert_eq!(mailer.from, "onboarding@resend.dev");
    }

    #[tokio::test]
    async fn test_log_mailer_reports_not_sent() {
        let sent = LogMailer
            .send(&EmailMessage {
                to: "a@example.com".to_string(),
                subject: "Hi".to_string(),
                html: "<p>Hi</p>".to_string(),
            })
            .await
            .unwrap();
        assert!(!sent);
    }
}
