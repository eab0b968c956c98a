//! Invite workflow notifications.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{error, warn};

use qrfolio_core::config::EmailConfig;
use qrfolio_core::traits::{EmailMessage, Mailer};

use super::templates;

/// Subject of the admin notification for a new access request.
pub const SUBJECT_ACCESS_REQUEST: &str = "New Access Request - QR Payment Portfolio";
/// Subject of the approval email.
pub const SUBJECT_APPROVED: &str = "Your Access Request Has Been Approved - QR Payment Portfolio";
/// Subject of the rejection email.
pub const SUBJECT_REJECTED: &str = "Access Request Update - QR Payment Portfolio";

/// Renders and delivers the invite workflow emails.
///
/// Delivery is best-effort: failures are logged and reported as `false`,
/// never propagated to the caller.
#[derive(Debug, Clone)]
pub struct NotificationService {
    mailer: Arc<dyn Mailer>,
    admin_address: Option<String>,
    app_url: String,
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(mailer: Arc<dyn Mailer>, config: &EmailConfig) -> Self {
        Self {
            mailer,
            admin_address: config
                .admin_address
                .clone()
                .filter(|a| !a.trim().is_empty()),
            app_url: config.app_url.trim_end_matches('/').to_string(),
        }
    }

    /// Tell the administrator about a new access request. Skipped when no
    /// admin address is configured.
    pub async fn access_requested(&self, name: &str, email: &str, reason: Option<&str>) -> bool {
        let Some(admin) = self.admin_address.clone() else {
            warn!(requester = %email, "No admin address configured; access request not announced");
            return false;
        };
        self.deliver(EmailMessage {
            to: admin,
            subject: SUBJECT_ACCESS_REQUEST.to_string(),
            html: templates::access_request(name, email, reason, &self.app_url),
        })
        .await
    }

    /// Send the registration phrase to an approved requester.
    pub async fn access_approved(
        &self,
        to: &str,
        name: &str,
        phrase: &str,
        expires_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> bool {
        self.deliver(EmailMessage {
            to: to.to_string(),
            subject: SUBJECT_APPROVED.to_string(),
            html: templates::access_approved(name, phrase, expires_at, &self.app_url, now),
        })
        .await
    }

    /// Tell a requester their request was declined.
    pub async fn access_rejected(&self, to: &str, name: &str, now: DateTime<Utc>) -> bool {
        self.deliver(EmailMessage {
            to: to.to_string(),
            subject: SUBJECT_REJECTED.to_string(),
            html: templates::access_rejected(name, &self.app_url, now),
        })
        .await
    }

    async fn deliver(&self, message: EmailMessage) -> bool {
        match self.mailer.send(&message).await {
            Ok(sent) => sent,
            Err(e) => {
                error!(
                    to = %message.to,
                    subject = %message.subject,
                    error = %e,
                    source = ?e.source,
                    "Failed to send email"
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use qrfolio_core::error::AppError;
    use qrfolio_core::result::AppResult;
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct Outbox {
        sent: Mutex<Vec<EmailMessage>>,
        fail: bool,
    }

    #[async_trait]
    impl Mailer for Outbox {
        async fn send(&self, message: &EmailMessage) -> AppResult<bool> {
            if self.fail {
                return Err(AppError::external("provider down"));
            }
            self.sent.lock().unwrap().push(message.clone());
            Ok(true)
        }
    }

    fn config(admin: Option<&str>) -> EmailConfig {
        EmailConfig {
            admin_address: admin.map(str::to_string),
            app_url: "https://qr.example.com/".to_string(),
            ..EmailConfig::default()
        }
    }

    #[tokio::test]
    async fn test_access_request_goes_to_admin() {
        let outbox = Arc::new(Outbox::default());
        let service = NotificationService::new(outbox.clone(), &config(Some("admin@example.com")));

        assert!(service.access_requested("Ann", "ann@example.com", None).await);
        let sent = outbox.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "admin@example.com");
        assert_eq!(sent[0].subject, SUBJECT_ACCESS_REQUEST);
        assert!(sent[0].html.contains("https://qr.example.com/admin/access-requests"));
    }

    #[tokio::test]
    async fn test_access_request_skipped_without_admin() {
        let outbox = Arc::new(Outbox::default());
        let service = NotificationService::new(outbox.clone(), &config(None));

        assert!(!service.access_requested("Ann", "ann@example.com", None).await);
        assert!(outbox.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delivery_failure_is_swallowed() {
        let outbox = Arc::new(Outbox {
            fail: true,
            ..Outbox::default()
        });
        let service = NotificationService::new(outbox, &config(None));

        assert!(!service.access_rejected("ann@example.com", "Ann", Utc::now()).await);
    }
}
