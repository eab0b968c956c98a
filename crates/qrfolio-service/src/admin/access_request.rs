//! Public access request form.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use validator::ValidateEmail;

use qrfolio_core::error::AppError;
use qrfolio_core::result::AppResult;
use qrfolio_database::repositories::{AccessRequestRepository, UserRepository};
use qrfolio_entity::invite::{AccessRequest, AccessRequestStatus, CreateAccessRequest};

use crate::notification::NotificationService;
use crate::upload::non_blank;

/// Fields a prospective user submits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessRequestInput {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Accepts access requests from visitors without an account.
#[derive(Debug, Clone)]
pub struct AccessRequestService {
    users: Arc<UserRepository>,
    requests: Arc<AccessRequestRepository>,
    notifier: Arc<NotificationService>,
}

impl AccessRequestService {
    /// Creates a new access request service.
    pub fn new(
        users: Arc<UserRepository>,
        requests: Arc<AccessRequestRepository>,
        notifier: Arc<NotificationService>,
    ) -> Self {
        Self {
            users,
            requests,
            notifier,
        }
    }

    /// File a pending request and let the administrator know.
    ///
    /// A previously rejected applicant may apply again; pending or approved
    /// requests block a new one.
    pub async fn submit(&self, input: AccessRequestInput) -> AppResult<AccessRequest> {
        let name = input.name.trim().to_string();
        if name.chars().count() < 2 {
            return Err(AppError::validation("Name must be at least 2 characters"));
        }
        let email = input.email.trim().to_lowercase();
        if !email.validate_email() {
            return Err(AppError::validation("Invalid email address"));
        }

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict(
                "An account with this email already exists. Please sign in instead.",
            ));
        }

        if let Some(existing) = self.requests.find_latest_by_email(&email).await? {
            match existing.status {
                AccessRequestStatus::Pending => {
                    return Err(AppError::conflict(
                        "You have already submitted an access request. Please wait for it to be reviewed.",
                    ));
                }
                AccessRequestStatus::Approved => {
                    return Err(AppError::conflict(
                        "Your access request has already been approved. Please check your email for the registration phrase.",
                    ));
                }
                AccessRequestStatus::Rejected => {
                    self.requests.delete_rejected_by_email(&email).await?;
                }
            }
        }

        let request = self
            .requests
            .create(&CreateAccessRequest {
                email,
                name,
                reason: non_blank(input.reason),
            })
            .await?;
        info!(request_id = %request.id, "Access request submitted");

        self.notifier
            .access_requested(&request.name, &request.email, request.reason.as_deref())
            .await;

        Ok(request)
    }
}
