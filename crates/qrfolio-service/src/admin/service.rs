//! Administrator operations.

use std::sync::Arc;

use chrono::Duration;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use qrfolio_auth::generate_phrase;
use qrfolio_core::config::{AuthConfig, MAX_EXPIRY_HOURS_LIMIT};
use qrfolio_core::error::{AppError, ErrorKind};
use qrfolio_core::result::AppResult;
use qrfolio_core::traits::Clock;
use qrfolio_database::repositories::{AccessRequestRepository, PhraseRepository, UserRepository};
use qrfolio_entity::invite::{AccessRequest, AccessRequestStatus, CreatePhrase, RegistrationPhrase};
use qrfolio_entity::user::User;

use crate::context::RequestContext;
use crate::notification::NotificationService;

const PHRASE_ATTEMPTS: usize = 5;

/// Outcome an administrator picks for an access request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewDecision {
    Approved,
    Rejected,
}

impl From<ReviewDecision> for AccessRequestStatus {
    fn from(decision: ReviewDecision) -> Self {
        match decision {
            ReviewDecision::Approved => AccessRequestStatus::Approved,
            ReviewDecision::Rejected => AccessRequestStatus::Rejected,
        }
    }
}

/// Dashboard counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub total_users: i64,
    pub total_phrases: i64,
    pub pending_requests: i64,
}

/// Phrase management, access request review and user listing.
///
/// Callers must already be verified administrators; the API layer re-checks
/// the stored admin flag before any of these run.
#[derive(Debug, Clone)]
pub struct AdminService {
    users: Arc<UserRepository>,
    phrases: Arc<PhraseRepository>,
    requests: Arc<AccessRequestRepository>,
    notifier: Arc<NotificationService>,
    clock: Arc<dyn Clock>,
    approval_phrase_ttl: Duration,
}

impl AdminService {
    /// Creates a new admin service.
    pub fn new(
        users: Arc<UserRepository>,
        phrases: Arc<PhraseRepository>,
        requests: Arc<AccessRequestRepository>,
        notifier: Arc<NotificationService>,
        clock: Arc<dyn Clock>,
        config: &AuthConfig,
    ) -> Self {
        Self {
            users,
            phrases,
            requests,
            notifier,
            clock,
            approval_phrase_ttl: Duration::hours(
                config
                    .approval_phrase_ttl_hours
                    .clamp(1, MAX_EXPIRY_HOURS_LIMIT),
            ),
        }
    }

    /// Mint a registration phrase, optionally expiring after `expires_in_hours`.
    pub async fn generate_phrase(
        &self,
        ctx: &RequestContext,
        expires_in_hours: Option<i64>,
    ) -> AppResult<RegistrationPhrase> {
        let ttl = expires_in_hours.map(phrase_ttl).transpose()?;
        let phrase = self.mint_phrase(&ctx.email, ttl).await?;
        info!(admin = %ctx.email, phrase_id = %phrase.id, "Registration phrase generated");
        Ok(phrase)
    }

    /// Insert a fresh phrase, retrying on the rare collision.
    async fn mint_phrase(
        &self,
        created_by: &str,
        ttl: Option<Duration>,
    ) -> AppResult<RegistrationPhrase> {
        let expires_at = match ttl {
            Some(ttl) => Some(
                self.clock
                    .now()
                    .checked_add_signed(ttl)
                    .ok_or_else(|| AppError::validation("expiresIn is out of range"))?,
            ),
            None => None,
        };
        let mut attempt = 0;
        loop {
            attempt += 1;
            let data = CreatePhrase {
                phrase: generate_phrase(),
                expires_at,
                created_by: created_by.to_string(),
            };
            match self.phrases.create(&data).await {
                Err(e) if e.kind == ErrorKind::Conflict && attempt < PHRASE_ATTEMPTS => {
                    warn!(attempt, "Registration phrase collision, retrying");
                }
                result => return result,
            }
        }
    }

    /// Delete a phrase that has not been redeemed yet.
    pub async fn revoke_phrase(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        let phrase = self
            .phrases
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Phrase not found"))?;
        if phrase.is_used {
            return Err(AppError::conflict("Cannot revoke a used phrase"));
        }
        if !self.phrases.delete_unused(id).await? {
            return Err(AppError::conflict("Cannot revoke a used phrase"));
        }
        info!(admin = %ctx.email, phrase_id = %id, "Registration phrase revoked");
        Ok(())
    }

    /// Every phrase, newest first.
    pub async fn list_phrases(&self) -> AppResult<Vec<RegistrationPhrase>> {
        self.phrases.find_all().await
    }

    /// Every access request, newest first.
    pub async fn list_access_requests(&self) -> AppResult<Vec<AccessRequest>> {
        self.requests.find_all().await
    }

    /// Every account, newest first.
    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        self.users.find_all().await
    }

    /// Approve or reject an access request and notify the requester.
    ///
    /// Approval mints a phrase that expires after the configured approval
    /// lifetime. Email delivery failures are logged and do not fail the
    /// review.
    pub async fn review_access_request(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        decision: ReviewDecision,
    ) -> AppResult<AccessRequest> {
        let now = self.clock.now();
        let request = self
            .requests
            .set_status(id, decision.into(), &ctx.email, now)
            .await?
            .ok_or_else(|| AppError::not_found("Access request not found"))?;

        info!(
            admin = %ctx.email,
            request_id = %request.id,
            decision = ?decision,
            "Access request reviewed"
        );

        let delivered = match decision {
            ReviewDecision::Approved => {
                let phrase = self
                    .mint_phrase(&ctx.email, Some(self.approval_phrase_ttl))
                    .await?;
                self.notifier
                    .access_approved(&request.email, &request.name, &phrase.phrase, phrase.expires_at, now)
                    .await
            }
            ReviewDecision::Rejected => {
                self.notifier
                    .access_rejected(&request.email, &request.name, now)
                    .await
            }
        };
        if !delivered {
            warn!(request_id = %request.id, "Review email was not delivered");
        }

        Ok(request)
    }

    /// Dashboard counters.
    pub async fn stats(&self) -> AppResult<AdminStats> {
        Ok(AdminStats {
            total_users: self.users.count().await?,
            total_phrases: self.phrases.count().await?,
            pending_requests: self.requests.count_pending().await?,
        })
    }
}

/// Lifetime of an admin-generated phrase, within `1..=MAX_EXPIRY_HOURS_LIMIT`.
fn phrase_ttl(hours: i64) -> AppResult<Duration> {
    if !(1..=MAX_EXPIRY_HOURS_LIMIT).contains(&hours) {
        return Err(AppError::validation(format!(
            "expiresIn must be between 1 and {MAX_EXPIRY_HOURS_LIMIT} hours"
        )));
    }
    Ok(Duration::hours(hours))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_wire_format() {
        let d: ReviewDecision = serde_json::from_str(r#""approved""#).unwrap();
        assert_eq!(d, ReviewDecision::Approved);
        assert!(serde_json::from_str::<ReviewDecision>(r#""pending""#).is_err());
        assert_eq!(
            AccessRequestStatus::from(ReviewDecision::Rejected),
            AccessRequestStatus::Rejected
        );
    }

    #[test]
    fn test_phrase_ttl_bounds() {
        assert_eq!(phrase_ttl(48).unwrap(), Duration::hours(48));
        assert_eq!(
            phrase_ttl(MAX_EXPIRY_HOURS_LIMIT).unwrap(),
            Duration::hours(MAX_EXPIRY_HOURS_LIMIT)
        );
        for hours in [0, -1, MAX_EXPIRY_HOURS_LIMIT + 1, i64::MAX] {
            assert_eq!(phrase_ttl(hours).unwrap_err().kind, ErrorKind::Validation);
        }
    }

    #[test]
    fn test_stats_shape() {
        let json = serde_json::to_value(AdminStats {
            total_users: 3,
            total_phrases: 5,
            pending_requests: 1,
        })
        .unwrap();
        assert_eq!(json["totalUsers"], 3);
        assert_eq!(json["pendingRequests"], 1);
    }
}
