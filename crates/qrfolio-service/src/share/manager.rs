//! Share link manager: the owner-facing and visitor-facing halves of the
//! link lifecycle.

use std::sync::Arc;

use chrono::Duration;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use qrfolio_core::config::ShareConfig;
use qrfolio_core::error::AppError;
use qrfolio_core::result::AppResult;
use qrfolio_core::traits::Clock;
use qrfolio_database::ShareLinkStore;
use qrfolio_entity::share::{
    LinkState, LinkType, NewShareLink, NewShareLinkLog, ShareLink, ShareLinkLog,
};

use super::link::{TokenGenerator, token_prefix};
use crate::context::{RequestContext, Requester};

/// What kind of link to issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueRequest {
    /// Reusable until `expires_in_hours` from now.
    Expiring {
        /// Lifetime in hours.
        expires_in_hours: i64,
    },
    /// Valid for a single redemption; never expires.
    OneTime,
}

impl IssueRequest {
    /// Build a request from wire fields.
    ///
    /// One-time links ignore `expires_in`; expiring links require it.
    pub fn from_parts(link_type: LinkType, expires_in: Option<i64>) -> AppResult<Self> {
        match (link_type, expires_in) {
            (LinkType::OneTime, _) => Ok(Self::OneTime),
            (LinkType::Expiring, Some(hours)) => Ok(Self::Expiring {
                expires_in_hours: hours,
            }),
            (LinkType::Expiring, None) => Err(AppError::validation(
                "expiresIn is required for expiring links",
            )),
        }
    }
}

/// A link together with the URL to hand out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedLink {
    /// `{public_base_url}/share/{token}`.
    pub url: String,
    /// The stored link.
    #[serde(flatten)]
    pub link: ShareLink,
}

/// Why a visitor was turned away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// No link has this token (never issued or revoked).
    NotFound,
    /// One-time link already redeemed.
    AlreadyUsed,
    /// Expiring link past its deadline.
    Expired,
    /// The check itself failed.
    ValidationError,
}

impl RejectReason {
    /// Stable machine-readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::AlreadyUsed => "already_used",
            Self::Expired => "expired",
            Self::ValidationError => "validation_error",
        }
    }
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of presenting a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkValidation {
    /// Access granted; carries the link as updated by this redemption.
    Valid(ShareLink),
    /// Access refused.
    Rejected(RejectReason),
}

impl LinkValidation {
    /// Whether access was granted.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// The rejection reason, if any.
    pub fn reason(&self) -> Option<RejectReason> {
        match self {
            Self::Valid(_) => None,
            Self::Rejected(reason) => Some(*reason),
        }
    }
}

/// Issues, redeems and revokes share links.
#[derive(Debug, Clone)]
pub struct ShareLinkManager {
    store: Arc<dyn ShareLinkStore>,
    clock: Arc<dyn Clock>,
    tokens: TokenGenerator,
    public_base_url: String,
    max_expiry_hours: i64,
}

impl ShareLinkManager {
    /// Creates a new share link manager.
    pub fn new(store: Arc<dyn ShareLinkStore>, clock: Arc<dyn Clock>, config: &ShareConfig) -> Self {
        Self {
            store,
            clock,
            tokens: TokenGenerator::new(config.effective_token_bytes()),
            public_base_url: config.public_base_url.trim_end_matches('/').to_string(),
            max_expiry_hours: config.effective_max_expiry_hours(),
        }
    }

    /// Public URL for a token.
    pub fn url_for(&self, token: &str) -> String {
        format!("{}/share/{}", self.public_base_url, token)
    }

    /// Create a link for the caller.
    ///
    /// Nothing is persisted when the requested lifetime is out of range.
    pub async fn issue(&self, ctx: &RequestContext, request: IssueRequest) -> AppResult<SharedLink> {
        let now = self.clock.now();
        let (link_type, expires_at) = match request {
            IssueRequest::Expiring { expires_in_hours } => {
                if !(1..=self.max_expiry_hours).contains(&expires_in_hours) {
                    return Err(AppError::validation(format!(
                        "expiresIn must be between 1 and {} hours",
                        self.max_expiry_hours
                    )));
                }
                let expires_at = Duration::try_hours(expires_in_hours)
                    .and_then(|lifetime| now.checked_add_signed(lifetime))
                    .ok_or_else(|| AppError::validation("expiresIn is out of range"))?;
                (LinkType::Expiring, Some(expires_at))
            }
            IssueRequest::OneTime => (LinkType::OneTime, None),
        };

        let link = self
            .store
            .insert(&NewShareLink {
                user_id: ctx.user_id,
                token: self.tokens.generate(),
                link_type,
                expires_at,
                created_at: now,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            link_id = %link.id,
            link_type = %link_type,
            expires_at = ?expires_at,
            "Share link issued"
        );

        Ok(SharedLink {
            url: self.url_for(&link.token),
            link,
        })
    }

    /// Redeem `token` on behalf of an anonymous visitor.
    ///
    /// Never returns an error: infrastructure failures are logged and
    /// reported as [`RejectReason::ValidationError`].
    pub async fn validate(&self, token: &str, requester: &Requester) -> LinkValidation {
        match self.redeem(token, requester).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(
                    token = %token_prefix(token),
                    error = %e,
                    source = ?e.source,
                    "Share link validation failed"
                );
                LinkValidation::Rejected(RejectReason::ValidationError)
            }
        }
    }

    async fn redeem(&self, token: &str, requester: &Requester) -> AppResult<LinkValidation> {
        let now = self.clock.now();

        let Some(link) = self.store.find_by_token(token).await? else {
            debug!(token = %token_prefix(token), "Unknown share token");
            return Ok(LinkValidation::Rejected(RejectReason::NotFound));
        };

        match link.state_at(now) {
            LinkState::Consumed => {
                debug!(link_id = %link.id, "One-time link already used");
                return Ok(LinkValidation::Rejected(RejectReason::AlreadyUsed));
            }
            LinkState::Expired => {
                debug!(link_id = %link.id, "Share link expired");
                return Ok(LinkValidation::Rejected(RejectReason::Expired));
            }
            LinkState::Active => {}
        }

        // Lost the race to another redemption, to the deadline, or to a revoke.
        let Some(redeemed) = self.store.record_access(link.id, now).await? else {
            let reason = match link.link_type() {
                LinkType::OneTime => RejectReason::AlreadyUsed,
                LinkType::Expiring => RejectReason::Expired,
            };
            debug!(link_id = %link.id, reason = %reason, "Share link redemption refused");
            return Ok(LinkValidation::Rejected(reason));
        };

        if !requester.is_empty() {
            let entry = NewShareLinkLog {
                share_link_id: redeemed.id,
                ip_address: requester.ip_address.clone(),
                user_agent: requester.user_agent.clone(),
                accessed_at: now,
            };
            if let Err(e) = self.store.append_log(&entry).await {
                warn!(link_id = %redeemed.id, error = %e, "Failed to record share access log");
            }
        }

        info!(
            link_id = %redeemed.id,
            link_type = %redeemed.link_type(),
            access_count = redeemed.access_count,
            "Share link redeemed"
        );
        Ok(LinkValidation::Valid(redeemed))
    }

    /// Delete one of the caller's links.
    ///
    /// Revoking a link that does not exist or belongs to someone else is a
    /// silent no-op.
    pub async fn revoke(&self, ctx: &RequestContext, link_id: Uuid) -> AppResult<()> {
        let removed = self.store.delete_owned(link_id, ctx.user_id).await?;
        if removed {
            info!(user_id = %ctx.user_id, link_id = %link_id, "Share link revoked");
        } else {
            debug!(user_id = %ctx.user_id, link_id = %link_id, "Revoke matched no owned link");
        }
        Ok(())
    }

    /// The caller's links, newest first.
    pub async fn list(&self, ctx: &RequestContext) -> AppResult<Vec<SharedLink>> {
        let links = self.store.list_by_owner(ctx.user_id).await?;
        Ok(links
            .into_iter()
            .map(|link| SharedLink {
                url: self.url_for(&link.token),
                link,
            })
            .collect())
    }

    /// Access history of one of the caller's links, newest first.
    pub async fn access_logs(
        &self,
        ctx: &RequestContext,
        link_id: Uuid,
    ) -> AppResult<Vec<ShareLinkLog>> {
        self.store
            .find_owned(link_id, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Share link not found"))?;
        self.store.list_logs(link_id).await
    }
}
