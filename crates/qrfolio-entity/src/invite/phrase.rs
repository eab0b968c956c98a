//! Registration phrase entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Single-use invite phrase that gates account creation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationPhrase {
    pub id: Uuid,
    /// `adjective-noun-NNNN`.
    pub phrase: String,
    pub is_used: bool,
    pub used_by: Option<Uuid>,
    pub used_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    /// Email of the issuing administrator.
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

/// Why a phrase cannot be redeemed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhraseRejection {
    Used,
    Expired,
}

impl RegistrationPhrase {
    /// Check whether the phrase may be redeemed at `now`.
    pub fn rejection_at(&self, now: DateTime<Utc>) -> Option<PhraseRejection> {
        if self.is_used {
            return Some(PhraseRejection::Used);
        }
        match self.expires_at {
            Some(deadline) if deadline < now => Some(PhraseRejection::Expired),
            _ => None,
        }
    }
}

/// Data required to insert a phrase.
#[derive(Debug, Clone)]
pub struct CreatePhrase {
    pub phrase: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_by: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn phrase() -> RegistrationPhrase {
        RegistrationPhrase {
            id: Uuid::new_v4(),
            phrase: "swift-river-1234".to_string(),
            is_used: false,
            used_by: None,
            used_at: None,
            expires_at: None,
            created_by: "admin@example.com".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_rejections() {
        let now = Utc::now();
        assert_eq!(phrase().rejection_at(now), None);

        let mut used = phrase();
        used.is_used = true;
        assert_eq!(used.rejection_at(now), Some(PhraseRejection::Used));

        let mut expired = phrase();
        expired.expires_at = Some(now - Duration::minutes(1));
        assert_eq!(expired.rejection_at(now), Some(PhraseRejection::Expired));
    }
}
