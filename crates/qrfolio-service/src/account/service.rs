//! Invite-gated registration and password login.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;
use validator::ValidateEmail;

use qrfolio_auth::jwt::IssuedToken;
use qrfolio_auth::{JwtEncoder, PasswordHasher, PasswordPolicy};
use qrfolio_core::error::AppError;
use qrfolio_core::result::AppResult;
use qrfolio_core::traits::Clock;
use qrfolio_database::repositories::{PhraseRepository, UserRepository};
use qrfolio_entity::invite::PhraseRejection;
use qrfolio_entity::user::{CreateUser, User};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Self-service sign-up fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterInput {
    pub registration_phrase: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// A user together with a freshly signed access token.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub user: User,
    pub token: IssuedToken,
}

/// Normalize an email for storage and lookup.
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Field checks that need no database access.
fn check_input(input: &RegisterInput, policy: &PasswordPolicy) -> AppResult<()> {
    if input.registration_phrase.trim().is_empty() {
        return Err(AppError::validation("Registration phrase is required"));
    }
    if input.name.trim().chars().count() < 2 {
        return Err(AppError::validation("Name must be at least 2 characters"));
    }
    if !normalize_email(&input.email).validate_email() {
        return Err(AppError::validation("Invalid email address"));
    }
    policy.validate(&input.password)?;
    policy.validate_confirmation(&input.password, &input.confirm_password)
}

/// Creates accounts and signs users in.
#[derive(Debug, Clone)]
pub struct AccountService {
    users: Arc<UserRepository>,
    phrases: Arc<PhraseRepository>,
    hasher: Arc<PasswordHasher>,
    policy: PasswordPolicy,
    encoder: Arc<JwtEncoder>,
    clock: Arc<dyn Clock>,
}

impl AccountService {
    /// Creates a new account service.
    pub fn new(
        users: Arc<UserRepository>,
        phrases: Arc<PhraseRepository>,
        hasher: Arc<PasswordHasher>,
        policy: PasswordPolicy,
        encoder: Arc<JwtEncoder>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            phrases,
            hasher,
            policy,
            encoder,
            clock,
        }
    }

    /// Redeem a registration phrase and create the account.
    ///
    /// The phrase is consumed, the user inserted and default settings
    /// created in one transaction.
    pub async fn register(&self, input: RegisterInput) -> AppResult<AuthSession> {
        check_input(&input, &self.policy)?;
        let now = self.clock.now();
        let email = normalize_email(&input.email);

        let phrase = self
            .phrases
            .find_by_phrase(input.registration_phrase.trim())
            .await?
            .ok_or_else(|| AppError::validation("Invalid registration phrase"))?;

        match phrase.rejection_at(now) {
            Some(PhraseRejection::Used) => {
                return Err(AppError::validation(
                    "This registration phrase has already been used",
                ));
            }
            Some(PhraseRejection::Expired) => {
                return Err(AppError::validation("This registration phrase has expired"));
            }
            None => {}
        }

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("An account with this email already exists"));
        }

        let password_hash = self.hasher.hash_password(&input.password)?;
        let data = CreateUser {
            email,
            name: input.name.trim().to_string(),
            password_hash,
            is_admin: false,
            registration_phrase_id: Some(phrase.id),
        };

        let Some(user) = self.users.register_with_phrase(&data, phrase.id, now).await? else {
            warn!(phrase_id = %phrase.id, "Registration phrase claimed concurrently");
            return Err(AppError::validation(
                "This registration phrase has already been used",
            ));
        };

        info!(user_id = %user.id, phrase_id = %phrase.id, "User registered");
        let token = self.encoder.issue(&user)?;
        Ok(AuthSession { user, token })
    }

    /// Verify credentials and issue a token.
    ///
    /// Unknown email and wrong password are indistinguishable to the caller.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<AuthSession> {
        let user = self
            .users
            .find_by_email(&normalize_email(email))
            .await?
            .ok_or_else(|| AppError::authentication(INVALID_CREDENTIALS))?;

        if !self.hasher.verify_password(password, &user.password_hash)? {
            warn!(user_id = %user.id, "Login failed: wrong password");
            return Err(AppError::authentication(INVALID_CREDENTIALS));
        }

        info!(user_id = %user.id, "Login successful");
        let token = self.encoder.issue(&user)?;
        Ok(AuthSession { user, token })
    }

    /// The stored account behind a token.
    pub async fn me(&self, user_id: Uuid) -> AppResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qrfolio_core::config::AuthConfig;
    use qrfolio_core::error::ErrorKind;

    fn input() -> RegisterInput {
        RegisterInput {
            registration_phrase: "swift-owl-1234".to_string(),
            name: "Ann".to_string(),
            email: " Ann@Example.com ".to_string(),
            password: "Sup3rSecret".to_string(),
            confirm_password: "Sup3rSecret".to_string(),
        }
    }

    fn policy() -> PasswordPolicy {
        PasswordPolicy::new(&AuthConfig::default())
    }

    fn message(input: &RegisterInput) -> Option<String> {
        check_input(input, &policy()).err().map(|e| {
            assert_eq!(e.kind, ErrorKind::Validation);
            e.message
        })
    }

    #[test]
    fn test_valid_input() {
        assert_eq!(message(&input()), None);
    }

    #[test]
    fn test_field_rules() {
        let mut i = input();
        i.registration_phrase = " ".to_string();
        assert_eq!(message(&i).as_deref(), Some("Registration phrase is required"));

        let mut i = input();
        i.name = " A ".to_string();
        assert_eq!(message(&i).as_deref(), Some("Name must be at least 2 characters"));

        let mut i = input();
        i.email = "not-an-email".to_string();
        assert_eq!(message(&i).as_deref(), Some("Invalid email address"));

        let mut i = input();
        i.password = "short1A".to_string();
        i.confirm_password = i.password.clone();
        assert!(message(&i).is_some());

        let mut i = input();
        i.confirm_password = "Sup3rSecreT".to_string();
        assert_eq!(message(&i).as_deref(), Some("Passwords don't match"));
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email(" Ann@Example.COM "), "ann@example.com");
    }
}
