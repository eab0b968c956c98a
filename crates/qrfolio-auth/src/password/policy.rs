//! Password rules for new accounts.

use qrfolio_core::config::AuthConfig;
use qrfolio_core::error::AppError;

/// Enforces the registration password policy: a minimum length plus at
/// least one uppercase letter, one lowercase letter and one digit.
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    min_length: usize,
}

impl PasswordPolicy {
    /// Build the policy from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
        }
    }

    /// Check a candidate password, reporting the first violated rule.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        if password.chars().count() < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                self.min_length
            )));
        }
        if !password.chars().any(|c| c.is_uppercase()) {
            return Err(AppError::validation(
                "Password must contain at least one uppercase letter",
            ));
        }
        if !password.chars().any(|c| c.is_lowercase()) {
            return Err(AppError::validation(
                "Password must contain at least one lowercase letter",
            ));
        }
        if !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(AppError::validation(
                "Password must contain at least one number",
            ));
        }
        Ok(())
    }

    /// Check that the confirmation matches.
    pub fn validate_confirmation(&self, password: &str, confirm: &str) -> Result<(), AppError> {
        if password != confirm {
            return Err(AppError::validation("Passwords don't match"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> PasswordPolicy {
        PasswordPolicy::new(&AuthConfig::default())
    }

    #[test]
    fn test_accepts_valid() {
        assert!(policy().validate("Abcdefg1").is_ok());
    }

    #[test]
    fn test_rejections() {
        let p = policy();
        for bad in ["Abc1", "abcdefg1", "ABCDEFG1", "Abcdefgh"] {
            assert!(p.validate(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_confirmation() {
        let p = policy();
        assert!(p.validate_confirmation("Abcdefg1", "Abcdefg1").is_ok());
        assert!(p.validate_confirmation("Abcdefg1", "Abcdefg2").is_err());
    }
}
