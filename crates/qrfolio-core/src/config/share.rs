//! Share link configuration.

use serde::{Deserialize, Serialize};

/// Smallest accepted token size; 32 bytes gives 256 bits of entropy.
pub const MIN_TOKEN_BYTES: usize = 32;

/// Ceiling for `max_expiry_hours`; ten years.
pub const MAX_EXPIRY_HOURS_LIMIT: i64 = 24 * 365 * 10;

/// Share link issuance settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareConfig {
    /// Base URL embedded in generated share URLs (e.g. `https://pay.example.com`).
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
    /// Number of random bytes per token. Values below 32 are raised to 32.
    #[serde(default = "default_token_bytes")]
    pub token_bytes: usize,
    /// Upper bound for `expires_in_hours` on expiring links. Clamped to
    /// `1..=MAX_EXPIRY_HOURS_LIMIT`.
    #[serde(default = "default_max_expiry_hours")]
    pub max_expiry_hours: i64,
}

impl ShareConfig {
    /// Token size actually used for generation.
    pub fn effective_token_bytes(&self) -> usize {
        self.token_bytes.max(MIN_TOKEN_BYTES)
    }

    /// Expiry ceiling actually enforced.
    pub fn effective_max_expiry_hours(&self) -> i64 {
        self.max_expiry_hours.clamp(1, MAX_EXPIRY_HOURS_LIMIT)
    }
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            public_base_url: default_public_base_url(),
            token_bytes: default_token_bytes(),
            max_expiry_hours: default_max_expiry_hours(),
        }
    }
}

fn default_public_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_token_bytes() -> usize {
    MIN_TOKEN_BYTES
}

fn default_max_expiry_hours() -> i64 {
    720
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_bytes_floor() {
        let config = ShareConfig {
            token_bytes: 8,
            ..ShareConfig::default()
        };
        assert_eq!(config.effective_token_bytes(), 32);

        let config = ShareConfig {
            token_bytes: 48,
            ..ShareConfig::default()
        };
        assert_eq!(config.effective_token_bytes(), 48);
    }

    #[test]
    fn test_max_expiry_hours_clamped() {
        let config = ShareConfig {
            max_expiry_hours: i64::MAX,
            ..ShareConfig::default()
        };
        assert_eq!(config.effective_max_expiry_hours(), MAX_EXPIRY_HOURS_LIMIT);

        let config = ShareConfig {
            max_expiry_hours: -5,
            ..ShareConfig::default()
        };
        assert_eq!(config.effective_max_expiry_hours(), 1);

        assert_eq!(ShareConfig::default().effective_max_expiry_hours(), 720);
    }
}
