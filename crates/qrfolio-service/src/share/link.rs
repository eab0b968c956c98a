//! Share link token generation.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;

use qrfolio_core::config::share::MIN_TOKEN_BYTES;

/// Produces unguessable URL-safe share tokens.
#[derive(Debug, Clone)]
pub struct TokenGenerator {
    bytes: usize,
}

impl TokenGenerator {
    /// Generator emitting `bytes` random bytes per token (at least 32).
    pub fn new(bytes: usize) -> Self {
        Self {
            bytes: bytes.max(MIN_TOKEN_BYTES),
        }
    }

    /// Number of random bytes behind each token.
    pub fn byte_len(&self) -> usize {
        self.bytes
    }

    /// Draw a fresh token from the OS-seeded CSPRNG, base64url without padding.
    pub fn generate(&self) -> String {
        let mut buf = vec![0u8; self.bytes];
        rand::rng().fill_bytes(&mut buf);
        URL_SAFE_NO_PAD.encode(buf)
    }
}

impl Default for TokenGenerator {
    fn default() -> Self {
        Self::new(MIN_TOKEN_BYTES)
    }
}

/// Shortened token safe to put in logs.
pub(crate) fn token_prefix(token: &str) -> String {
    token.chars().take(8).collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_token_encoding() {
        let token = TokenGenerator::default().generate();
        // 32 bytes -> 43 base64url characters without padding.
        assert_eq!(token.len(), 43);
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
        assert_eq!(URL_SAFE_NO_PAD.decode(&token).unwrap().len(), 32);
    }

    #[test]
    fn test_minimum_entropy_enforced() {
        let generator = TokenGenerator::new(4);
        assert_eq!(generator.byte_len(), 32);
        assert_eq!(generator.generate().len(), 43);
    }

    #[test]
    fn test_tokens_are_distinct() {
        let generator = TokenGenerator::default();
        let tokens: HashSet<String> = (0..1000).map(|_| generator.generate()).collect();
        assert_eq!(tokens.len(), 1000);
    }

    #[test]
    fn test_token_prefix() {
        assert_eq!(token_prefix("abcdefghijkl"), "abcdefgh");
        assert_eq!(token_prefix("abc"), "abc");
    }
}
