//! Secret comparison for the passcode gate.
//!
//! Two comparison methods exist: plain equality against a 4-digit code, or
//! equality of the SHA-256 hex digest of the trimmed input against a stored
//! digest (so the plaintext never appears in the config file). Both run in
//! constant time. A malformed stored digest never matches anything — the
//! gate stays safe-closed rather than erroring.

use crate::config::GateConfig;
use sha2::{Digest, Sha256};

/// SHA-256 hash a code for comparison or storage (never store plaintext).
pub fn hash_code(code: &str) -> String {
    hex::encode(Sha256::digest(code.as_bytes()))
}

/// How the configured secret is matched against user input.
#[derive(Debug, Clone)]
pub enum SecretSpec {
    /// Plaintext equality against the configured 4-digit code.
    Plain(String),
    /// Digest equality: SHA-256 hex of the trimmed input vs the stored hex.
    Sha256(String),
}

impl SecretSpec {
    /// Digest takes precedence when both are configured, matching the
    /// build that shipped with hashing enabled.
    pub fn from_config(gate: &GateConfig) -> Self {
        if let Some(digest) = &gate.secret_sha256 {
            Self::Sha256(digest.trim().to_ascii_lowercase())
        } else {
            Self::Plain(gate.secret_code.clone().unwrap_or_default())
        }
    }

    /// Constant-time match of `input` (trimmed) against the secret.
    pub fn matches(&self, input: &str) -> bool {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return false;
        }
        match self {
            Self::Plain(code) => constant_time_eq(trimmed, code),
            Self::Sha256(stored) => {
                // A digest that cannot possibly be SHA-256 hex rejects
                // everything instead of panicking or falling back.
                if stored.len() != 64 || !stored.chars().all(|c| c.is_ascii_hexdigit()) {
                    return false;
                }
                constant_time_eq(&hash_code(trimmed), stored)
            }
        }
    }
}

/// Constant-time equality comparison for secret strings.
fn constant_time_eq(a: &str, b: &str) -> bool {
    use subtle::ConstantTimeEq;
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_secret_matches_exact_code() {
        let spec = SecretSpec::Plain("2510".into());
        assert!(spec.matches("2510"));
        assert!(spec.matches("  2510  "));
        assert!(!spec.matches("2511"));
        assert!(!spec.matches(""));
    }

    #[test]
    fn digest_secret_matches_hash_of_input() {
        let spec = SecretSpec::Sha256(hash_code("2510"));
        assert!(spec.matches("2510"));
        assert!(!spec.matches("0000"));
    }

    #[test]
    fn hash_code_is_deterministic() {
        assert_eq!(hash_code("2510"), hash_code("2510"));
        assert_eq!(hash_code("2510").len(), 64);
    }

    #[test]
    fn malformed_stored_digest_rejects_everything() {
        for bad in ["", "zzzz", "deadbeef", &"f".repeat(63)] {
            let spec = SecretSpec::Sha256(bad.to_string());
            assert!(!spec.matches("2510"), "digest {bad:?} must reject");
            assert!(!spec.matches(bad), "digest {bad:?} must not self-match");
        }
    }

    #[test]
    fn digest_takes_precedence_over_plaintext() {
        let gate = GateConfig {
            secret_code: Some("0000".into()),
            secret_sha256: Some(hash_code("2510")),
            ..GateConfig::default()
        };
        let spec = SecretSpec::from_config(&gate);
        assert!(spec.matches("2510"));
        assert!(!spec.matches("0000"));
    }
}
