//! Structured logging helpers for JWT operations
//!
//! Events go through `tracing`; installing a subscriber is left to the
//! application. Secrets are never written verbatim, only as a short
//! SHA-256 fingerprint.

use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::error::JwtError;

/// Short, non-reversible identifier for a secret, safe to log.
#[must_use]
pub fn secret_fingerprint(secret: &str) -> String {
    let digest = Sha256::digest(secret.as_bytes());
    hex::encode(&digest[..8])
}

/// Log a failed JWT operation.
///
/// Validation failures are expected traffic and go out at `warn`; anything
/// else points at a programming or environment problem and goes out at
/// `debug` with the full error text.
pub fn log_jwt_error(operation: &str, algorithm: &str, err: &JwtError) {
    match err {
        JwtError::SignatureInvalid
        | JwtError::InvalidSecret
        | JwtError::ExpiredClaim(_)
        | JwtError::TokenExpired
        | JwtError::TokenNotYetValid
        | JwtError::Structure(_)
        | JwtError::Decode(_) => {
            warn!(operation, algorithm, error = %err, "JWT operation rejected");
        }
        _ => debug!(operation, algorithm, error = %err, "JWT operation failed"),
    }
}

/// Log a successfully produced or verified token without leaking its content.
pub fn log_jwt_success(operation: &str, algorithm: &str, token_len: usize) {
    debug!(operation, algorithm, token_len, "JWT operation succeeded");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_fingerprint_is_stable_and_opaque() {
        let a = secret_fingerprint("Str0ng!Secret123");
        let b = secret_fingerprint("Str0ng!Secret123");
        assert_eq!(a, b);
        assert_eq!(a.len(), 16);
        assert!(!a.contains("Secret"));
        assert_ne!(a, secret_fingerprint("Str0ng!Secret124"));
    }
}
