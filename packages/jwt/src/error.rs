//! JWT error types

use thiserror::Error;

/// JWT operation result type
pub type JwtResult<T> = Result<T, JwtError>;

/// Errors raised by the builder, parser and verification layers.
///
/// The validators themselves only answer `true`/`false`; these variants are
/// produced by the orchestrating code that consumes their answers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwtError {
    /// Secret is missing or fails the strength policy
    #[error("Invalid secret: secret does not satisfy the strength policy")]
    InvalidSecret,
    /// Expiration timestamp is not in the future
    #[error("Expiration claim {0} is not in the future")]
    ExpiredClaim(i64),
    /// Audience is neither a string nor a sequence of strings
    #[error("Invalid audience: must be a string or an array of strings")]
    InvalidAudience,
    /// Token does not split into three non-empty segments
    #[error("Invalid token structure: {0}")]
    Structure(String),
    /// Segment is not valid base64url, not valid JSON, or not an object
    #[error("Decode error: {0}")]
    Decode(String),
    /// Recomputed signature does not match the token signature
    #[error("Invalid JWT signature")]
    SignatureInvalid,
    /// Claim map could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// HMAC key rejected by the primitive
    #[error("Invalid key: {0}")]
    InvalidKey(String),
    /// Token `exp` claim has lapsed at verification time
    #[error("JWT token has expired")]
    TokenExpired,
    /// Token `nbf` claim is still in the future at verification time
    #[error("JWT token not yet valid")]
    TokenNotYetValid,
    /// Claim required by a verification check is absent
    #[error("Missing required claim: {0}")]
    MissingClaim(String),
    /// Token audience does not contain the expected value
    #[error("JWT audience does not match")]
    AudienceMismatch,
    /// Token issuer differs from the expected value
    #[error("JWT issuer does not match")]
    IssuerMismatch,
    /// Header algorithm is not in the allowed set
    #[error("Algorithm not allowed: {0}")]
    AlgorithmNotAllowed(String),
    /// Algorithm identifier is not one of the HMAC family
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),
    /// Configuration could not be loaded or is inconsistent
    #[error("Configuration error: {0}")]
    Config(String),
}

impl JwtError {
    /// Create a structure error
    #[inline]
    #[must_use]
    pub fn structure(msg: &str) -> Self {
        JwtError::Structure(msg.to_string())
    }

    /// Create a decode error
    #[inline]
    #[must_use]
    pub fn decode(msg: &str) -> Self {
        JwtError::Decode(msg.to_string())
    }

    /// Create a serialization error
    #[inline]
    #[must_use]
    pub fn serialization(msg: &str) -> Self {
        JwtError::Serialization(msg.to_string())
    }

    /// Create an invalid key error
    #[inline]
    #[must_use]
    pub fn invalid_key(msg: &str) -> Self {
        JwtError::InvalidKey(msg.to_string())
    }

    /// Create a missing claim error
    #[inline]
    #[must_use]
    pub fn missing_claim(claim: &str) -> Self {
        JwtError::MissingClaim(claim.to_string())
    }

    /// Create an unsupported algorithm error
    #[inline]
    #[must_use]
    pub fn unsupported_algorithm(alg: &str) -> Self {
        JwtError::UnsupportedAlgorithm(alg.to_string())
    }

    /// Create a configuration error
    #[inline]
    #[must_use]
    pub fn config(msg: &str) -> Self {
        JwtError::Config(msg.to_string())
    }
}
