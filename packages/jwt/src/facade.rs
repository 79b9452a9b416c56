//! One-call helpers for the common HS256 cases.

use serde_json::Value;

use crate::builder::JwtBuilder;
use crate::claims::ClaimMap;
use crate::clock::{Clock, SystemClock};
use crate::error::JwtResult;
use crate::parser::Parser;
use crate::token::Token;
use crate::validation::ClaimValidator;

/// Static entry points using HS256, the default secret policy and the
/// system clock.
pub struct Jwt;

impl Jwt {
    /// Token for a user id with issuer, expiration and issued-at set.
    ///
    /// The user id goes in a private `user_id` claim.
    pub fn create(user_id: impl Into<Value>, secret: &str, expiration: i64, issuer: &str) -> JwtResult<Token> {
        let mut builder = JwtBuilder::new();
        builder
            .set_payload_claim("user_id", user_id)
            .set_secret(secret)?
            .set_expiration(expiration)?
            .set_issuer(issuer)
            .set_issued_at(SystemClock.now());
        builder.build()
    }

    /// Token carrying exactly `payload`.
    pub fn custom_payload(payload: &ClaimMap, secret: &str) -> JwtResult<Token> {
        let mut builder = JwtBuilder::new();
        for (key, value) in payload {
            builder.set_payload_claim(key.as_str(), value.clone());
        }
        builder.set_secret(secret)?.build()
    }

    /// Well-formed, signed with a policy-compliant `secret`, signature intact.
    pub fn validate(token: &str, secret: &str) -> bool {
        Parser::new().verify(token, secret).is_ok()
    }

    /// Decoded header.
    pub fn header(token: &str) -> JwtResult<ClaimMap> {
        Parser::new().decode_header(token)
    }

    /// Decoded payload.
    pub fn payload(token: &str) -> JwtResult<ClaimMap> {
        Parser::new().decode_payload(token)
    }

    /// `exp` present and still in the future.
    pub fn validate_expiration(token: &str) -> bool {
        Parser::new()
            .parse(token)
            .ok()
            .and_then(|parsed| parsed.expiration())
            .is_some_and(|exp| ClaimValidator::new().expiration(exp))
    }

    /// `nbf` present and already reached.
    pub fn validate_not_before(token: &str) -> bool {
        Parser::new()
            .parse(token)
            .ok()
            .and_then(|parsed| parsed.not_before())
            .is_some_and(|nbf| ClaimValidator::new().not_before(nbf))
    }
}
