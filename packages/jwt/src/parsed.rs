//! Decoded token view with typed claim accessors.

use serde_json::Value;

use crate::claims::{Audience, ClaimMap, names};
use crate::clock::Clock;
use crate::parser::Segments;

/// A token split and decoded, but not yet verified.
///
/// Nothing here is trustworthy until the signature has been checked.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed {
    token: String,
    header_segment: String,
    payload_segment: String,
    signature: String,
    header: ClaimMap,
    payload: ClaimMap,
}

impl Parsed {
    pub(crate) fn new(token: &str, segments: Segments<'_>, header: ClaimMap, payload: ClaimMap) -> Self {
        Self {
            token: token.to_string(),
            header_segment: segments.header.to_string(),
            payload_segment: segments.payload.to_string(),
            signature: segments.signature.to_string(),
            header,
            payload,
        }
    }

    /// The original token string.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Decoded header.
    pub fn header(&self) -> &ClaimMap {
        &self.header
    }

    /// Decoded payload.
    pub fn payload(&self) -> &ClaimMap {
        &self.payload
    }

    /// Raw signature segment.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    pub(crate) fn header_segment(&self) -> &str {
        &self.header_segment
    }

    pub(crate) fn payload_segment(&self) -> &str {
        &self.payload_segment
    }

    /// Header `alg`.
    pub fn algorithm(&self) -> Option<&str> {
        self.header.get(names::ALGORITHM).and_then(Value::as_str)
    }

    /// Header `typ`.
    pub fn token_type(&self) -> Option<&str> {
        self.header.get(names::TYPE).and_then(Value::as_str)
    }

    /// Header `cty`.
    pub fn content_type(&self) -> Option<&str> {
        self.header.get(names::CONTENT_TYPE).and_then(Value::as_str)
    }

    /// Payload `iss`.
    pub fn issuer(&self) -> Option<&str> {
        self.payload.get(names::ISSUER).and_then(Value::as_str)
    }

    /// Payload `sub`.
    pub fn subject(&self) -> Option<&str> {
        self.payload.get(names::SUBJECT).and_then(Value::as_str)
    }

    /// Payload `aud`, if present and well-typed.
    pub fn audience(&self) -> Option<Audience> {
        self.payload.get(names::AUDIENCE).and_then(Audience::from_value)
    }

    /// Payload `exp`.
    pub fn expiration(&self) -> Option<i64> {
        self.payload.get(names::EXPIRATION).and_then(Value::as_i64)
    }

    /// Payload `nbf`.
    pub fn not_before(&self) -> Option<i64> {
        self.payload.get(names::NOT_BEFORE).and_then(Value::as_i64)
    }

    /// Payload `iat`.
    pub fn issued_at(&self) -> Option<i64> {
        self.payload.get(names::ISSUED_AT).and_then(Value::as_i64)
    }

    /// Payload `jti`.
    pub fn jwt_id(&self) -> Option<&str> {
        self.payload.get(names::JWT_ID).and_then(Value::as_str)
    }

    /// Any payload claim.
    pub fn claim(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }

    /// Seconds until `exp`; 0 once lapsed or when there is no `exp`.
    pub fn expires_in(&self, clock: &impl Clock) -> i64 {
        self.expiration()
            .map_or(0, |exp| exp.saturating_sub(clock.now()).max(0))
    }

    /// Seconds until `nbf` is reached; 0 when usable now or when there is no `nbf`.
    pub fn usable_in(&self, clock: &impl Clock) -> i64 {
        self.not_before()
            .map_or(0, |nbf| nbf.saturating_sub(clock.now()).max(0))
    }
}
