//! Claim maps and registered claim names.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Ordered claim map used for both header and payload.
///
/// Backed by `serde_json::Map` with `preserve_order`, so keys encode in
/// insertion order and signatures are reproducible.
pub type ClaimMap = Map<String, Value>;

/// Registered header and payload claim names.
pub mod names {
    /// Header: signing algorithm.
    pub const ALGORITHM: &str = "alg";
    /// Header: token type.
    pub const TYPE: &str = "typ";
    /// Header: content type.
    pub const CONTENT_TYPE: &str = "cty";
    /// Payload: issuer.
    pub const ISSUER: &str = "iss";
    /// Payload: subject.
    pub const SUBJECT: &str = "sub";
    /// Payload: audience.
    pub const AUDIENCE: &str = "aud";
    /// Payload: expiration time.
    pub const EXPIRATION: &str = "exp";
    /// Payload: not before.
    pub const NOT_BEFORE: &str = "nbf";
    /// Payload: issued at.
    pub const ISSUED_AT: &str = "iat";
    /// Payload: JWT ID.
    pub const JWT_ID: &str = "jti";
}

/// Audience claim: a single recipient or a set of recipients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    /// `"aud": "site.com"`
    One(String),
    /// `"aud": ["a.com", "b.com"]`
    Many(Vec<String>),
}

impl Audience {
    /// Read an audience from a claim value, if it has the right shape.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Audience::One(s.clone())),
            Value::Array(items) => items
                .iter()
                .map(|item| item.as_str().map(str::to_string))
                .collect::<Option<Vec<_>>>()
                .map(Audience::Many),
            _ => None,
        }
    }

    /// Whether `candidate` is one of the recipients.
    #[must_use]
    pub fn contains(&self, candidate: &str) -> bool {
        match self {
            Audience::One(s) => s == candidate,
            Audience::Many(all) => all.iter().any(|s| s == candidate),
        }
    }
}

impl From<Audience> for Value {
    fn from(audience: Audience) -> Self {
        match audience {
            Audience::One(s) => Value::String(s),
            Audience::Many(all) => Value::Array(all.into_iter().map(Value::String).collect()),
        }
    }
}

impl From<&str> for Audience {
    fn from(s: &str) -> Self {
        Audience::One(s.to_string())
    }
}

impl From<Vec<String>> for Audience {
    fn from(all: Vec<String>) -> Self {
        Audience::Many(all)
    }
}
