//! Finished token value object.

use std::fmt;

use zeroize::Zeroizing;

use crate::claims::ClaimMap;
use crate::error::JwtResult;
use crate::parsed::Parsed;
use crate::parser::Parser;

/// Signing secret. Wiped on drop and redacted from `Debug`.
#[derive(Clone)]
pub struct Secret(Zeroizing<String>);

impl Secret {
    /// Wrap a secret string.
    pub fn new(secret: impl Into<String>) -> Self {
        Self(Zeroizing::new(secret.into()))
    }

    /// The secret text.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(<redacted>)")
    }
}

impl From<&str> for Secret {
    fn from(secret: &str) -> Self {
        Self::new(secret)
    }
}

impl From<String> for Secret {
    fn from(secret: String) -> Self {
        Self::new(secret)
    }
}

/// A token string paired with the secret that signed it.
///
/// Immutable once built. The decoding accessors are thin pass-throughs to
/// [`Parser`]; segment decoding does not depend on the algorithm, so the
/// default parser serves every HMAC variant.
#[derive(Debug, Clone)]
pub struct Token {
    token: String,
    secret: Secret,
}

impl Token {
    /// Pair a token string with its secret.
    pub fn new(token: impl Into<String>, secret: impl Into<Secret>) -> Self {
        Self {
            token: token.into(),
            secret: secret.into(),
        }
    }

    /// The dot-separated token string.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// The secret used to sign the token.
    #[must_use]
    pub fn secret(&self) -> &str {
        self.secret.expose()
    }

    /// Decoded header.
    pub fn header(&self) -> JwtResult<ClaimMap> {
        Parser::new().decode_header(&self.token)
    }

    /// Decoded payload.
    pub fn payload(&self) -> JwtResult<ClaimMap> {
        Parser::new().decode_payload(&self.token)
    }

    /// Raw signature segment.
    pub fn signature(&self) -> JwtResult<String> {
        Parser::new().signature(&self.token)
    }

    /// Fully decoded view of the token.
    pub fn parsed(&self) -> JwtResult<Parsed> {
        Parser::new().parse(&self.token)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token)
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.token
    }
}
