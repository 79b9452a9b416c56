//! Token string parsing and signature verification.

use subtle::ConstantTimeEq;

use crate::claims::ClaimMap;
use crate::encoding::{Encoder, Hs256};
use crate::error::{JwtError, JwtResult};
use crate::logging::{log_jwt_error, log_jwt_success};
use crate::parsed::Parsed;
use crate::validation::{ClaimValidator, SecretPolicy, SecretValidator};

/// The three raw segments of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segments<'a> {
    /// Encoded header.
    pub header: &'a str,
    /// Encoded payload.
    pub payload: &'a str,
    /// Encoded signature.
    pub signature: &'a str,
}

/// Splits and decodes tokens, and checks signatures with its encoder.
///
/// Parsing never looks at `exp` or `nbf`; time checks are explicit, see
/// [`crate::Validate`]. Secrets offered for verification must pass the
/// same strength policy used when signing.
#[derive(Debug, Clone, Default)]
pub struct Parser<E: Encoder = Hs256, S: SecretValidator = SecretPolicy> {
    encoder: E,
    secret_validator: S,
}

impl Parser<Hs256> {
    /// HS256 parser with the default secret policy.
    #[must_use]
    pub fn new() -> Self {
        Self::with_encoder(Hs256)
    }
}

impl<E: Encoder> Parser<E> {
    /// Parser verifying with `encoder` under the default secret policy.
    pub fn with_encoder(encoder: E) -> Self {
        Self {
            encoder,
            secret_validator: SecretPolicy::default(),
        }
    }
}

impl<E: Encoder, S: SecretValidator> Parser<E, S> {
    /// Swap the policy applied to verification secrets.
    pub fn with_secret_validator<S2: SecretValidator>(self, secret_validator: S2) -> Parser<E, S2> {
        Parser {
            encoder: self.encoder,
            secret_validator,
        }
    }

    /// The encoder used for decoding and verification.
    pub fn encoder(&self) -> &E {
        &self.encoder
    }

    /// Split a token into its three segments.
    ///
    /// # Errors
    /// `JwtError::Structure` unless there are exactly three non-empty
    /// dot-separated segments.
    pub fn split<'a>(&self, token: &'a str) -> JwtResult<Segments<'a>> {
        if !ClaimValidator::new().structure(token) {
            let count = token.split('.').count();
            return Err(if count == 3 {
                JwtError::structure("token contains an empty segment")
            } else {
                JwtError::Structure(format!("expected 3 segments, found {count}"))
            });
        }
        let mut parts = token.split('.');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(header), Some(payload), Some(signature)) => Ok(Segments {
                header,
                payload,
                signature,
            }),
            _ => Err(JwtError::structure("expected 3 segments")),
        }
    }

    /// Decode the header segment.
    pub fn decode_header(&self, token: &str) -> JwtResult<ClaimMap> {
        let segments = self.split(token)?;
        self.encoder.decode(segments.header)
    }

    /// Decode the payload segment.
    pub fn decode_payload(&self, token: &str) -> JwtResult<ClaimMap> {
        let segments = self.split(token)?;
        self.encoder.decode(segments.payload)
    }

    /// The signature segment, undecoded.
    pub fn signature(&self, token: &str) -> JwtResult<String> {
        Ok(self.split(token)?.signature.to_string())
    }

    /// Split and decode a token in one pass.
    pub fn parse(&self, token: &str) -> JwtResult<Parsed> {
        let result = self.split(token).and_then(|segments| {
            let header = self.encoder.decode(segments.header)?;
            let payload = self.encoder.decode(segments.payload)?;
            Ok(Parsed::new(token, segments, header, payload))
        });
        if let Err(e) = &result {
            log_jwt_error("jwt_parse", self.encoder.algorithm(), e);
        }
        result
    }

    /// Check the token signature against `secret`.
    ///
    /// The signature is recomputed over the header and payload segments
    /// exactly as received and compared in constant time.
    ///
    /// # Errors
    /// `JwtError::InvalidSecret` if the policy rejects `secret`,
    /// `JwtError::Structure` for malformed tokens, `JwtError::SignatureInvalid`
    /// on mismatch.
    pub fn verify(&self, token: &str, secret: &str) -> JwtResult<()> {
        let result = if self.secret_validator.validate(secret) {
            self.split(token).and_then(|segments| {
                let expected = self
                    .encoder
                    .sign_segments(segments.header, segments.payload, secret)?;
                if signatures_match(expected.as_bytes(), segments.signature.as_bytes()) {
                    Ok(())
                } else {
                    Err(JwtError::SignatureInvalid)
                }
            })
        } else {
            Err(JwtError::InvalidSecret)
        };
        match &result {
            Ok(()) => log_jwt_success("jwt_verify", self.encoder.algorithm(), token.len()),
            Err(e) => log_jwt_error("jwt_verify", self.encoder.algorithm(), e),
        }
        result
    }
}

/// Constant-time comparison for cryptographic security
#[inline]
pub(crate) fn signatures_match(expected: &[u8], actual: &[u8]) -> bool {
    expected.len() == actual.len() && bool::from(expected.ct_eq(actual))
}
