//! Segment encoding and HMAC signing
//!
//! The [`Encoder`] trait is the capability the builder and parser are
//! generic over. Every HMAC variant shares the base64url JSON codec and only
//! differs in the keyed hash it runs.

pub mod base64url;
mod hmac;

use std::fmt;
use std::str::FromStr;

use crate::claims::ClaimMap;
use crate::error::{JwtError, JwtResult};

pub use self::hmac::{Hs256, Hs384, Hs512};

/// Encoding and signing capability for one algorithm.
///
/// Implementations must be stateless and thread-safe (Send + Sync).
pub trait Encoder: Send + Sync {
    /// Header `alg` value.
    fn algorithm(&self) -> &'static str;

    /// Raw keyed digest of `message`.
    fn mac(&self, message: &[u8], secret: &str) -> JwtResult<Vec<u8>>;

    /// Compact JSON, base64url without padding.
    fn encode(&self, claims: &ClaimMap) -> JwtResult<String> {
        base64url::encode_claims(claims)
    }

    /// Inverse of [`Encoder::encode`].
    fn decode(&self, segment: &str) -> JwtResult<ClaimMap> {
        base64url::decode_claims(segment)
    }

    /// Signature over `encode(header) + "." + encode(payload)`.
    fn signature(&self, header: &ClaimMap, payload: &ClaimMap, secret: &str) -> JwtResult<String> {
        let header_seg = self.encode(header)?;
        let payload_seg = self.encode(payload)?;
        self.sign_segments(&header_seg, &payload_seg, secret)
    }

    /// Signature over already-encoded segments, exactly as given.
    fn sign_segments(&self, header_seg: &str, payload_seg: &str, secret: &str) -> JwtResult<String> {
        let message = format!("{header_seg}.{payload_seg}");
        Ok(base64url::encode(&self.mac(message.as_bytes(), secret)?))
    }
}

// Wrappers forward every method so overrides on the inner encoder survive.
macro_rules! forward_encoder {
    ($($wrapper:ty),+ $(,)?) => {
        $(
            impl<E: Encoder + ?Sized> Encoder for $wrapper {
                fn algorithm(&self) -> &'static str {
                    (**self).algorithm()
                }

                fn mac(&self, message: &[u8], secret: &str) -> JwtResult<Vec<u8>> {
                    (**self).mac(message, secret)
                }

                fn encode(&self, claims: &ClaimMap) -> JwtResult<String> {
                    (**self).encode(claims)
                }

                fn decode(&self, segment: &str) -> JwtResult<ClaimMap> {
                    (**self).decode(segment)
                }

                fn signature(&self, header: &ClaimMap, payload: &ClaimMap, secret: &str) -> JwtResult<String> {
                    (**self).signature(header, payload, secret)
                }

                fn sign_segments(&self, header_seg: &str, payload_seg: &str, secret: &str) -> JwtResult<String> {
                    (**self).sign_segments(header_seg, payload_seg, secret)
                }
            }
        )+
    };
}

forward_encoder!(&E, std::sync::Arc<E>, Box<E>);

/// HMAC algorithm selected at runtime, e.g. from configuration or a
/// token header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// HMAC-SHA256
    #[default]
    HS256,
    /// HMAC-SHA384
    HS384,
    /// HMAC-SHA512
    HS512,
}

impl Algorithm {
    /// All supported algorithms.
    pub const ALL: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

    /// Identifier as written in the `alg` header.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Algorithm::HS256 => "HS256",
            Algorithm::HS384 => "HS384",
            Algorithm::HS512 => "HS512",
        }
    }
}

impl FromStr for Algorithm {
    type Err = JwtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HS256" => Ok(Algorithm::HS256),
            "HS384" => Ok(Algorithm::HS384),
            "HS512" => Ok(Algorithm::HS512),
            other => Err(JwtError::unsupported_algorithm(other)),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Encoder for Algorithm {
    fn algorithm(&self) -> &'static str {
        self.name()
    }

    fn mac(&self, message: &[u8], secret: &str) -> JwtResult<Vec<u8>> {
        match self {
            Algorithm::HS256 => Hs256.mac(message, secret),
            Algorithm::HS384 => Hs384.mac(message, secret),
            Algorithm::HS512 => Hs512.mac(message, secret),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> (ClaimMap, ClaimMap) {
        let mut header = ClaimMap::new();
        header.insert("alg".to_string(), json!("HS256"));
        header.insert("typ".to_string(), json!("JWT"));
        let mut payload = ClaimMap::new();
        payload.insert("sub".to_string(), json!("1234567890"));
        payload.insert("name".to_string(), json!("John Doe"));
        payload.insert("iat".to_string(), json!(1_516_239_022));
        (header, payload)
    }

    #[test]
    fn test_signature_matches_published_hs256_token() {
        let (header, payload) = sample();
        let signature = Hs256
            .signature(&header, &payload, "your-256-bit-secret")
            .expect("signing should succeed");
        assert_eq!(signature, "SflKxwRJSMeKKF2QT4fwpMeJf36POk6yJV_adQssw5c");
        assert_eq!(
            Hs256.encode(&header).expect("encodable"),
            "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9"
        );
    }

    #[test]
    fn test_signature_is_deterministic() {
        let (header, payload) = sample();
        let a = Hs512.signature(&header, &payload, "Str0ng!Secret123").expect("sign");
        let b = Hs512.signature(&header, &payload, "Str0ng!Secret123").expect("sign");
        assert_eq!(a, b);
    }

    #[test]
    fn test_runtime_algorithm_dispatch() {
        let (header, payload) = sample();
        for alg in Algorithm::ALL {
            let dynamic = alg.signature(&header, &payload, "k").expect("sign");
            let fixed = match alg {
                Algorithm::HS256 => Hs256.signature(&header, &payload, "k"),
                Algorithm::HS384 => Hs384.signature(&header, &payload, "k"),
                Algorithm::HS512 => Hs512.signature(&header, &payload, "k"),
            }
            .expect("sign");
            assert_eq!(dynamic, fixed);
            assert_eq!(alg.name().parse::<Algorithm>().expect("known"), alg);
        }
        assert!(matches!(
            "none".parse::<Algorithm>(),
            Err(JwtError::UnsupportedAlgorithm(_))
        ));
    }

    /// Pretty-printed JSON segments, same HMAC as HS256.
    struct Spaced;

    impl Encoder for Spaced {
        fn algorithm(&self) -> &'static str {
            "HS256"
        }

        fn mac(&self, message: &[u8], secret: &str) -> JwtResult<Vec<u8>> {
            Hs256.mac(message, secret)
        }

        fn encode(&self, claims: &ClaimMap) -> JwtResult<String> {
            let json = serde_json::to_vec_pretty(claims)
                .map_err(|e| JwtError::serialization(&e.to_string()))?;
            Ok(base64url::encode(&json))
        }
    }

    #[test]
    fn test_wrappers_keep_encoder_overrides() {
        let (header, payload) = sample();
        let mut claims = ClaimMap::new();
        claims.insert("a".to_string(), json!(1));

        assert_eq!(Spaced.encode(&claims).expect("encode"), "ewogICJhIjogMQp9");
        let expected = Spaced.signature(&header, &payload, "k").expect("sign");
        assert_ne!(expected, Hs256.signature(&header, &payload, "k").expect("sign"));

        let wrapped: [Box<dyn Encoder>; 3] = [
            Box::new(std::sync::Arc::new(Spaced)),
            Box::new(Box::new(Spaced)),
            Box::new(&Spaced),
        ];
        for encoder in &wrapped {
            assert_eq!(encoder.encode(&claims).expect("encode"), "ewogICJhIjogMQp9");
            assert_eq!(encoder.signature(&header, &payload, "k").expect("sign"), expected);
        }
    }

    #[test]
    fn test_builder_uses_wrapped_encoder_overrides() {
        let mut builder = crate::JwtBuilder::new().with_encoder(std::sync::Arc::new(Spaced));
        builder.set_payload_claim("a", 1).set_secret("Str0ng!Secret123").expect("secret");
        let token = builder.build().expect("build");
        let payload_seg = token.token().split('.').nth(1).expect("payload segment");
        assert_eq!(payload_seg, "ewogICJhIjogMQp9");
    }
}
