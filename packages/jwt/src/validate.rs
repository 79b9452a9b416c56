//! Verification-time checks over a parsed token
//!
//! Parsing alone never rejects a lapsed token. Callers that want `exp`,
//! `nbf`, audience or algorithm enforced at verification time chain the
//! checks they need:
//!
//! ```
//! # use hmac_jwt::{JwtBuilder, Parser, Validate};
//! # fn main() -> hmac_jwt::JwtResult<()> {
//! # let exp = chrono::Utc::now().timestamp() + 3600;
//! # let token = JwtBuilder::new()
//! #     .set_expiration(exp)?
//! #     .set_secret("Str0ng!Secret123")?
//! #     .build()?;
//! let parsed = Parser::new().parse(token.token())?;
//! Validate::new(parsed)
//!     .signature("Str0ng!Secret123")?
//!     .algorithm(&["HS256"])?
//!     .expiration()?;
//! # Ok(())
//! # }
//! ```

use crate::claims::{Audience, names};
use crate::clock::{Clock, SystemClock};
use crate::config::JwtConfig;
use crate::encoding::{Encoder, Hs256};
use crate::error::{JwtError, JwtResult};
use crate::logging::log_jwt_error;
use crate::parsed::Parsed;
use crate::parser::signatures_match;
use crate::validation::{ClaimValidator, SecretPolicy, SecretValidator};

/// Chainable verification checks; each failed predicate becomes an error.
#[derive(Debug, Clone)]
pub struct Validate<E: Encoder = Hs256, C: Clock = SystemClock, S: SecretValidator = SecretPolicy> {
    parsed: Parsed,
    encoder: E,
    claims: ClaimValidator<C>,
    secret_validator: S,
    leeway: i64,
}

impl Validate {
    /// HS256 checks against the system clock, default secret policy, no leeway.
    #[must_use]
    pub fn new(parsed: Parsed) -> Self {
        Self {
            parsed,
            encoder: Hs256,
            claims: ClaimValidator::new(),
            secret_validator: SecretPolicy::default(),
            leeway: 0,
        }
    }
}

impl<E: Encoder, C: Clock, S: SecretValidator> Validate<E, C, S> {
    /// Verify signatures with `encoder`.
    pub fn with_encoder<E2: Encoder>(self, encoder: E2) -> Validate<E2, C, S> {
        Validate {
            parsed: self.parsed,
            encoder,
            claims: self.claims,
            secret_validator: self.secret_validator,
            leeway: self.leeway,
        }
    }

    /// Read current time from `clock`.
    pub fn with_clock<C2: Clock>(self, clock: C2) -> Validate<E, C2, S> {
        Validate {
            parsed: self.parsed,
            encoder: self.encoder,
            claims: ClaimValidator::with_clock(clock),
            secret_validator: self.secret_validator,
            leeway: self.leeway,
        }
    }

    /// Policy a secret must meet before [`Validate::signature`] uses it.
    pub fn with_secret_validator<S2: SecretValidator>(self, secret_validator: S2) -> Validate<E, C, S2> {
        Validate {
            parsed: self.parsed,
            encoder: self.encoder,
            claims: self.claims,
            secret_validator,
            leeway: self.leeway,
        }
    }

    /// Tolerate `seconds` of clock skew on `exp` and `nbf`.
    #[must_use]
    pub fn with_leeway(mut self, seconds: i64) -> Self {
        self.leeway = seconds.max(0);
        self
    }

    /// Apply the leeway from `config`.
    #[must_use]
    pub fn with_config(self, config: &JwtConfig) -> Self {
        self.with_leeway(config.leeway_seconds)
    }

    /// The token under validation.
    pub fn parsed(&self) -> &Parsed {
        &self.parsed
    }

    /// Give back the token once the checks have passed.
    pub fn into_parsed(self) -> Parsed {
        self.parsed
    }

    /// Signature matches `secret`; a secret the policy rejects is an
    /// `InvalidSecret` error and no HMAC is computed.
    pub fn signature(&self, secret: &str) -> JwtResult<&Self> {
        if !self.secret_validator.validate(secret) {
            return self.fail("jwt_validate_signature", JwtError::InvalidSecret);
        }
        let expected = self.encoder.sign_segments(
            self.parsed.header_segment(),
            self.parsed.payload_segment(),
            secret,
        )?;
        if signatures_match(expected.as_bytes(), self.parsed.signature().as_bytes()) {
            Ok(self)
        } else {
            self.fail("jwt_validate_signature", JwtError::SignatureInvalid)
        }
    }

    /// `exp` present and not lapsed.
    pub fn expiration(&self) -> JwtResult<&Self> {
        let exp = self
            .parsed
            .expiration()
            .ok_or_else(|| JwtError::missing_claim(names::EXPIRATION))?;
        if self.claims.expiration(exp.saturating_add(self.leeway)) {
            Ok(self)
        } else {
            self.fail("jwt_validate_expiration", JwtError::TokenExpired)
        }
    }

    /// `nbf` present and reached.
    pub fn not_before(&self) -> JwtResult<&Self> {
        let nbf = self
            .parsed
            .not_before()
            .ok_or_else(|| JwtError::missing_claim(names::NOT_BEFORE))?;
        if self.claims.not_before(nbf.saturating_sub(self.leeway)) {
            Ok(self)
        } else {
            self.fail("jwt_validate_not_before", JwtError::TokenNotYetValid)
        }
    }

    /// `aud` lists `expected`.
    pub fn audience(&self, expected: &str) -> JwtResult<&Self> {
        let raw = self
            .parsed
            .claim(names::AUDIENCE)
            .ok_or_else(|| JwtError::missing_claim(names::AUDIENCE))?;
        if !self.claims.audience(raw) {
            return Err(JwtError::InvalidAudience);
        }
        match Audience::from_value(raw) {
            Some(audience) if audience.contains(expected) => Ok(self),
            _ => self.fail("jwt_validate_audience", JwtError::AudienceMismatch),
        }
    }

    /// `iss` equals `expected`.
    pub fn issuer(&self, expected: &str) -> JwtResult<&Self> {
        match self.parsed.issuer() {
            Some(issuer) if issuer == expected => Ok(self),
            Some(_) => self.fail("jwt_validate_issuer", JwtError::IssuerMismatch),
            None => Err(JwtError::missing_claim(names::ISSUER)),
        }
    }

    /// Header `alg` is one of `allowed` and is not `none`.
    pub fn algorithm(&self, allowed: &[&str]) -> JwtResult<&Self> {
        let alg = self
            .parsed
            .algorithm()
            .ok_or_else(|| JwtError::missing_claim(names::ALGORITHM))?;
        if self.claims.algorithm(alg, allowed) {
            Ok(self)
        } else {
            self.fail("jwt_validate_algorithm", JwtError::AlgorithmNotAllowed(alg.to_string()))
        }
    }

    /// Header `alg` is not `none`.
    pub fn algorithm_not_none(&self) -> JwtResult<&Self> {
        let alg = self
            .parsed
            .algorithm()
            .ok_or_else(|| JwtError::missing_claim(names::ALGORITHM))?;
        if alg.eq_ignore_ascii_case("none") {
            self.fail("jwt_validate_algorithm", JwtError::AlgorithmNotAllowed(alg.to_string()))
        } else {
            Ok(self)
        }
    }

    fn fail(&self, operation: &str, err: JwtError) -> JwtResult<&Self> {
        log_jwt_error(operation, self.encoder.algorithm(), &err);
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::JwtBuilder;
    use crate::clock::FixedClock;
    use crate::parser::Parser;

    const NOW: i64 = 1_700_000_000;
    const SECRET: &str = "Str0ng!Secret123";

    fn parsed_token(configure: impl FnOnce(&mut JwtBuilder<Hs256, crate::SecretPolicy, FixedClock>)) -> Parsed {
        let mut builder = JwtBuilder::new().with_clock(FixedClock(NOW));
        builder.set_secret(SECRET).expect("strong secret");
        configure(&mut builder);
        let token = builder.build().expect("build");
        Parser::new().parse(token.token()).expect("parse")
    }

    #[test]
    fn test_expiration_with_leeway() {
        let parsed = parsed_token(|b| {
            b.set_expiration(NOW + 10).expect("future");
        });
        let v = Validate::new(parsed).with_clock(FixedClock(NOW + 10));
        assert_eq!(v.expiration().err(), Some(JwtError::TokenExpired));
        let v = v.with_leeway(5);
        assert!(v.expiration().is_ok());
    }

    #[test]
    fn test_missing_time_claims() {
        let v = Validate::new(parsed_token(|_| {})).with_clock(FixedClock(NOW));
        assert_eq!(v.expiration().err(), Some(JwtError::MissingClaim("exp".to_string())));
        assert_eq!(v.not_before().err(), Some(JwtError::MissingClaim("nbf".to_string())));
    }

    #[test]
    fn test_not_before() {
        let parsed = parsed_token(|b| {
            b.set_not_before(NOW + 60);
        });
        let early = Validate::new(parsed.clone()).with_clock(FixedClock(NOW));
        assert_eq!(early.not_before().err(), Some(JwtError::TokenNotYetValid));
        let late = Validate::new(parsed).with_clock(FixedClock(NOW + 60));
        assert!(late.not_before().is_ok());
    }

    #[test]
    fn test_audience_and_issuer() {
        let parsed = parsed_token(|b| {
            b.set_issuer("app");
            b.set_audience(vec!["a.com", "b.com"]).expect("string audience");
        });
        let v = Validate::new(parsed);
        assert!(v.audience("b.com").is_ok());
        assert_eq!(v.audience("c.com").err(), Some(JwtError::AudienceMismatch));
        assert!(v.issuer("app").is_ok());
        assert_eq!(v.issuer("other").err(), Some(JwtError::IssuerMismatch));
    }

    #[test]
    fn test_algorithm_and_signature_chain() {
        let v = Validate::new(parsed_token(|_| {}));
        assert!(v.signature(SECRET).and_then(|v| v.algorithm(&["HS256"])).is_ok());
        assert!(v.algorithm_not_none().is_ok());
        assert_eq!(
            v.algorithm(&["HS512"]).err(),
            Some(JwtError::AlgorithmNotAllowed("HS256".to_string()))
        );
        assert_eq!(v.signature("Wr0ng!Secret123").err(), Some(JwtError::SignatureInvalid));
    }

    #[test]
    fn test_signature_rejects_weak_secret() {
        let relaxed = SecretPolicy::default().with_min_length(3).require_special(false);
        let mut builder = JwtBuilder::new()
            .with_secret_validator(relaxed.clone())
            .with_clock(FixedClock(NOW));
        builder.set_issuer("app").set_secret("Ab1").expect("relaxed policy");
        let token = builder.build().expect("build");
        let parsed = Parser::new().parse(token.token()).expect("parse");

        let v = Validate::new(parsed);
        assert_eq!(v.signature("Ab1").err(), Some(JwtError::InvalidSecret));
        let v = v.with_secret_validator(relaxed);
        assert!(v.signature("Ab1").is_ok());
        assert_eq!(v.signature("Ab2").err(), Some(JwtError::SignatureInvalid));
    }

    #[test]
    fn test_config_leeway_boundaries() {
        const LEEWAY: i64 = 30;
        let exp = NOW + 100;
        let nbf = NOW + 50;
        let parsed = parsed_token(|b| {
            b.set_expiration(exp).expect("future");
            b.set_not_before(nbf);
        });
        let config = JwtConfig::default().with_leeway(LEEWAY);
        let at = |now: i64| {
            Validate::new(parsed.clone())
                .with_clock(FixedClock(now))
                .with_config(&config)
        };

        // exp is exclusive: valid until exp + leeway, expired at it
        assert!(at(exp + LEEWAY - 1).expiration().is_ok());
        assert_eq!(at(exp + LEEWAY).expiration().err(), Some(JwtError::TokenExpired));
        // nbf is inclusive: usable from nbf - leeway
        assert!(at(nbf - LEEWAY).not_before().is_ok());
        assert_eq!(
            at(nbf - LEEWAY - 1).not_before().err(),
            Some(JwtError::TokenNotYetValid)
        );

        // Without the config the same instants fall outside the window
        let strict = Validate::new(parsed.clone()).with_clock(FixedClock(exp + LEEWAY - 1));
        assert_eq!(strict.expiration().err(), Some(JwtError::TokenExpired));
        let strict = Validate::new(parsed).with_clock(FixedClock(nbf - LEEWAY));
        assert_eq!(strict.not_before().err(), Some(JwtError::TokenNotYetValid));
    }
}
