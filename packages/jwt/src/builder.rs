//! JWT builder
//!
//! Accumulates header and payload claims through chained setters and
//! produces a signed [`Token`]. Encoder, secret policy and clock are
//! injected, so the same builder logic serves every HMAC variant and any
//! strength policy.
//!
//! ```
//! use hmac_jwt::JwtBuilder;
//!
//! # fn main() -> hmac_jwt::JwtResult<()> {
//! let exp = chrono::Utc::now().timestamp() + 3600;
//! let token = JwtBuilder::new()
//!     .set_issuer("app")
//!     .set_expiration(exp)?
//!     .set_secret("Str0ngP@ssw0rd1")?
//!     .build()?;
//! assert_eq!(token.token().split('.').count(), 3);
//! # Ok(())
//! # }
//! ```

use serde_json::Value;

use crate::claims::{ClaimMap, names};
use crate::clock::{Clock, SystemClock};
use crate::config::JwtConfig;
use crate::encoding::{Encoder, Hs256};
use crate::error::{JwtError, JwtResult};
use crate::logging::{log_jwt_error, log_jwt_success, secret_fingerprint};
use crate::token::{Secret, Token};
use crate::validation::{ClaimValidator, SecretPolicy, SecretValidator};

/// Fluent token builder.
///
/// State lives in the builder until [`JwtBuilder::reset`]; [`JwtBuilder::build`]
/// only reads it, so a failed build can be fixed and retried.
#[derive(Debug, Clone)]
pub struct JwtBuilder<E: Encoder = Hs256, S: SecretValidator = SecretPolicy, C: Clock = SystemClock> {
    encoder: E,
    secret_validator: S,
    claim_validator: ClaimValidator<C>,
    token_type: String,
    header: ClaimMap,
    payload: ClaimMap,
    secret: Option<Secret>,
}

impl JwtBuilder {
    /// HS256 builder with the default secret policy and the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capabilities(Hs256, SecretPolicy::default(), ClaimValidator::new())
    }

    /// HS256 builder configured from `config`.
    ///
    /// # Errors
    /// `JwtError::Config` when the configuration is inconsistent.
    pub fn from_config(config: JwtConfig) -> JwtResult<Self> {
        config.validate()?;
        Ok(Self::with_capabilities(Hs256, config.secret_policy, ClaimValidator::new())
            .with_token_type(config.token_type))
    }
}

impl Default for JwtBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Encoder, S: SecretValidator, C: Clock> JwtBuilder<E, S, C> {
    /// Builder over explicit capabilities.
    pub fn with_capabilities(encoder: E, secret_validator: S, claim_validator: ClaimValidator<C>) -> Self {
        Self {
            encoder,
            secret_validator,
            claim_validator,
            token_type: "JWT".to_string(),
            header: ClaimMap::new(),
            payload: ClaimMap::new(),
            secret: None,
        }
    }

    /// Swap the signing algorithm, keeping all assembled state.
    pub fn with_encoder<E2: Encoder>(self, encoder: E2) -> JwtBuilder<E2, S, C> {
        JwtBuilder {
            encoder,
            secret_validator: self.secret_validator,
            claim_validator: self.claim_validator,
            token_type: self.token_type,
            header: self.header,
            payload: self.payload,
            secret: self.secret,
        }
    }

    /// Swap the secret strength policy.
    ///
    /// A secret set earlier is kept; `build` re-checks it against the new
    /// policy.
    pub fn with_secret_validator<S2: SecretValidator>(self, secret_validator: S2) -> JwtBuilder<E, S2, C> {
        JwtBuilder {
            encoder: self.encoder,
            secret_validator,
            claim_validator: self.claim_validator,
            token_type: self.token_type,
            header: self.header,
            payload: self.payload,
            secret: self.secret,
        }
    }

    /// Swap the clock used by the expiration check.
    pub fn with_clock<C2: Clock>(self, clock: C2) -> JwtBuilder<E, S, C2> {
        JwtBuilder {
            encoder: self.encoder,
            secret_validator: self.secret_validator,
            claim_validator: ClaimValidator::with_clock(clock),
            token_type: self.token_type,
            header: self.header,
            payload: self.payload,
            secret: self.secret,
        }
    }

    /// Set the `typ` header value (default `"JWT"`).
    #[must_use]
    pub fn with_token_type(mut self, token_type: impl Into<String>) -> Self {
        self.token_type = token_type.into();
        self
    }

    /// Add a header claim.
    ///
    /// `alg` and `typ` are always overwritten by the computed defaults.
    pub fn set_header_claim(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.header.insert(key.into(), value.into());
        self
    }

    /// Set the `cty` header.
    pub fn set_content_type(&mut self, content_type: impl Into<String>) -> &mut Self {
        self.set_header_claim(names::CONTENT_TYPE, content_type.into())
    }

    /// Set the secret.
    ///
    /// # Errors
    /// `JwtError::InvalidSecret` if the policy rejects it; the previously
    /// stored secret, if any, is kept.
    pub fn set_secret(&mut self, secret: impl Into<Secret>) -> JwtResult<&mut Self> {
        let secret = secret.into();
        if !self.secret_validator.validate(secret.expose()) {
            log_jwt_error("jwt_set_secret", self.encoder.algorithm(), &JwtError::InvalidSecret);
            return Err(JwtError::InvalidSecret);
        }
        self.secret = Some(secret);
        Ok(self)
    }

    /// Set the `iss` claim.
    pub fn set_issuer(&mut self, issuer: impl Into<String>) -> &mut Self {
        self.set_payload_claim(names::ISSUER, issuer.into())
    }

    /// Set the `sub` claim.
    pub fn set_subject(&mut self, subject: impl Into<String>) -> &mut Self {
        self.set_payload_claim(names::SUBJECT, subject.into())
    }

    /// Set the `aud` claim.
    ///
    /// # Errors
    /// `JwtError::InvalidAudience` unless the value is a string or an array
    /// of strings.
    pub fn set_audience(&mut self, audience: impl Into<Value>) -> JwtResult<&mut Self> {
        let audience = audience.into();
        if !self.claim_validator.audience(&audience) {
            return Err(JwtError::InvalidAudience);
        }
        Ok(self.set_payload_claim(names::AUDIENCE, audience))
    }

    /// Set the `exp` claim.
    ///
    /// # Errors
    /// `JwtError::ExpiredClaim` unless `timestamp` is strictly in the future.
    pub fn set_expiration(&mut self, timestamp: i64) -> JwtResult<&mut Self> {
        if !self.claim_validator.expiration(timestamp) {
            let err = JwtError::ExpiredClaim(timestamp);
            log_jwt_error("jwt_set_expiration", self.encoder.algorithm(), &err);
            return Err(err);
        }
        Ok(self.set_payload_claim(names::EXPIRATION, timestamp))
    }

    /// Set the `nbf` claim.
    pub fn set_not_before(&mut self, timestamp: i64) -> &mut Self {
        self.set_payload_claim(names::NOT_BEFORE, timestamp)
    }

    /// Set the `iat` claim.
    pub fn set_issued_at(&mut self, timestamp: i64) -> &mut Self {
        self.set_payload_claim(names::ISSUED_AT, timestamp)
    }

    /// Set the `jti` claim.
    pub fn set_jwt_id(&mut self, jwt_id: impl Into<String>) -> &mut Self {
        self.set_payload_claim(names::JWT_ID, jwt_id.into())
    }

    /// Add a payload claim.
    pub fn set_payload_claim(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.payload.insert(key.into(), value.into());
        self
    }

    /// Header with the computed `alg` and `typ` merged in.
    pub fn header(&self) -> ClaimMap {
        let mut header = self.header.clone();
        header.insert(names::ALGORITHM.to_string(), Value::from(self.encoder.algorithm()));
        header.insert(names::TYPE.to_string(), Value::from(self.token_type.as_str()));
        header
    }

    /// Payload as assembled so far.
    pub fn payload(&self) -> &ClaimMap {
        &self.payload
    }

    /// Encode and sign the assembled claims.
    ///
    /// The secret is re-checked against the policy here, so a policy swapped
    /// after `set_secret` still applies.
    ///
    /// # Errors
    /// `JwtError::InvalidSecret` if no secret is set or it fails the policy.
    pub fn build(&self) -> JwtResult<Token> {
        let algorithm = self.encoder.algorithm();
        let secret = match &self.secret {
            Some(secret) if self.secret_validator.validate(secret.expose()) => secret,
            _ => {
                log_jwt_error("jwt_build", algorithm, &JwtError::InvalidSecret);
                return Err(JwtError::InvalidSecret);
            }
        };

        let header = self.header();
        let result = self.encode(&header, secret.expose());
        match result {
            Ok(token) => {
                log_jwt_success("jwt_build", algorithm, token.len());
                tracing::trace!(secret_id = %secret_fingerprint(secret.expose()), "JWT signed");
                Ok(Token::new(token, secret.clone()))
            }
            Err(e) => {
                log_jwt_error("jwt_build", algorithm, &e);
                Err(e)
            }
        }
    }

    fn encode(&self, header: &ClaimMap, secret: &str) -> JwtResult<String> {
        let header_seg = self.encoder.encode(header)?;
        let payload_seg = self.encoder.encode(&self.payload)?;
        let signature = self.encoder.signature(header, &self.payload, secret)?;
        Ok(format!("{header_seg}.{payload_seg}.{signature}"))
    }

    /// Clear header, payload and secret.
    pub fn reset(&mut self) -> &mut Self {
        self.header = ClaimMap::new();
        self.payload = ClaimMap::new();
        self.secret = None;
        self
    }
}
