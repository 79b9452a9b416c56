//! Token construction and verification settings.

use serde::Deserialize;

use crate::error::{JwtError, JwtResult};
use crate::validation::SecretPolicy;

/// Settings shared by the builder and the verification checks.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct JwtConfig {
    /// Value of the `typ` header.
    pub token_type: String,
    /// Seconds of clock skew tolerated by verification-time `exp`/`nbf` checks.
    pub leeway_seconds: i64,
    /// Secret strength rules.
    pub secret_policy: SecretPolicy,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            token_type: "JWT".to_string(),
            leeway_seconds: 0,
            secret_policy: SecretPolicy::default(),
        }
    }
}

impl JwtConfig {
    /// Load settings from JSON text; missing fields take their defaults.
    ///
    /// # Errors
    /// `JwtError::Config` if the text is not valid JSON for this shape or
    /// the resulting settings are inconsistent.
    pub fn from_json(text: &str) -> JwtResult<Self> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| JwtError::config(&e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the settings are usable.
    pub fn validate(&self) -> JwtResult<()> {
        if self.token_type.is_empty() {
            return Err(JwtError::config("token_type cannot be empty"));
        }
        if self.leeway_seconds < 0 {
            return Err(JwtError::config("leeway_seconds cannot be negative"));
        }
        Ok(())
    }

    /// Set the `typ` header value.
    #[must_use]
    pub fn with_token_type(mut self, token_type: impl Into<String>) -> Self {
        self.token_type = token_type.into();
        self
    }

    /// Set the verification leeway.
    #[must_use]
    pub fn with_leeway(mut self, seconds: i64) -> Self {
        self.leeway_seconds = seconds;
        self
    }

    /// Replace the secret policy.
    #[must_use]
    pub fn with_secret_policy(mut self, policy: SecretPolicy) -> Self {
        self.secret_policy = policy;
        self
    }
}
