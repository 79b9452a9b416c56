//! Secret strength policy.

use serde::Deserialize;

/// Predicate deciding whether a secret is strong enough to sign with.
///
/// Returns `false` rather than erroring; the builder decides what a
/// rejection means.
pub trait SecretValidator: Send + Sync {
    /// Whether `secret` satisfies the policy.
    fn validate(&self, secret: &str) -> bool;
}

/// Default strength policy: minimum length plus character variety.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SecretPolicy {
    /// Minimum length in characters.
    pub min_length: usize,
    /// Require at least one ASCII uppercase letter.
    pub require_uppercase: bool,
    /// Require at least one ASCII lowercase letter.
    pub require_lowercase: bool,
    /// Require at least one ASCII digit.
    pub require_digit: bool,
    /// Require at least one character that is neither a letter nor a digit.
    pub require_special: bool,
}

impl SecretPolicy {
    /// Default minimum secret length.
    pub const DEFAULT_MIN_LENGTH: usize = 12;

    /// Set the minimum length.
    #[must_use]
    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    /// Toggle the special-character requirement.
    #[must_use]
    pub fn require_special(mut self, required: bool) -> Self {
        self.require_special = required;
        self
    }
}

impl Default for SecretPolicy {
    fn default() -> Self {
        Self {
            min_length: Self::DEFAULT_MIN_LENGTH,
            require_uppercase: true,
            require_lowercase: true,
            require_digit: true,
            require_special: true,
        }
    }
}

impl SecretValidator for SecretPolicy {
    fn validate(&self, secret: &str) -> bool {
        if secret.chars().count() < self.min_length {
            return false;
        }

        let (mut upper, mut lower, mut digit, mut special) = (false, false, false, false);
        for c in secret.chars() {
            if c.is_ascii_uppercase() {
                upper = true;
            } else if c.is_ascii_lowercase() {
                lower = true;
            } else if c.is_ascii_digit() {
                digit = true;
            } else if !c.is_alphanumeric() {
                special = true;
            }
        }

        (upper || !self.require_uppercase)
            && (lower || !self.require_lowercase)
            && (digit || !self.require_digit)
            && (special || !self.require_special)
    }
}

impl<V: SecretValidator + ?Sized> SecretValidator for std::sync::Arc<V> {
    fn validate(&self, secret: &str) -> bool {
        (**self).validate(secret)
    }
}

impl<V: SecretValidator + ?Sized> SecretValidator for &V {
    fn validate(&self, secret: &str) -> bool {
        (**self).validate(secret)
    }
}
