//! Claim predicates
//!
//! Every check is a pure `bool` answer over primitive input. Turning a
//! `false` into an error is the caller's job.

use serde_json::Value;

use crate::clock::{Clock, SystemClock};

/// Structural and temporal claim checks against an injected clock.
#[derive(Debug, Clone, Default)]
pub struct ClaimValidator<C: Clock = SystemClock> {
    clock: C,
}

impl ClaimValidator<SystemClock> {
    /// Validator reading the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self { clock: SystemClock }
    }
}

impl<C: Clock> ClaimValidator<C> {
    /// Validator reading `clock`.
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    /// The clock backing the time checks.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Current time according to the injected clock.
    #[inline]
    pub fn now(&self) -> i64 {
        self.clock.now()
    }

    /// True iff `timestamp` is strictly in the future.
    #[inline]
    pub fn expiration(&self, timestamp: i64) -> bool {
        timestamp > self.now()
    }

    /// True iff `timestamp` has been reached.
    #[inline]
    pub fn not_before(&self, timestamp: i64) -> bool {
        timestamp <= self.now()
    }

    /// True iff `timestamp` is not in the future.
    #[inline]
    pub fn issued_at(&self, timestamp: i64) -> bool {
        timestamp <= self.now()
    }

    /// True iff `token` is exactly three non-empty dot-separated segments.
    pub fn structure(&self, token: &str) -> bool {
        let mut count = 0;
        for segment in token.split('.') {
            if segment.is_empty() {
                return false;
            }
            count += 1;
        }
        count == 3
    }

    /// True iff `audience` is a string or an array of strings.
    pub fn audience(&self, audience: &Value) -> bool {
        match audience {
            Value::String(_) => true,
            Value::Array(items) => items.iter().all(Value::is_string),
            _ => false,
        }
    }

    /// True iff `algorithm` is listed in `allowed` and is not `none`.
    pub fn algorithm(&self, algorithm: &str, allowed: &[&str]) -> bool {
        !algorithm.eq_ignore_ascii_case("none") && allowed.contains(&algorithm)
    }
}
