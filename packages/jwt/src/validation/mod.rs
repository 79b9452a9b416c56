//! Secret and claim predicates.

pub mod claims;
pub mod secret;

pub use claims::ClaimValidator;
pub use secret::{SecretPolicy, SecretValidator};
