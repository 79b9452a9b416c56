//! HMAC-signed JSON Web Tokens (RFC 7519)
//!
//! This crate provides:
//! - A fluent [`JwtBuilder`] assembling header and payload claims
//! - HS256, HS384 and HS512 encoders behind the [`Encoder`] trait
//! - A [`Parser`] that splits, decodes and verifies tokens in constant time
//! - Pure secret and claim predicates ([`SecretPolicy`], [`ClaimValidator`])
//! - Opt-in verification-time checks through [`Validate`]
//! - One-call helpers on [`Jwt`]
//!
//! ```
//! use hmac_jwt::{JwtBuilder, Parser};
//!
//! # fn main() -> hmac_jwt::JwtResult<()> {
//! let exp = chrono::Utc::now().timestamp() + 3600;
//! let token = JwtBuilder::new()
//!     .set_issuer("app")
//!     .set_expiration(exp)?
//!     .set_secret("Str0ngP@ssw0rd1")?
//!     .build()?;
//!
//! let parser = Parser::new();
//! parser.verify(token.token(), token.secret())?;
//! assert_eq!(parser.decode_payload(token.token())?["iss"], "app");
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod claims;
pub mod clock;
pub mod config;
pub mod encoding;
mod error;
mod facade;
pub mod logging;
pub mod parsed;
pub mod parser;
pub mod token;
pub mod validate;
pub mod validation;

pub use builder::JwtBuilder;
pub use claims::{Audience, ClaimMap};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::JwtConfig;
pub use encoding::{Algorithm, Encoder, Hs256, Hs384, Hs512};
pub use error::*;
pub use facade::Jwt;
pub use parsed::Parsed;
pub use parser::{Parser, Segments};
pub use token::{Secret, Token};
pub use validate::Validate;
pub use validation::{ClaimValidator, SecretPolicy, SecretValidator};
