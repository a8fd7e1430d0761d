//! Identity types shared across Mercato services.
//!
//! Provides the [`IdentityVerifier`] contract the HTTP layer authenticates
//! against, plus the JWT-backed implementation used in production.

#![allow(async_fn_in_trait)]

pub mod identity;
pub mod jwt;
pub mod verifier;

pub use identity::{Identity, Role};
pub use jwt::JwtVerifier;
pub use verifier::{IdentityError, IdentityVerifier};
