//! Test utilities for Mercato services.
//!
//! Provides `MockVerifier` for canned identities and `FailingStore` for
//! injecting storage failures. Import in `#[cfg(test)]` blocks and
//! integration tests only, never in production code.

pub mod auth;
pub mod store;

pub use auth::MockVerifier;
pub use store::FailingStore;
