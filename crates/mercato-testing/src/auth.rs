//! Mock identity verification for integration tests.
//!
//! Handlers authenticate through the [`IdentityVerifier`] port, so tests
//! swap in `MockVerifier` and hand out canned identities without minting
//! real JWTs.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use mercato_auth::{Identity, IdentityError, IdentityVerifier, Role};

#[derive(Default)]
struct Inner {
    tokens: HashMap<String, Identity>,
    revoked: Vec<String>,
}

/// Identity verifier backed by an in-memory token table.
///
/// Unknown tokens fail verification, and revoked subjects keep failing
/// even when their token is registered, mirroring the production verifier.
#[derive(Clone, Default)]
pub struct MockVerifier {
    inner: Arc<Mutex<Inner>>,
}

impl MockVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register an identity and return a bearer token that resolves to it.
    pub fn issue(&self, user_id: &str, role: Option<Role>) -> String {
        let token = format!("token-{user_id}");
        self.lock().tokens.insert(
            token.clone(),
            Identity {
                user_id: user_id.to_owned(),
                role,
            },
        );
        token
    }

    /// Subjects revoked through the [`IdentityVerifier`] port, in call order.
    pub fn revoked(&self) -> Vec<String> {
        self.lock().revoked.clone()
    }
}

impl IdentityVerifier for MockVerifier {
    async fn verify(&self, bearer: &str) -> Result<Identity, IdentityError> {
        let inner = self.lock();
        let identity = inner
            .tokens
            .get(bearer)
            .cloned()
            .ok_or(IdentityError::InvalidSignature)?;
        if inner.revoked.contains(&identity.user_id) {
            return Err(IdentityError::Revoked);
        }
        Ok(identity)
    }

    async fn revoke(&self, user_id: &str) -> Result<(), IdentityError> {
        self.lock().revoked.push(user_id.to_owned());
        Ok(())
    }
}
