//! Identity verification contract.

use crate::identity::Identity;

/// Errors returned by an [`IdentityVerifier`].
///
/// Everything except [`Provider`](IdentityError::Provider) means the caller
/// presented credentials that do not authenticate and maps to 401.
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
    #[error("identity revoked")]
    Revoked,
    #[error("identity provider unavailable")]
    Provider(#[source] anyhow::Error),
}

impl IdentityError {
    /// True when the failure is the caller's credentials rather than the
    /// provider itself.
    pub fn is_unauthorized(&self) -> bool {
        !matches!(self, Self::Provider(_))
    }
}

/// Port for the external identity provider.
///
/// The HTTP layer hands every bearer token to [`verify`](Self::verify) and
/// trusts the returned [`Identity`] completely. [`revoke`](Self::revoke)
/// deletes the subject's identity so later verifications for it fail.
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, bearer: &str) -> Result<Identity, IdentityError>;

    async fn revoke(&self, user_id: &str) -> Result<(), IdentityError>;
}
