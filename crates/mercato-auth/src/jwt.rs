//! JWT-backed identity verification.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::Deserialize;
#[cfg(test)]
use serde::Serialize;

use crate::identity::{Identity, Role};
use crate::verifier::{IdentityError, IdentityVerifier};

/// JWT claims payload accepted by [`JwtVerifier`].
///
/// | Field | JWT claim | Rust type | Meaning |
/// |-------|-----------|-----------|---------|
/// | `sub` | `sub` | opaque string | user ID |
/// | `role` | custom | string, optional | `buyer` \| `seller` \| `admin` |
/// | `exp` | `exp` | seconds since epoch | token expiration |
#[derive(Debug, Deserialize)]
#[cfg_attr(test, derive(Serialize))]
pub struct JwtClaims {
    pub sub: String,
    #[serde(default)]
    pub role: Option<String>,
    pub exp: u64,
}

/// Verifies HS256 bearer tokens against a shared secret.
///
/// Tokens are stateless, so revocation is tracked in-process: revoked
/// subjects keep failing verification for the lifetime of this verifier
/// even when their tokens are otherwise valid.
#[derive(Clone)]
pub struct JwtVerifier {
    secret: String,
    revoked: Arc<Mutex<HashSet<String>>>,
}

impl JwtVerifier {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            revoked: Arc::default(),
        }
    }
}

/// Decode and validate a JWT, returning raw claims.
///
/// Validation: HS256, exp checked, required claims: `exp` + `sub`.
/// Default leeway = 60s to tolerate clock skew against the token issuer.
fn decode_jwt(token: &str, secret: &str) -> Result<JwtClaims, IdentityError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<JwtClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => IdentityError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature
        | jsonwebtoken::errors::ErrorKind::InvalidEcdsaKey
        | jsonwebtoken::errors::ErrorKind::InvalidRsaKey(_) => IdentityError::InvalidSignature,
        _ => IdentityError::Malformed,
    })?;

    Ok(data.claims)
}

impl IdentityVerifier for JwtVerifier {
    async fn verify(&self, bearer: &str) -> Result<Identity, IdentityError> {
        let claims = decode_jwt(bearer, &self.secret)?;

        let revoked = self
            .revoked
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&claims.sub);
        if revoked {
            return Err(IdentityError::Revoked);
        }

        // Unknown role strings degrade to no role rather than rejecting
        // the token outright.
        let role = claims.role.as_deref().and_then(|r| r.parse::<Role>().ok());
        Ok(Identity {
            user_id: claims.sub,
            role,
        })
    }

    async fn revoke(&self, user_id: &str) -> Result<(), IdentityError> {
        self.revoked
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(user_id.to_owned());
        Ok(())
    }
}
