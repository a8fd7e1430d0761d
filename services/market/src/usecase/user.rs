use anyhow::Context as _;
use chrono::Utc;

use mercato_auth::{IdentityVerifier, Role};
use mercato_store::DocumentStore;

use crate::domain::collections;
use crate::domain::types::User;
use crate::error::MarketServiceError;
use crate::usecase::seller::cascade_delete_seller;

// ── CreateUser ───────────────────────────────────────────────────────────────

pub struct CreateUserInput {
    pub email: String,
    pub name: String,
    pub role: Option<Role>,
    pub provider: Option<String>,
}

pub struct CreateUserUseCase<S: DocumentStore> {
    pub store: S,
}

impl<S: DocumentStore> CreateUserUseCase<S> {
    /// Registers the authenticated subject, or refreshes the profile on a
    /// repeat login. The join date survives refreshes.
    pub async fn execute(
        &self,
        user_id: &str,
        input: CreateUserInput,
    ) -> Result<User, MarketServiceError> {
        let existing: Option<User> = self
            .store
            .get_as(collections::USERS, user_id)
            .await
            .context("load user")?;

        let user = User {
            id: user_id.to_owned(),
            email: input.email,
            name: input.name,
            role: input.role.unwrap_or(Role::Buyer),
            provider: input.provider.unwrap_or_else(|| "password".to_owned()),
            joined_at: existing.map(|u| u.joined_at).unwrap_or_else(Utc::now),
        };
        self.store
            .set_as(collections::USERS, user_id, &user)
            .await
            .context("save user")?;
        Ok(user)
    }
}

// ── GetUser ──────────────────────────────────────────────────────────────────

pub struct GetUserUseCase<S: DocumentStore> {
    pub store: S,
}

impl<S: DocumentStore> GetUserUseCase<S> {
    pub async fn execute(&self, user_id: &str) -> Result<User, MarketServiceError> {
        self.store
            .get_as(collections::USERS, user_id)
            .await
            .context("load user")?
            .ok_or(MarketServiceError::UserNotFound)
    }
}

// ── DeleteUser ───────────────────────────────────────────────────────────────

pub struct DeleteUserUseCase<S: DocumentStore, V: IdentityVerifier> {
    pub store: S,
    pub verifier: V,
}

impl<S: DocumentStore, V: IdentityVerifier> DeleteUserUseCase<S, V> {
    /// Removes the account and everything hanging off it: the seller card
    /// cascade runs first when a card exists, then the user document goes,
    /// and finally the identity is revoked so outstanding tokens die.
    pub async fn execute(&self, user_id: &str) -> Result<(), MarketServiceError> {
        let existing = self
            .store
            .get(collections::USERS, user_id)
            .await
            .context("load user")?;
        if existing.is_none() {
            return Err(MarketServiceError::UserNotFound);
        }

        let has_card = self
            .store
            .get(collections::SELLERS, user_id)
            .await
            .context("load seller card")?
            .is_some();
        if has_card {
            cascade_delete_seller(&self.store, user_id).await?;
        }

        self.store
            .delete(collections::USERS, user_id)
            .await
            .context("delete user")?;
        self.verifier
            .revoke(user_id)
            .await
            .context("revoke identity")?;
        Ok(())
    }
}
