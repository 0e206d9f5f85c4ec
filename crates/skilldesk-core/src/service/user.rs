//! User service: roles, permission context, and API key issuance.

use skilldesk_types::error::UserError;
use skilldesk_types::user::{Role, UserActionsInfo, UserId};

use crate::repository::user::UserRepository;
use crate::service::hash::KeyHasher;

/// Prefix of every issued API key.
pub const API_KEY_PREFIX: &str = "skd_";

/// Service resolving users to their permission context and managing API keys.
pub struct UserService<U: UserRepository, H: KeyHasher> {
    repo: U,
    hasher: H,
}

impl<U: UserRepository, H: KeyHasher> UserService<U, H> {
    /// Create a new UserService.
    pub fn new(repo: U, hasher: H) -> Self {
        Self { repo, hasher }
    }

    /// Build the permission context for a user. Unknown users are learners.
    pub async fn actions_info(&self, user_id: &UserId) -> Result<UserActionsInfo, UserError> {
        let role = self
            .repo
            .get_role(user_id)
            .await
            .map_err(|e| UserError::StorageError(e.to_string()))?
            .unwrap_or_default();
        Ok(UserActionsInfo::new(user_id.clone(), role))
    }

    /// Create a user or change its role.
    pub async fn register_user(&self, user_id: &UserId, role: Role) -> Result<(), UserError> {
        self.repo
            .upsert_user(user_id, role)
            .await
            .map_err(|e| UserError::StorageError(e.to_string()))?;
        tracing::info!(user_id = %user_id, role = %role, "user registered");
        Ok(())
    }

    /// Issue a new API key for an existing user.
    ///
    /// Returns the plaintext key; only its hash is stored.
    pub async fn issue_api_key(&self, user_id: &UserId) -> Result<String, UserError> {
        let known = self
            .repo
            .get_role(user_id)
            .await
            .map_err(|e| UserError::StorageError(e.to_string()))?;
        if known.is_none() {
            return Err(UserError::NotFound);
        }

        let plaintext_key = format!(
            "{API_KEY_PREFIX}{}{}",
            uuid::Uuid::new_v4().simple(),
            uuid::Uuid::new_v4().simple()
        );
        let key_hash = self.hasher.hash_key(&plaintext_key);
        self.repo
            .store_api_key(user_id, &key_hash)
            .await
            .map_err(|e| UserError::StorageError(e.to_string()))?;

        tracing::info!(user_id = %user_id, "api key issued");
        Ok(plaintext_key)
    }

    /// Resolve the user owning a plaintext API key.
    pub async fn authenticate(&self, api_key: &str) -> Result<Option<UserId>, UserError> {
        let key_hash = self.hasher.hash_key(api_key);
        self.repo
            .find_user_by_key_hash(&key_hash)
            .await
            .map_err(|e| UserError::StorageError(e.to_string()))
    }
}
