//! User repository trait definition.

use skilldesk_types::error::RepositoryError;
use skilldesk_types::user::{Role, UserId};

/// Repository trait for user roles and API key credentials.
pub trait UserRepository: Send + Sync {
    /// Create the user or replace its role.
    fn upsert_user(
        &self,
        user_id: &UserId,
        role: Role,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Role of a user, if the user is known.
    fn get_role(
        &self,
        user_id: &UserId,
    ) -> impl std::future::Future<Output = Result<Option<Role>, RepositoryError>> + Send;

    /// Store the hash of a newly issued API key for a user.
    fn store_api_key(
        &self,
        user_id: &UserId,
        key_hash: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Resolve the owner of an API key hash, recording the key as used.
    fn find_user_by_key_hash(
        &self,
        key_hash: &str,
    ) -> impl std::future::Future<Output = Result<Option<UserId>, RepositoryError>> + Send;
}
