//! SQLite user repository implementation (roles + API key hashes).

use sqlx::Row;

use skilldesk_core::repository::user::UserRepository;
use skilldesk_types::error::RepositoryError;
use skilldesk_types::user::{Role, UserId};

use super::pool::DatabasePool;

/// SQLite-backed implementation of `UserRepository`.
pub struct SqliteUserRepository {
    pool: DatabasePool,
}

impl SqliteUserRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

impl UserRepository for SqliteUserRepository {
    async fn upsert_user(&self, user_id: &UserId, role: Role) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO users (id, role, created_at) VALUES (?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET role = excluded.role",
        )
        .bind(user_id.as_str())
        .bind(role.to_string())
        .bind(chrono::Utc::now().to_rfc3339())
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;
        Ok(())
    }

    async fn get_role(&self, user_id: &UserId) -> Result<Option<Role>, RepositoryError> {
        let row = sqlx::query("SELECT role FROM users WHERE id = ?")
            .bind(user_id.as_str())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let role: String = row
                    .try_get("role")
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                let role = role
                    .parse::<Role>()
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(role))
            }
            None => Ok(None),
        }
    }

    async fn store_api_key(&self, user_id: &UserId, key_hash: &str) -> Result<(), RepositoryError> {
        sqlx::query("INSERT INTO api_keys (id, user_id, key_hash, created_at) VALUES (?, ?, ?, ?)")
            .bind(uuid::Uuid::now_v7().to_string())
            .bind(user_id.as_str())
            .bind(key_hash)
            .bind(chrono::Utc::now().to_rfc3339())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;
        Ok(())
    }

    async fn find_user_by_key_hash(
        &self,
        key_hash: &str,
    ) -> Result<Option<UserId>, RepositoryError> {
        let row = sqlx::query("SELECT id, user_id FROM api_keys WHERE key_hash = ?")
            .bind(key_hash)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };
        let id: String = row
            .try_get("id")
            .map_err(|e| RepositoryError::Query(e.to_string()))?;
        let user_id: String = row
            .try_get("user_id")
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        // Update last_used_at (best effort, don't fail the request)
        let _ = sqlx::query("UPDATE api_keys SET last_used_at = ? WHERE id = ?")
            .bind(chrono::Utc::now().to_rfc3339())
            .bind(&id)
            .execute(&self.pool.writer)
            .await;

        Ok(Some(UserId::new(user_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::pool::test_pool;

    #[tokio::test]
    async fn test_upsert_and_get_role() {
        let repo = SqliteUserRepository::new(test_pool().await);
        let user = UserId::new("ada");

        assert!(repo.get_role(&user).await.unwrap().is_none());

        repo.upsert_user(&user, Role::SkillCreator).await.unwrap();
        assert_eq!(repo.get_role(&user).await.unwrap(), Some(Role::SkillCreator));

        repo.upsert_user(&user, Role::Admin).await.unwrap();
        assert_eq!(repo.get_role(&user).await.unwrap(), Some(Role::Admin));
    }

    #[tokio::test]
    async fn test_api_key_lookup() {
        let repo = SqliteUserRepository::new(test_pool().await);
        let user = UserId::new("ada");
        repo.upsert_user(&user, Role::Learner).await.unwrap();
        repo.store_api_key(&user, "hash-1").await.unwrap();

        assert_eq!(repo.find_user_by_key_hash("hash-1").await.unwrap(), Some(user));
        assert!(repo.find_user_by_key_hash("hash-2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_api_key_requires_existing_user() {
        let repo = SqliteUserRepository::new(test_pool().await);
        let err = repo
            .store_api_key(&UserId::new("ghost"), "hash")
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Query(_)));
    }
}
