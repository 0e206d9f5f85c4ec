//! SQLite skill repository implementation.
//!
//! Implements `SkillRepository` from `skilldesk-core` using sqlx with split
//! read/write pools. The serialized skill is stored as JSON in `skills.body`;
//! every mutation appends to `skill_commits` inside the same transaction.

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, Sqlite, Transaction};

use skilldesk_core::repository::skill::SkillRepository;
use skilldesk_types::commit::{CommitType, SkillCommit};
use skilldesk_types::error::RepositoryError;
use skilldesk_types::rights::SkillRights;
use skilldesk_types::skill::{Skill, SkillId, SkillSummary};
use skilldesk_types::user::UserId;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `SkillRepository`.
pub struct SqliteSkillRepository {
    pool: DatabasePool,
}

impl SqliteSkillRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn query_err(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Query(e.to_string())
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

fn parse_skill_id(s: &str) -> Result<SkillId, RepositoryError> {
    s.parse::<SkillId>()
        .map_err(|e| RepositoryError::Query(format!("invalid skill id: {e}")))
}

fn row_to_skill(row: &SqliteRow) -> Result<Skill, RepositoryError> {
    let body: String = row.try_get("body").map_err(query_err)?;
    serde_json::from_str(&body)
        .map_err(|e| RepositoryError::Query(format!("corrupt skill body: {e}")))
}

fn row_to_rights(row: &SqliteRow) -> Result<SkillRights, RepositoryError> {
    let skill_id: String = row.try_get("skill_id").map_err(query_err)?;
    let creator_id: String = row.try_get("creator_id").map_err(query_err)?;
    let skill_is_private: bool = row.try_get("skill_is_private").map_err(query_err)?;

    Ok(SkillRights {
        skill_id: parse_skill_id(&skill_id)?,
        creator_id: UserId::new(creator_id),
        skill_is_private,
    })
}

fn row_to_commit(row: &SqliteRow) -> Result<SkillCommit, RepositoryError> {
    let skill_id: String = row.try_get("skill_id").map_err(query_err)?;
    let version: i32 = row.try_get("version").map_err(query_err)?;
    let committer_id: String = row.try_get("committer_id").map_err(query_err)?;
    let commit_type: String = row.try_get("commit_type").map_err(query_err)?;
    let commit_message: String = row.try_get("commit_message").map_err(query_err)?;
    let commit_cmds: String = row.try_get("commit_cmds").map_err(query_err)?;
    let created_at: String = row.try_get("created_at").map_err(query_err)?;

    Ok(SkillCommit {
        skill_id: parse_skill_id(&skill_id)?,
        version,
        committer_id: UserId::new(committer_id),
        commit_type: commit_type
            .parse::<CommitType>()
            .map_err(RepositoryError::Query)?,
        commit_message,
        commit_cmds: serde_json::from_str(&commit_cmds)
            .map_err(|e| RepositoryError::Query(format!("corrupt commit cmds: {e}")))?,
        created_at: parse_datetime(&created_at)?,
    })
}

fn skill_body(skill: &Skill) -> Result<String, RepositoryError> {
    serde_json::to_string(skill).map_err(|e| RepositoryError::Query(e.to_string()))
}

async fn insert_commit(
    tx: &mut Transaction<'_, Sqlite>,
    commit: &SkillCommit,
) -> Result<(), RepositoryError> {
    let cmds = serde_json::to_string(&commit.commit_cmds)
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

    sqlx::query(
        "INSERT INTO skill_commits
            (skill_id, version, committer_id, commit_type, commit_message, commit_cmds, created_at)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(commit.skill_id.as_str())
    .bind(commit.version)
    .bind(commit.committer_id.as_str())
    .bind(commit.commit_type.to_string())
    .bind(&commit.commit_message)
    .bind(cmds)
    .bind(commit.created_at.to_rfc3339())
    .execute(&mut **tx)
    .await
    .map_err(query_err)?;

    Ok(())
}

impl SkillRepository for SqliteSkillRepository {
    async fn create(
        &self,
        skill: &Skill,
        rights: &SkillRights,
        commit: &SkillCommit,
    ) -> Result<(), RepositoryError> {
        let mut tx = self.pool.writer.begin().await.map_err(query_err)?;

        sqlx::query(
            "INSERT INTO skills (id, version, body, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(skill.id.as_str())
        .bind(skill.version)
        .bind(skill_body(skill)?)
        .bind(skill.created_at.to_rfc3339())
        .bind(skill.updated_at.to_rfc3339())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e {
                if db_err.message().contains("UNIQUE") {
                    return RepositoryError::Conflict(format!("skill {} already exists", skill.id));
                }
            }
            query_err(e)
        })?;

        sqlx::query(
            "INSERT INTO skill_rights (skill_id, creator_id, skill_is_private) VALUES (?, ?, ?)",
        )
        .bind(rights.skill_id.as_str())
        .bind(rights.creator_id.as_str())
        .bind(rights.skill_is_private)
        .execute(&mut *tx)
        .await
        .map_err(query_err)?;

        insert_commit(&mut tx, commit).await?;
        tx.commit().await.map_err(query_err)
    }

    async fn get(&self, id: &SkillId) -> Result<Option<Skill>, RepositoryError> {
        let row = sqlx::query("SELECT body FROM skills WHERE id = ?")
            .bind(id.as_str())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_err)?;

        row.as_ref().map(row_to_skill).transpose()
    }

    async fn get_rights(&self, id: &SkillId) -> Result<Option<SkillRights>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM skill_rights WHERE skill_id = ?")
            .bind(id.as_str())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_err)?;

        row.as_ref().map(row_to_rights).transpose()
    }

    async fn save_version(
        &self,
        skill: &Skill,
        expected_version: i32,
        commit: &SkillCommit,
    ) -> Result<(), RepositoryError> {
        let mut tx = self.pool.writer.begin().await.map_err(query_err)?;

        let result = sqlx::query(
            "UPDATE skills SET version = ?, body = ?, updated_at = ? WHERE id = ? AND version = ?",
        )
        .bind(skill.version)
        .bind(skill_body(skill)?)
        .bind(skill.updated_at.to_rfc3339())
        .bind(skill.id.as_str())
        .bind(expected_version)
        .execute(&mut *tx)
        .await
        .map_err(query_err)?;

        if result.rows_affected() == 0 {
            tx.rollback().await.map_err(query_err)?;
            return Err(RepositoryError::Conflict(format!(
                "skill {} is no longer at version {expected_version}",
                skill.id
            )));
        }

        insert_commit(&mut tx, commit).await?;
        tx.commit().await.map_err(query_err)
    }

    async fn save_rights(
        &self,
        rights: &SkillRights,
        commit: &SkillCommit,
    ) -> Result<(), RepositoryError> {
        let mut tx = self.pool.writer.begin().await.map_err(query_err)?;

        let result = sqlx::query(
            "UPDATE skill_rights SET creator_id = ?, skill_is_private = ? WHERE skill_id = ?",
        )
        .bind(rights.creator_id.as_str())
        .bind(rights.skill_is_private)
        .bind(rights.skill_id.as_str())
        .execute(&mut *tx)
        .await
        .map_err(query_err)?;

        if result.rows_affected() == 0 {
            tx.rollback().await.map_err(query_err)?;
            return Err(RepositoryError::NotFound);
        }

        insert_commit(&mut tx, commit).await?;
        tx.commit().await.map_err(query_err)
    }

    async fn delete(&self, id: &SkillId, commit: &SkillCommit) -> Result<bool, RepositoryError> {
        let mut tx = self.pool.writer.begin().await.map_err(query_err)?;

        // skill_rights goes with it via ON DELETE CASCADE.
        let result = sqlx::query("DELETE FROM skills WHERE id = ?")
            .bind(id.as_str())
            .execute(&mut *tx)
            .await
            .map_err(query_err)?;

        if result.rows_affected() == 0 {
            tx.rollback().await.map_err(query_err)?;
            return Ok(false);
        }

        insert_commit(&mut tx, commit).await?;
        tx.commit().await.map_err(query_err)?;
        Ok(true)
    }

    async fn list_summaries(&self) -> Result<Vec<SkillSummary>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT s.body, COALESCE(r.skill_is_private, 1) AS skill_is_private
             FROM skills s LEFT JOIN skill_rights r ON r.skill_id = s.id
             ORDER BY s.updated_at DESC",
        )
        .fetch_all(&self.pool.reader)
        .await
        .map_err(query_err)?;

        let mut summaries = Vec::with_capacity(rows.len());
        for row in &rows {
            let skill = row_to_skill(row)?;
            let skill_is_private: bool = row.try_get("skill_is_private").map_err(query_err)?;
            summaries.push(SkillSummary {
                misconception_count: skill.misconceptions.len(),
                worked_examples_count: skill.skill_contents.worked_examples.len(),
                id: skill.id,
                description: skill.description,
                language_code: skill.language_code,
                version: skill.version,
                skill_is_private,
                updated_at: skill.updated_at,
            });
        }
        Ok(summaries)
    }

    async fn list_commits(&self, id: &SkillId) -> Result<Vec<SkillCommit>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM skill_commits WHERE skill_id = ? ORDER BY id ASC")
            .bind(id.as_str())
            .fetch_all(&self.pool.reader)
            .await
            .map_err(query_err)?;

        rows.iter().map(row_to_commit).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::pool::test_pool;
    use skilldesk_types::change::SkillChange;

    fn commit(skill: &Skill, commit_type: CommitType, cmds: Vec<SkillChange>) -> SkillCommit {
        SkillCommit {
            skill_id: skill.id.clone(),
            version: skill.version,
            committer_id: UserId::new("alice"),
            commit_type,
            commit_message: format!("{commit_type} commit"),
            commit_cmds: cmds,
            created_at: Utc::now(),
        }
    }

    async fn seeded() -> (SqliteSkillRepository, Skill) {
        let repo = SqliteSkillRepository::new(test_pool().await);
        let skill = Skill::new(SkillId::generate(), "Adding fractions");
        let rights = SkillRights::new_private(skill.id.clone(), UserId::new("alice"));
        repo.create(&skill, &rights, &commit(&skill, CommitType::Create, vec![]))
            .await
            .unwrap();
        (repo, skill)
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let (repo, skill) = seeded().await;

        let stored = repo.get(&skill.id).await.unwrap().unwrap();
        assert_eq!(stored.id, skill.id);
        assert_eq!(stored.description, "Adding fractions");
        assert_eq!(stored.version, 1);

        let rights = repo.get_rights(&skill.id).await.unwrap().unwrap();
        assert!(rights.skill_is_private);
        assert_eq!(rights.creator_id, UserId::new("alice"));

        assert!(repo.get(&SkillId::generate()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_version_compare_and_set() {
        let (repo, skill) = seeded().await;

        let mut v2 = skill.clone();
        v2.description = "Adding unlike fractions".to_string();
        v2.version = 2;
        let cmds = vec![SkillChange::DeleteSkillMisconception { id: 0 }];
        repo.save_version(&v2, 1, &commit(&v2, CommitType::Edit, cmds))
            .await
            .unwrap();

        let stored = repo.get(&skill.id).await.unwrap().unwrap();
        assert_eq!(stored.version, 2);
        assert_eq!(stored.description, "Adding unlike fractions");

        // A writer still holding version 1 loses.
        let mut stale = skill.clone();
        stale.version = 2;
        let err = repo
            .save_version(&stale, 1, &commit(&stale, CommitType::Edit, vec![]))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));

        let commits = repo.list_commits(&skill.id).await.unwrap();
        assert_eq!(commits.len(), 2, "losing write must not log a commit");
        assert_eq!(commits[1].commit_type, CommitType::Edit);
        assert_eq!(commits[1].commit_cmds.len(), 1);
    }

    #[tokio::test]
    async fn test_save_rights() {
        let (repo, skill) = seeded().await;
        let mut rights = repo.get_rights(&skill.id).await.unwrap().unwrap();
        rights.skill_is_private = false;
        repo.save_rights(&rights, &commit(&skill, CommitType::Publish, vec![]))
            .await
            .unwrap();

        let stored = repo.get_rights(&skill.id).await.unwrap().unwrap();
        assert!(!stored.skill_is_private);

        let summaries = repo.list_summaries().await.unwrap();
        assert_eq!(summaries.len(), 1);
        assert!(!summaries[0].skill_is_private);
    }

    #[tokio::test]
    async fn test_delete_cascades_rights_and_keeps_history() {
        let (repo, skill) = seeded().await;

        assert!(repo
            .delete(&skill.id, &commit(&skill, CommitType::Delete, vec![]))
            .await
            .unwrap());
        assert!(repo.get(&skill.id).await.unwrap().is_none());
        assert!(repo.get_rights(&skill.id).await.unwrap().is_none());

        let commits = repo.list_commits(&skill.id).await.unwrap();
        assert_eq!(commits.last().unwrap().commit_type, CommitType::Delete);

        assert!(!repo
            .delete(&skill.id, &commit(&skill, CommitType::Delete, vec![]))
            .await
            .unwrap());
    }
}
