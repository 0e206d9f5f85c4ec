//! Skill repository trait definition.

use skilldesk_types::commit::SkillCommit;
use skilldesk_types::error::RepositoryError;
use skilldesk_types::rights::SkillRights;
use skilldesk_types::skill::{Skill, SkillId, SkillSummary};

/// Repository trait for skills, their rights, and their commit log.
///
/// Every mutating method takes the commit that describes it and must persist
/// both atomically. Uses native async fn in traits (no async_trait macro).
pub trait SkillRepository: Send + Sync {
    /// Insert a brand new skill together with its rights.
    fn create(
        &self,
        skill: &Skill,
        rights: &SkillRights,
        commit: &SkillCommit,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Get a skill by id.
    fn get(
        &self,
        id: &SkillId,
    ) -> impl std::future::Future<Output = Result<Option<Skill>, RepositoryError>> + Send;

    /// Get the rights record of a skill.
    fn get_rights(
        &self,
        id: &SkillId,
    ) -> impl std::future::Future<Output = Result<Option<SkillRights>, RepositoryError>> + Send;

    /// Store a new version of a skill.
    ///
    /// Must fail with [`RepositoryError::Conflict`] unless the stored version
    /// still equals `expected_version` (compare-and-set).
    fn save_version(
        &self,
        skill: &Skill,
        expected_version: i32,
        commit: &SkillCommit,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Overwrite a skill's rights record.
    fn save_rights(
        &self,
        rights: &SkillRights,
        commit: &SkillCommit,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Permanently delete a skill and its rights. Returns false if nothing was deleted.
    fn delete(
        &self,
        id: &SkillId,
        commit: &SkillCommit,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;

    /// List summaries of every stored skill, most recently updated first.
    fn list_summaries(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<SkillSummary>, RepositoryError>> + Send;

    /// List the commit log of a skill, oldest first. Survives deletion.
    fn list_commits(
        &self,
        id: &SkillId,
    ) -> impl std::future::Future<Output = Result<Vec<SkillCommit>, RepositoryError>> + Send;
}
