//! Skill management service.
//!
//! Owns every mutation of a skill: creation, versioned updates built from
//! change lists, publishing, and deletion. Each mutation is recorded as a
//! commit in the same repository call that performs it.

use chrono::Utc;

use skilldesk_types::change::SkillChange;
use skilldesk_types::commit::{CommitType, SkillCommit};
use skilldesk_types::error::{RepositoryError, SkillError};
use skilldesk_types::rights::SkillRights;
use skilldesk_types::skill::{Skill, SkillId, SkillSummary};
use skilldesk_types::user::{Action, UserActionsInfo, UserId};

use crate::repository::skill::SkillRepository;

/// Whether `actions_info` allows editing the skill described by `rights`.
///
/// - no rights record: never editable
/// - `edit_any_skill`: always editable
/// - public skill: editable with `edit_public_skill`
/// - private skill: editable by its creator with `edit_own_private_skill`
pub fn check_can_edit_skill(actions_info: &UserActionsInfo, rights: Option<&SkillRights>) -> bool {
    let Some(rights) = rights else {
        return false;
    };

    if actions_info.can(Action::EditAnySkill) {
        return true;
    }
    if !rights.skill_is_private {
        return actions_info.can(Action::EditPublicSkill);
    }
    rights.is_creator(&actions_info.user_id) && actions_info.can(Action::EditOwnPrivateSkill)
}

fn storage_err(e: RepositoryError) -> SkillError {
    SkillError::StorageError(e.to_string())
}

/// Service for managing skills.
///
/// Generic over the repository to maintain the clean architecture
/// boundary -- no infrastructure dependencies in core.
pub struct SkillService<R: SkillRepository> {
    repo: R,
}

impl<R: SkillRepository> SkillService<R> {
    /// Create a new SkillService.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Create a private skill owned by `committer_id`, at version 1.
    pub async fn create_skill(
        &self,
        committer_id: &UserId,
        description: &str,
    ) -> Result<Skill, SkillError> {
        let skill = Skill::new(SkillId::generate(), description.trim());
        skill.validate()?;

        let rights = SkillRights::new_private(skill.id.clone(), committer_id.clone());
        let commit = SkillCommit {
            skill_id: skill.id.clone(),
            version: skill.version,
            committer_id: committer_id.clone(),
            commit_type: CommitType::Create,
            commit_message: format!("New skill created with description '{}'.", skill.description),
            commit_cmds: Vec::new(),
            created_at: skill.created_at,
        };

        self.repo
            .create(&skill, &rights, &commit)
            .await
            .map_err(storage_err)?;

        tracing::info!(skill_id = %skill.id, creator = %committer_id, "skill created");
        Ok(skill)
    }

    /// Fetch a skill.
    ///
    /// With `strict`, a missing skill is an error; otherwise it is `Ok(None)`.
    pub async fn get_skill_by_id(
        &self,
        skill_id: &SkillId,
        strict: bool,
    ) -> Result<Option<Skill>, SkillError> {
        let skill = self.repo.get(skill_id).await.map_err(storage_err)?;
        if strict && skill.is_none() {
            return Err(SkillError::NotFound);
        }
        Ok(skill)
    }

    /// Fetch the rights record of a skill, with the same `strict` convention
    /// as [`Self::get_skill_by_id`].
    pub async fn get_skill_rights(
        &self,
        skill_id: &SkillId,
        strict: bool,
    ) -> Result<Option<SkillRights>, SkillError> {
        let rights = self.repo.get_rights(skill_id).await.map_err(storage_err)?;
        if strict && rights.is_none() {
            return Err(SkillError::RightsNotFound(skill_id.to_string()));
        }
        Ok(rights)
    }

    /// See [`check_can_edit_skill`].
    pub fn check_can_edit_skill(
        &self,
        actions_info: &UserActionsInfo,
        rights: Option<&SkillRights>,
    ) -> bool {
        check_can_edit_skill(actions_info, rights)
    }

    /// Apply `changes` on top of `expected_version` and store the result as
    /// the next version.
    ///
    /// Nothing is written if any change fails to apply or the resulting
    /// skill is invalid. If the stored skill is no longer at
    /// `expected_version`, or another writer commits first, this fails with
    /// [`SkillError::Conflict`].
    pub async fn update_skill(
        &self,
        committer_id: &UserId,
        skill_id: &SkillId,
        expected_version: i32,
        changes: Vec<SkillChange>,
        commit_message: Option<&str>,
    ) -> Result<Skill, SkillError> {
        if changes.is_empty() {
            return Err(SkillError::Validation(format!(
                "Unexpected error: received an invalid change list when trying to save skill {skill_id}: []"
            )));
        }
        let commit_message = commit_message
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .ok_or_else(|| {
                SkillError::Validation("Expected a commit message, received none.".to_string())
            })?;

        let current = self
            .get_skill_by_id(skill_id, true)
            .await?
            .ok_or(SkillError::NotFound)?;
        let conflict = || SkillError::Conflict {
            skill_id: skill_id.to_string(),
            expected: expected_version,
        };
        if current.version != expected_version {
            return Err(conflict());
        }

        let mut updated = current.clone();
        for change in &changes {
            change.apply(&mut updated)?;
        }
        updated.validate()?;
        updated.version = expected_version + 1;
        updated.updated_at = Utc::now();

        let commit = SkillCommit {
            skill_id: skill_id.clone(),
            version: updated.version,
            committer_id: committer_id.clone(),
            commit_type: CommitType::Edit,
            commit_message: commit_message.to_string(),
            commit_cmds: changes,
            created_at: updated.updated_at,
        };

        self.repo
            .save_version(&updated, expected_version, &commit)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => conflict(),
                other => storage_err(other),
            })?;

        tracing::info!(
            skill_id = %skill_id,
            version = updated.version,
            changes = commit.commit_cmds.len(),
            "skill updated"
        );
        Ok(updated)
    }

    /// Permanently delete a skill and its rights.
    pub async fn delete_skill(
        &self,
        committer_id: &UserId,
        skill_id: &SkillId,
    ) -> Result<(), SkillError> {
        let skill = self
            .get_skill_by_id(skill_id, true)
            .await?
            .ok_or(SkillError::NotFound)?;

        let commit = SkillCommit {
            skill_id: skill_id.clone(),
            version: skill.version,
            committer_id: committer_id.clone(),
            commit_type: CommitType::Delete,
            commit_message: "Deleted skill.".to_string(),
            commit_cmds: Vec::new(),
            created_at: Utc::now(),
        };

        let deleted = self.repo.delete(skill_id, &commit).await.map_err(storage_err)?;
        if !deleted {
            return Err(SkillError::NotFound);
        }

        tracing::info!(skill_id = %skill_id, committer = %committer_id, "skill deleted");
        Ok(())
    }

    /// Make a private skill public. Only its creator may publish it.
    pub async fn publish_skill(
        &self,
        skill_id: &SkillId,
        committer_id: &UserId,
    ) -> Result<SkillRights, SkillError> {
        let mut rights = self
            .get_skill_rights(skill_id, true)
            .await?
            .ok_or_else(|| SkillError::RightsNotFound(skill_id.to_string()))?;

        if !rights.is_creator(committer_id) {
            return Err(SkillError::Unauthorized(
                "The user does not have enough rights to publish the skill.".to_string(),
            ));
        }
        if !rights.skill_is_private {
            return Err(SkillError::Validation(
                "The skill is already published.".to_string(),
            ));
        }

        let skill = self
            .get_skill_by_id(skill_id, true)
            .await?
            .ok_or(SkillError::NotFound)?;

        rights.skill_is_private = false;
        let commit = SkillCommit {
            skill_id: skill_id.clone(),
            version: skill.version,
            committer_id: committer_id.clone(),
            commit_type: CommitType::Publish,
            commit_message: "Published the skill.".to_string(),
            commit_cmds: Vec::new(),
            created_at: Utc::now(),
        };
        self.repo
            .save_rights(&rights, &commit)
            .await
            .map_err(storage_err)?;

        tracing::info!(skill_id = %skill_id, committer = %committer_id, "skill published");
        Ok(rights)
    }

    pub async fn list_skill_summaries(&self) -> Result<Vec<SkillSummary>, SkillError> {
        self.repo.list_summaries().await.map_err(storage_err)
    }

    pub async fn get_skill_commits(&self, skill_id: &SkillId) -> Result<Vec<SkillCommit>, SkillError> {
        self.repo.list_commits(skill_id).await.map_err(storage_err)
    }
}
