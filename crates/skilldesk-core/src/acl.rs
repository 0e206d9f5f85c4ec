//! Capability checks evaluated before a skill handler body runs.
//!
//! Each skill endpoint requires one [`SkillCapability`]. [`evaluate`] turns the
//! acting user's permission context and the skill's rights into an
//! [`AccessDecision`]; the HTTP layer rejects the request on `Denied`.

use skilldesk_types::rights::SkillRights;
use skilldesk_types::user::{Action, UserActionsInfo};

use crate::service::skill::check_can_edit_skill;

/// The capability an endpoint requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillCapability {
    EditSkill,
    DeleteSkill,
    PublishSkill,
}

/// Outcome of a capability check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    Granted,
    Denied(String),
}

impl AccessDecision {
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// Decide whether `actions_info` holds `capability` for the skill with `rights`.
///
/// A missing rights record does not deny edit or publish access: the handler
/// body reports the missing skill with its own error.
pub fn evaluate(
    capability: SkillCapability,
    actions_info: &UserActionsInfo,
    rights: Option<&SkillRights>,
) -> AccessDecision {
    match capability {
        SkillCapability::EditSkill => {
            if rights.is_none() || check_can_edit_skill(actions_info, rights) {
                AccessDecision::Granted
            } else {
                AccessDecision::Denied("You do not have credentials to edit this skill.".to_string())
            }
        }
        SkillCapability::DeleteSkill => {
            if actions_info.can(Action::DeleteAnySkill) {
                AccessDecision::Granted
            } else {
                AccessDecision::Denied(
                    "You do not have credentials to delete the skill.".to_string(),
                )
            }
        }
        SkillCapability::PublishSkill => {
            if actions_info.can(Action::PublishOwnedSkill) || actions_info.can(Action::EditAnySkill)
            {
                AccessDecision::Granted
            } else {
                AccessDecision::Denied(
                    "You do not have credentials to publish the skill.".to_string(),
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skilldesk_types::skill::SkillId;
    use skilldesk_types::user::{Role, UserId};

    fn info(user: &str, role: Role) -> UserActionsInfo {
        UserActionsInfo::new(UserId::new(user), role)
    }

    #[test]
    fn test_edit_follows_check_can_edit() {
        let rights = SkillRights::new_private(SkillId::generate(), UserId::new("alice"));
        let granted = evaluate(
            SkillCapability::EditSkill,
            &info("alice", Role::SkillCreator),
            Some(&rights),
        );
        assert!(granted.is_granted());

        let denied = evaluate(
            SkillCapability::EditSkill,
            &info("bob", Role::SkillCreator),
            Some(&rights),
        );
        assert!(matches!(denied, AccessDecision::Denied(reason) if reason.contains("edit")));
    }

    #[test]
    fn test_edit_without_rights_is_deferred_to_handler() {
        assert!(evaluate(SkillCapability::EditSkill, &info("x", Role::Learner), None).is_granted());
    }

    #[test]
    fn test_delete_requires_admin() {
        let rights = SkillRights::new_private(SkillId::generate(), UserId::new("alice"));
        assert!(
            !evaluate(SkillCapability::DeleteSkill, &info("alice", Role::TopicManager), Some(&rights))
                .is_granted()
        );
        assert!(
            evaluate(SkillCapability::DeleteSkill, &info("root", Role::Admin), Some(&rights))
                .is_granted()
        );
    }

    #[test]
    fn test_publish_requires_publish_action() {
        assert!(!evaluate(SkillCapability::PublishSkill, &info("l", Role::Learner), None).is_granted());
        assert!(
            evaluate(SkillCapability::PublishSkill, &info("c", Role::SkillCreator), None).is_granted()
        );
    }
}
