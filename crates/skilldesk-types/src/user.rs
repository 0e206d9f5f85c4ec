//! Users, roles, and the actions each role permits.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::error::UserError;

/// Opaque user identifier (as issued by the authentication layer).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Role assigned to a user. Each role maps to a fixed set of [`Action`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Guest,
    Learner,
    SkillCreator,
    TopicManager,
    Admin,
}

impl Default for Role {
    fn default() -> Self {
        Self::Learner
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Guest => write!(f, "guest"),
            Self::Learner => write!(f, "learner"),
            Self::SkillCreator => write!(f, "skill_creator"),
            Self::TopicManager => write!(f, "topic_manager"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

impl FromStr for Role {
    type Err = UserError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "guest" => Ok(Self::Guest),
            "learner" => Ok(Self::Learner),
            "skill_creator" => Ok(Self::SkillCreator),
            "topic_manager" => Ok(Self::TopicManager),
            "admin" => Ok(Self::Admin),
            other => Err(UserError::InvalidRole(other.to_string())),
        }
    }
}

/// An action a user may be allowed to perform on skills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    CreateSkill,
    EditOwnPrivateSkill,
    EditPublicSkill,
    EditAnySkill,
    PublishOwnedSkill,
    DeleteAnySkill,
}

const CREATOR_ACTIONS: &[Action] = &[
    Action::CreateSkill,
    Action::EditOwnPrivateSkill,
    Action::PublishOwnedSkill,
];

const TOPIC_MANAGER_ACTIONS: &[Action] = &[
    Action::CreateSkill,
    Action::EditOwnPrivateSkill,
    Action::PublishOwnedSkill,
    Action::EditPublicSkill,
];

const ADMIN_ACTIONS: &[Action] = &[
    Action::CreateSkill,
    Action::EditOwnPrivateSkill,
    Action::EditPublicSkill,
    Action::EditAnySkill,
    Action::PublishOwnedSkill,
    Action::DeleteAnySkill,
];

impl Role {
    /// The actions granted to this role.
    pub fn actions(&self) -> &'static [Action] {
        match self {
            Self::Guest | Self::Learner => &[],
            Self::SkillCreator => CREATOR_ACTIONS,
            Self::TopicManager => TOPIC_MANAGER_ACTIONS,
            Self::Admin => ADMIN_ACTIONS,
        }
    }
}

/// Per-request permission context for the acting user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserActionsInfo {
    pub user_id: UserId,
    pub role: Role,
    pub actions: Vec<Action>,
}

impl UserActionsInfo {
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self {
            user_id,
            role,
            actions: role.actions().to_vec(),
        }
    }

    pub fn can(&self, action: Action) -> bool {
        self.actions.contains(&action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_display_parse() {
        for role in [
            Role::Guest,
            Role::Learner,
            Role::SkillCreator,
            Role::TopicManager,
            Role::Admin,
        ] {
            let parsed: Role = role.to_string().parse().unwrap();
            assert_eq!(parsed, role);
        }
        assert!("wizard".parse::<Role>().is_err());
    }

    #[test]
    fn test_learner_has_no_skill_actions() {
        let info = UserActionsInfo::new(UserId::new("u1"), Role::Learner);
        assert!(info.actions.is_empty());
        assert!(!info.can(Action::EditOwnPrivateSkill));
    }

    #[test]
    fn test_topic_manager_edits_public_but_cannot_delete() {
        let info = UserActionsInfo::new(UserId::new("tm"), Role::TopicManager);
        assert!(info.can(Action::EditPublicSkill));
        assert!(!info.can(Action::EditAnySkill));
        assert!(!info.can(Action::DeleteAnySkill));
    }

    #[test]
    fn test_admin_has_every_action() {
        let info = UserActionsInfo::new(UserId::new("root"), Role::Admin);
        assert!(info.can(Action::DeleteAnySkill));
        assert!(info.can(Action::EditAnySkill));
    }
}
