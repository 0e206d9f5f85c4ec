use serde::{Deserialize, Serialize};

use crate::skill::SkillId;
use crate::user::UserId;

/// Visibility and ownership metadata for a skill.
///
/// Skills are created private, owned by their creator, and become public
/// exactly once through publishing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRights {
    pub skill_id: SkillId,
    pub creator_id: UserId,
    pub skill_is_private: bool,
}

impl SkillRights {
    /// Rights for a freshly created (private) skill.
    pub fn new_private(skill_id: SkillId, creator_id: UserId) -> Self {
        Self {
            skill_id,
            creator_id,
            skill_is_private: true,
        }
    }

    pub fn is_creator(&self, user_id: &UserId) -> bool {
        &self.creator_id == user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rights_are_private() {
        let rights = SkillRights::new_private(SkillId::generate(), UserId::new("alice"));
        assert!(rights.skill_is_private);
        assert!(rights.is_creator(&UserId::new("alice")));
        assert!(!rights.is_creator(&UserId::new("bob")));
    }
}
