//! Commit log entries recorded for every skill mutation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::change::SkillChange;
use crate::skill::SkillId;
use crate::user::UserId;

/// The kind of mutation a commit records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitType {
    Create,
    Edit,
    Publish,
    Delete,
}

impl fmt::Display for CommitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => write!(f, "create"),
            Self::Edit => write!(f, "edit"),
            Self::Publish => write!(f, "publish"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

impl FromStr for CommitType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(Self::Create),
            "edit" => Ok(Self::Edit),
            "publish" => Ok(Self::Publish),
            "delete" => Ok(Self::Delete),
            other => Err(format!("invalid commit type: '{other}'")),
        }
    }
}

/// One entry in a skill's history.
///
/// `version` is the skill version *after* the commit. Publish commits do not
/// change content, so they carry the version that was published.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillCommit {
    pub skill_id: SkillId,
    pub version: i32,
    pub committer_id: UserId,
    pub commit_type: CommitType,
    pub commit_message: String,
    pub commit_cmds: Vec<SkillChange>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_type_display_parse() {
        for t in [
            CommitType::Create,
            CommitType::Edit,
            CommitType::Publish,
            CommitType::Delete,
        ] {
            assert_eq!(t.to_string().parse::<CommitType>().unwrap(), t);
        }
        assert!("revert".parse::<CommitType>().is_err());
    }
}
