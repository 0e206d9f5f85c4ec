//! Skill domain types.
//!
//! A skill is a versioned pedagogical content unit: a description, a concept
//! card (explanation + worked examples), and a list of common misconceptions.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::error::SkillError;

/// Length of every skill id.
pub const SKILL_ID_LENGTH: usize = 12;

/// Language codes a skill may be authored in.
pub const SUPPORTED_LANGUAGE_CODES: &[&str] = &["en", "es", "fr", "hi", "pt", "zh", "ar"];

/// Default language for newly created skills.
pub const DEFAULT_LANGUAGE_CODE: &str = "en";

/// Unique identifier for a skill: 12 characters of the URL-safe base64 alphabet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillId(String);

impl SkillId {
    /// Generate a fresh random skill id.
    pub fn generate() -> Self {
        let uuid = Uuid::new_v4();
        // 9 random bytes encode to exactly 12 base64 characters.
        Self(URL_SAFE_NO_PAD.encode(&uuid.as_bytes()[..9]))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SkillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SkillId {
    type Err = SkillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        require_valid_skill_id(s)
    }
}

/// Validate the format of a skill id, returning the typed id on success.
pub fn require_valid_skill_id(id: &str) -> Result<SkillId, SkillError> {
    if id.len() != SKILL_ID_LENGTH {
        return Err(SkillError::InvalidId(id.to_string()));
    }
    let valid_chars = id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid_chars {
        return Err(SkillError::InvalidId(id.to_string()));
    }
    Ok(SkillId(id.to_string()))
}

/// The concept card of a skill.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillContents {
    pub explanation: String,
    #[serde(default)]
    pub worked_examples: Vec<String>,
}

/// A common learner misconception attached to a skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Misconception {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub feedback: String,
}

/// A versioned skill.
///
/// `version` starts at 1 and increases by exactly one per content commit.
/// The serialized form of this struct is what the editor receives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub id: SkillId,
    pub description: String,
    pub language_code: String,
    pub skill_contents: SkillContents,
    #[serde(default)]
    pub misconceptions: Vec<Misconception>,
    pub next_misconception_id: i32,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Skill {
    /// Create a first-version skill with an empty concept card.
    pub fn new(id: SkillId, description: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            description: description.into(),
            language_code: DEFAULT_LANGUAGE_CODE.to_string(),
            skill_contents: SkillContents::default(),
            misconceptions: Vec::new(),
            next_misconception_id: 0,
            version: 1,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn find_misconception_mut(&mut self, id: i32) -> Option<&mut Misconception> {
        self.misconceptions.iter_mut().find(|m| m.id == id)
    }

    /// Check the invariants a skill must satisfy before it is persisted.
    pub fn validate(&self) -> Result<(), SkillError> {
        if self.description.trim().is_empty() {
            return Err(SkillError::Validation(
                "Skill description should be a non-empty string".to_string(),
            ));
        }
        if !SUPPORTED_LANGUAGE_CODES.contains(&self.language_code.as_str()) {
            return Err(SkillError::Validation(format!(
                "Invalid language code: {}",
                self.language_code
            )));
        }

        let mut seen = HashSet::new();
        for misconception in &self.misconceptions {
            if !seen.insert(misconception.id) {
                return Err(SkillError::Validation(format!(
                    "Duplicate misconception id: {}",
                    misconception.id
                )));
            }
            if misconception.id < 0 || misconception.id >= self.next_misconception_id {
                return Err(SkillError::Validation(format!(
                    "The misconception with id {} is out of bounds.",
                    misconception.id
                )));
            }
            if misconception.name.trim().is_empty() {
                return Err(SkillError::Validation(
                    "Misconception name should be a non-empty string".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Compact listing entry for skills.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillSummary {
    pub id: SkillId,
    pub description: String,
    pub language_code: String,
    pub misconception_count: usize,
    pub worked_examples_count: usize,
    pub version: i32,
    pub skill_is_private: bool,
    pub updated_at: DateTime<Utc>,
}
