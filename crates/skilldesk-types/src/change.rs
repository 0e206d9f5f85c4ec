//! Skill change commands.
//!
//! An update request carries an ordered list of change dicts, each of the form
//! `{"cmd": "<command>", ...params}`. They are parsed into [`SkillChange`]
//! values up front so that a malformed entry rejects the whole request before
//! anything is applied.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SkillError;
use crate::skill::{Misconception, Skill};

/// Top-level skill properties that `update_skill_property` may change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillProperty {
    Description,
    LanguageCode,
}

/// Concept-card properties that `update_skill_contents_property` may change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillContentsProperty {
    Explanation,
    WorkedExamples,
}

/// Misconception fields that `update_skill_misconceptions_property` may change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MisconceptionProperty {
    Name,
    Notes,
    Feedback,
}

/// A single atomic edit to a skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum SkillChange {
    UpdateSkillProperty {
        property_name: SkillProperty,
        new_value: Value,
        #[serde(default)]
        old_value: Value,
    },
    UpdateSkillContentsProperty {
        property_name: SkillContentsProperty,
        new_value: Value,
        #[serde(default)]
        old_value: Value,
    },
    UpdateSkillMisconceptionsProperty {
        id: i32,
        property_name: MisconceptionProperty,
        new_value: Value,
        #[serde(default)]
        old_value: Value,
    },
    AddSkillMisconception {
        new_misconception_dict: Misconception,
    },
    DeleteSkillMisconception {
        id: i32,
    },
}

impl SkillChange {
    /// Build a change from a raw change dict, validating its shape.
    pub fn from_dict(dict: &Value) -> Result<Self, SkillError> {
        let obj = dict.as_object().ok_or_else(|| {
            SkillError::Validation("Expected change dict to be an object".to_string())
        })?;
        if !obj.contains_key("cmd") {
            return Err(SkillError::Validation(
                "Missing cmd key in change dict".to_string(),
            ));
        }

        let change: SkillChange = serde_json::from_value(dict.clone())
            .map_err(|e| SkillError::Validation(format!("Invalid change dict: {e}")))?;
        change.check_value_type()?;
        Ok(change)
    }

    /// The command name as it appears in the change dict.
    pub fn cmd(&self) -> &'static str {
        match self {
            Self::UpdateSkillProperty { .. } => "update_skill_property",
            Self::UpdateSkillContentsProperty { .. } => "update_skill_contents_property",
            Self::UpdateSkillMisconceptionsProperty { .. } => {
                "update_skill_misconceptions_property"
            }
            Self::AddSkillMisconception { .. } => "add_skill_misconception",
            Self::DeleteSkillMisconception { .. } => "delete_skill_misconception",
        }
    }

    fn check_value_type(&self) -> Result<(), SkillError> {
        match self {
            Self::UpdateSkillProperty { new_value, .. }
            | Self::UpdateSkillMisconceptionsProperty { new_value, .. }
            | Self::UpdateSkillContentsProperty {
                property_name: SkillContentsProperty::Explanation,
                new_value,
                ..
            } => {
                expect_string(new_value, self.cmd())?;
            }
            Self::UpdateSkillContentsProperty {
                property_name: SkillContentsProperty::WorkedExamples,
                new_value,
                ..
            } => {
                expect_string_list(new_value, self.cmd())?;
            }
            Self::AddSkillMisconception { .. } | Self::DeleteSkillMisconception { .. } => {}
        }
        Ok(())
    }

    /// Apply this change to a skill in place.
    ///
    /// Does not bump the version or validate the resulting skill; the caller
    /// does both once the whole change list has been applied.
    pub fn apply(&self, skill: &mut Skill) -> Result<(), SkillError> {
        match self {
            Self::UpdateSkillProperty {
                property_name,
                new_value,
                ..
            } => {
                let value = expect_string(new_value, self.cmd())?;
                match property_name {
                    SkillProperty::Description => skill.description = value,
                    SkillProperty::LanguageCode => skill.language_code = value,
                }
            }
            Self::UpdateSkillContentsProperty {
                property_name,
                new_value,
                ..
            } => match property_name {
                SkillContentsProperty::Explanation => {
                    skill.skill_contents.explanation = expect_string(new_value, self.cmd())?;
                }
                SkillContentsProperty::WorkedExamples => {
                    skill.skill_contents.worked_examples =
                        expect_string_list(new_value, self.cmd())?;
                }
            },
            Self::UpdateSkillMisconceptionsProperty {
                id,
                property_name,
                new_value,
                ..
            } => {
                let value = expect_string(new_value, self.cmd())?;
                let misconception = skill.find_misconception_mut(*id).ok_or_else(|| {
                    SkillError::Validation(format!("There is no misconception with the given id: {id}"))
                })?;
                match property_name {
                    MisconceptionProperty::Name => misconception.name = value,
                    MisconceptionProperty::Notes => misconception.notes = value,
                    MisconceptionProperty::Feedback => misconception.feedback = value,
                }
            }
            Self::AddSkillMisconception {
                new_misconception_dict,
            } => {
                if new_misconception_dict.id != skill.next_misconception_id {
                    return Err(SkillError::Validation(format!(
                        "Expected new misconception id to be {}, received {}",
                        skill.next_misconception_id, new_misconception_dict.id
                    )));
                }
                skill.misconceptions.push(new_misconception_dict.clone());
                skill.next_misconception_id += 1;
            }
            Self::DeleteSkillMisconception { id } => {
                let before = skill.misconceptions.len();
                skill.misconceptions.retain(|m| m.id != *id);
                if skill.misconceptions.len() == before {
                    return Err(SkillError::Validation(format!(
                        "There is no misconception with the given id: {id}"
                    )));
                }
            }
        }
        Ok(())
    }
}

fn expect_string(value: &Value, cmd: &str) -> Result<String, SkillError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| SkillError::Validation(format!("Expected a string new_value for {cmd}")))
}

fn expect_string_list(value: &Value, cmd: &str) -> Result<Vec<String>, SkillError> {
    let items = value.as_array().ok_or_else(|| {
        SkillError::Validation(format!("Expected a list new_value for {cmd}"))
    })?;
    items.iter().map(|item| expect_string(item, cmd)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skill::SkillId;
    use serde_json::json;

    fn skill() -> Skill {
        Skill::new(SkillId::generate(), "Adding fractions")
    }

    #[test]
    fn test_from_dict_update_description() {
        let change = SkillChange::from_dict(&json!({
            "cmd": "update_skill_property",
            "property_name": "description",
            "new_value": "Subtracting fractions",
            "old_value": "Adding fractions",
        }))
        .unwrap();

        let mut s = skill();
        change.apply(&mut s).unwrap();
        assert_eq!(s.description, "Subtracting fractions");
        assert_eq!(change.cmd(), "update_skill_property");
    }

    #[test]
    fn test_from_dict_missing_cmd() {
        let err = SkillChange::from_dict(&json!({"property_name": "description"})).unwrap_err();
        assert_eq!(err.to_string(), "Missing cmd key in change dict");
    }

    #[test]
    fn test_from_dict_unknown_cmd() {
        let err = SkillChange::from_dict(&json!({"cmd": "rename_everything"})).unwrap_err();
        assert!(matches!(err, SkillError::Validation(_)));
        assert!(err.to_string().contains("rename_everything"));
    }

    #[test]
    fn test_from_dict_unknown_property() {
        let err = SkillChange::from_dict(&json!({
            "cmd": "update_skill_property",
            "property_name": "title",
            "new_value": "x",
        }))
        .unwrap_err();
        assert!(matches!(err, SkillError::Validation(_)));
    }

    #[test]
    fn test_from_dict_rejects_wrong_value_type() {
        let err = SkillChange::from_dict(&json!({
            "cmd": "update_skill_contents_property",
            "property_name": "worked_examples",
            "new_value": "not a list",
        }))
        .unwrap_err();
        assert!(err.to_string().contains("list"));
    }

    #[test]
    fn test_from_dict_rejects_non_object() {
        assert!(SkillChange::from_dict(&json!(["cmd"])).is_err());
    }

    #[test]
    fn test_worked_examples_replace_whole_list() {
        let change = SkillChange::from_dict(&json!({
            "cmd": "update_skill_contents_property",
            "property_name": "worked_examples",
            "new_value": ["1/2 + 1/4 = 3/4", "1/3 + 1/3 = 2/3"],
            "old_value": [],
        }))
        .unwrap();
        let mut s = skill();
        change.apply(&mut s).unwrap();
        assert_eq!(s.skill_contents.worked_examples.len(), 2);
    }

    #[test]
    fn test_misconception_lifecycle() {
        let mut s = skill();
        SkillChange::from_dict(&json!({
            "cmd": "add_skill_misconception",
            "new_misconception_dict": {"id": 0, "name": "Adds denominators"},
        }))
        .unwrap()
        .apply(&mut s)
        .unwrap();
        assert_eq!(s.next_misconception_id, 1);

        SkillChange::from_dict(&json!({
            "cmd": "update_skill_misconceptions_property",
            "id": 0,
            "property_name": "feedback",
            "new_value": "Denominators stay the same.",
        }))
        .unwrap()
        .apply(&mut s)
        .unwrap();
        assert_eq!(s.misconceptions[0].feedback, "Denominators stay the same.");

        SkillChange::from_dict(&json!({"cmd": "delete_skill_misconception", "id": 0}))
            .unwrap()
            .apply(&mut s)
            .unwrap();
        assert!(s.misconceptions.is_empty());
        // Ids are never reused.
        assert_eq!(s.next_misconception_id, 1);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_add_misconception_with_wrong_id_fails() {
        let mut s = skill();
        let change = SkillChange::from_dict(&json!({
            "cmd": "add_skill_misconception",
            "new_misconception_dict": {"id": 5, "name": "Off by one"},
        }))
        .unwrap();
        assert!(change.apply(&mut s).is_err());
    }

    #[test]
    fn test_delete_missing_misconception_fails() {
        let mut s = skill();
        let change =
            SkillChange::from_dict(&json!({"cmd": "delete_skill_misconception", "id": 3})).unwrap();
        let err = change.apply(&mut s).unwrap_err();
        assert!(err.to_string().contains("no misconception"));
    }

    #[test]
    fn test_serialized_change_keeps_cmd_tag() {
        let change = SkillChange::DeleteSkillMisconception { id: 2 };
        let json = serde_json::to_value(&change).unwrap();
        assert_eq!(json, json!({"cmd": "delete_skill_misconception", "id": 2}));
    }
}
