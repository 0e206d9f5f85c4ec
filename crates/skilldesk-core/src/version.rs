//! Optimistic version check for mutating skill requests.

use skilldesk_types::error::SkillError;

/// Reject a mutation whose submitted version is absent or not the stored one.
pub fn require_valid_version(
    submitted_version: Option<i32>,
    current_version: i32,
) -> Result<(), SkillError> {
    let Some(submitted) = submitted_version else {
        return Err(SkillError::Validation(
            "Invalid PUT request: a version must be specified.".to_string(),
        ));
    };
    if submitted != current_version {
        return Err(SkillError::Validation(format!(
            "Trying to update version {current_version} of skill from version {submitted}, \
             which is too old. Please reload the page and try again."
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_version_passes() {
        assert!(require_valid_version(Some(3), 3).is_ok());
    }

    #[test]
    fn test_missing_version_rejected() {
        let err = require_valid_version(None, 1).unwrap_err();
        assert_eq!(err.to_string(), "Invalid PUT request: a version must be specified.");
    }

    #[test]
    fn test_stale_version_rejected() {
        let err = require_valid_version(Some(2), 3).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Trying to update version 3 of skill from version 2, which is too old. \
             Please reload the page and try again."
        );
    }

    #[test]
    fn test_newer_version_rejected_too() {
        assert!(matches!(
            require_valid_version(Some(4), 3),
            Err(SkillError::Validation(_))
        ));
    }
}
