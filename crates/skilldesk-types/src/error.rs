use thiserror::Error;

/// Errors related to skill operations.
#[derive(Debug, Error)]
pub enum SkillError {
    #[error("skill not found")]
    NotFound,

    #[error("skill rights not found for skill '{0}'")]
    RightsNotFound(String),

    #[error("invalid skill id: '{0}'")]
    InvalidId(String),

    /// Domain validation failure (bad change dict, invalid skill state,
    /// missing commit message, ...).
    #[error("{0}")]
    Validation(String),

    /// The acting user may not perform the requested mutation.
    #[error("{0}")]
    Unauthorized(String),

    #[error("skill '{skill_id}' was modified concurrently (expected version {expected})")]
    Conflict { skill_id: String, expected: i32 },

    #[error("storage error: {0}")]
    StorageError(String),
}

/// Errors related to user and API key operations.
#[derive(Debug, Error)]
pub enum UserError {
    #[error("user not found")]
    NotFound,

    #[error("invalid role: '{0}'")]
    InvalidRole(String),

    #[error("storage error: {0}")]
    StorageError(String),
}

/// Errors raised by the platform application-identity API.
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("metadata request failed: {0}")]
    Request(String),

    #[error("metadata server returned status {0}")]
    Status(u16),

    #[error("metadata server returned an empty value for '{0}'")]
    EmptyValue(String),
}

/// Errors from repository operations (used by trait definitions in skilldesk-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_error_display() {
        let err = SkillError::InvalidId("abc".to_string());
        assert_eq!(err.to_string(), "invalid skill id: 'abc'");
    }

    #[test]
    fn test_validation_error_is_bare_message() {
        let err = SkillError::Validation("The skill is already published.".to_string());
        assert_eq!(err.to_string(), "The skill is already published.");
    }

    #[test]
    fn test_conflict_display() {
        let err = SkillError::Conflict {
            skill_id: "abcdefghijkl".to_string(),
            expected: 3,
        };
        assert!(err.to_string().contains("abcdefghijkl"));
        assert!(err.to_string().contains('3'));
    }

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
    }
}
