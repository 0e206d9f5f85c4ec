//! Application error type mapping to HTTP status codes and envelope format.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use skilldesk_types::error::{SkillError, UserError};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Skill-related errors.
    Skill(SkillError),
    /// User-related errors.
    User(UserError),
    /// Page or resource not available.
    NotFound(String),
    /// Authentication or authorization failure.
    Unauthorized(String),
    /// Request body missing, not JSON, or with fields of the wrong shape.
    InvalidInput(String),
}

impl From<SkillError> for AppError {
    fn from(e: SkillError) -> Self {
        AppError::Skill(e)
    }
}

impl From<UserError> for AppError {
    fn from(e: UserError) -> Self {
        AppError::User(e)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Skill(SkillError::NotFound) => (
                StatusCode::NOT_FOUND,
                "SKILL_NOT_FOUND",
                "The skill with the given id doesn't exist.".to_string(),
            ),
            AppError::Skill(SkillError::RightsNotFound(_)) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                "Could not find skill rights associated with the provided skill id".to_string(),
            ),
            AppError::Skill(e @ SkillError::InvalidId(_)) => {
                (StatusCode::BAD_REQUEST, "INVALID_SKILL_ID", e.to_string())
            }
            AppError::Skill(SkillError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::Skill(SkillError::Unauthorized(msg)) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
            }
            AppError::Skill(e @ SkillError::Conflict { .. }) => {
                (StatusCode::CONFLICT, "VERSION_CONFLICT", e.to_string())
            }
            AppError::Skill(e @ SkillError::StorageError(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "SKILL_ERROR", e.to_string())
            }
            AppError::User(UserError::NotFound) => {
                (StatusCode::NOT_FOUND, "USER_NOT_FOUND", "User not found".to_string())
            }
            AppError::User(e @ UserError::InvalidRole(_)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.to_string())
            }
            AppError::User(e) => (StatusCode::INTERNAL_SERVER_ERROR, "USER_ERROR", e.to_string()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
            AppError::InvalidInput(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        if status.is_server_error() {
            tracing::error!(code, %message, "request failed");
        } else {
            tracing::debug!(status = status.as_u16(), code, %message, "request rejected");
        }

        let body = json!({
            "data": null,
            "meta": {
                "request_id": uuid::Uuid::now_v7().to_string(),
                "timestamp": chrono::Utc::now().to_rfc3339(),
                "response_time_ms": 0
            },
            "errors": [{
                "code": code,
                "message": message,
            }]
        });

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_errors_map_to_status() {
        let cases = [
            (AppError::from(SkillError::NotFound), StatusCode::NOT_FOUND),
            (AppError::from(SkillError::InvalidId("x".into())), StatusCode::BAD_REQUEST),
            (AppError::from(SkillError::Validation("bad".into())), StatusCode::BAD_REQUEST),
            (AppError::from(SkillError::Unauthorized("no".into())), StatusCode::UNAUTHORIZED),
            (
                AppError::from(SkillError::Conflict { skill_id: "x".into(), expected: 2 }),
                StatusCode::CONFLICT,
            ),
            (AppError::InvalidInput("bad body".into()), StatusCode::BAD_REQUEST),
            (
                AppError::from(SkillError::StorageError("disk".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_missing_rights_message() {
        let (status, _, message) = AppError::from(SkillError::RightsNotFound("x".into())).parts();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            message,
            "Could not find skill rights associated with the provided skill id"
        );
    }
}
