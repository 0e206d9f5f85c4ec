//! API key authentication extractor.
//!
//! Extracts the API key from:
//! - `Authorization: Bearer <key>` header
//! - `X-API-Key: <key>` header
//!
//! and resolves it to the user that owns it.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use skilldesk_types::user::UserId;

use crate::http::error::AppError;
use crate::state::AppState;

/// The user behind a request's API key.
pub struct Authenticated {
    pub user_id: UserId,
}

impl FromRequestParts<AppState> for Authenticated {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let api_key = extract_api_key(parts)?;

        match state.user_service.authenticate(&api_key).await? {
            Some(user_id) => {
                tracing::debug!(user_id = %user_id, "request authenticated");
                Ok(Authenticated { user_id })
            }
            None => Err(AppError::Unauthorized(
                "Invalid API key. Provide a valid key via 'Authorization: Bearer <key>' or 'X-API-Key: <key>' header.".to_string(),
            )),
        }
    }
}

fn extract_api_key(parts: &Parts) -> Result<String, AppError> {
    if let Some(auth) = parts.headers.get("authorization") {
        let auth_str = auth.to_str().map_err(|_| {
            AppError::Unauthorized("Invalid Authorization header encoding".to_string())
        })?;
        if let Some(key) = auth_str.strip_prefix("Bearer ") {
            return Ok(key.trim().to_string());
        }
    }

    if let Some(key) = parts.headers.get("x-api-key") {
        let key_str = key.to_str().map_err(|_| {
            AppError::Unauthorized("Invalid X-API-Key header encoding".to_string())
        })?;
        return Ok(key_str.trim().to_string());
    }

    Err(AppError::Unauthorized(
        "Missing API key. Provide via 'Authorization: Bearer <key>' or 'X-API-Key: <key>' header.".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with(header: &str, value: &str) -> Parts {
        let (parts, _) = Request::builder()
            .header(header, value)
            .body(())
            .unwrap()
            .into_parts();
        parts
    }

    #[test]
    fn test_bearer_key() {
        let parts = parts_with("Authorization", "Bearer skd_abc ");
        assert_eq!(extract_api_key(&parts).unwrap(), "skd_abc");
    }

    #[test]
    fn test_x_api_key() {
        let parts = parts_with("X-API-Key", "skd_xyz");
        assert_eq!(extract_api_key(&parts).unwrap(), "skd_xyz");
    }

    #[test]
    fn test_non_bearer_authorization_is_missing_key() {
        let parts = parts_with("Authorization", "Basic Zm9vOmJhcg==");
        assert!(matches!(extract_api_key(&parts), Err(AppError::Unauthorized(_))));
    }
}
