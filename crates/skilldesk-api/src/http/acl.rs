//! Per-endpoint authorization.
//!
//! Every skill handler calls [`authorize`] with the capability it needs before
//! doing anything else.

use skilldesk_core::acl::{AccessDecision, SkillCapability, evaluate};
use skilldesk_types::skill::require_valid_skill_id;
use skilldesk_types::user::UserActionsInfo;

use crate::http::error::AppError;
use crate::http::extractors::auth::Authenticated;
use crate::state::AppState;

/// Check that the authenticated user holds `capability` for `skill_id`.
///
/// Returns the user's permission context for the handler body. A malformed
/// id is looked up as "no rights"; the handler rejects the id itself.
pub async fn authorize(
    state: &AppState,
    auth: &Authenticated,
    capability: SkillCapability,
    skill_id: &str,
) -> Result<UserActionsInfo, AppError> {
    let actions_info = state.user_service.actions_info(&auth.user_id).await?;

    let rights = match require_valid_skill_id(skill_id) {
        Ok(id) => state.skill_service.get_skill_rights(&id, false).await?,
        Err(_) => None,
    };

    match evaluate(capability, &actions_info, rights.as_ref()) {
        AccessDecision::Granted => Ok(actions_info),
        AccessDecision::Denied(reason) => {
            tracing::info!(
                user_id = %auth.user_id,
                role = %actions_info.role,
                ?capability,
                skill_id,
                "access denied"
            );
            Err(AppError::Unauthorized(reason))
        }
    }
}
