//! Skill editor handlers: editor page, rights, editable data, publishing.

use std::time::Instant;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Html;
use serde::{Deserialize, Serialize};

use skilldesk_core::acl::SkillCapability;
use skilldesk_core::version::require_valid_version;
use skilldesk_types::change::SkillChange;
use skilldesk_types::error::SkillError;
use skilldesk_types::skill::{Skill, require_valid_skill_id};
use skilldesk_types::user::UserId;

use crate::http::acl::authorize;
use crate::http::error::AppError;
use crate::http::extractors::auth::Authenticated;
use crate::http::page::{NAV_MODE_CREATE, render_skill_editor};
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Rights snapshot returned by the rights and publish endpoints.
#[derive(Debug, Serialize)]
pub struct SkillRightsView {
    pub skill_is_private: bool,
    pub creator_id: UserId,
    pub can_edit_skill: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skill_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EditableSkillView {
    pub skill: Skill,
}

/// Body of `PUT /skill_editor_handler/data/{skill_id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateSkillRequest {
    pub version: Option<i32>,
    pub commit_message: Option<String>,
    #[serde(default)]
    pub change_dicts: Vec<serde_json::Value>,
}

/// Body of `PUT /skill_editor_handler/publish_skill/{skill_id}`.
#[derive(Debug, Deserialize)]
pub struct PublishSkillRequest {
    pub version: Option<i32>,
}

fn require_new_structures(state: &AppState) -> Result<(), AppError> {
    if state.config.enable_new_structures {
        Ok(())
    } else {
        Err(AppError::NotFound("Page not found".to_string()))
    }
}

fn data_link(skill_id: &str) -> String {
    format!("/skill_editor_handler/data/{skill_id}")
}

/// GET /skill_editor/{skill_id} - Render the editor page for a skill.
pub async fn skill_editor_page(
    State(state): State<AppState>,
    auth: Authenticated,
    Path(skill_id): Path<String>,
) -> Result<Html<String>, AppError> {
    authorize(&state, &auth, SkillCapability::EditSkill, &skill_id).await?;
    require_new_structures(&state)?;

    let id = require_valid_skill_id(&skill_id)?;
    let skill = state
        .skill_service
        .get_skill_by_id(&id, false)
        .await?
        .ok_or(SkillError::NotFound)?;

    Ok(Html(render_skill_editor(skill.id.as_str(), NAV_MODE_CREATE)))
}

/// GET /skill_editor_handler/rights/{skill_id} - Rights of a skill as seen by
/// the requesting user.
pub async fn get_skill_rights(
    State(state): State<AppState>,
    auth: Authenticated,
    Path(skill_id): Path<String>,
) -> Result<Json<ApiResponse<SkillRightsView>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let actions_info = authorize(&state, &auth, SkillCapability::EditSkill, &skill_id).await?;

    let id = require_valid_skill_id(&skill_id)?;
    let rights = state
        .skill_service
        .get_skill_rights(&id, false)
        .await?
        .ok_or_else(|| SkillError::RightsNotFound(id.to_string()))?;
    let can_edit_skill = state
        .skill_service
        .check_can_edit_skill(&actions_info, Some(&rights));

    let view = SkillRightsView {
        skill_is_private: rights.skill_is_private,
        creator_id: rights.creator_id,
        can_edit_skill,
        skill_id: Some(id.to_string()),
    };

    let elapsed = start.elapsed().as_millis() as u64;
    let resp = ApiResponse::success(view, request_id, elapsed)
        .with_link("self", &format!("/skill_editor_handler/rights/{id}"))
        .with_link("data", &data_link(id.as_str()));

    Ok(Json(resp))
}

/// GET /skill_editor_handler/data/{skill_id} - Current editable skill.
pub async fn get_editable_skill(
    State(state): State<AppState>,
    auth: Authenticated,
    Path(skill_id): Path<String>,
) -> Result<Json<ApiResponse<EditableSkillView>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    authorize(&state, &auth, SkillCapability::EditSkill, &skill_id).await?;
    require_new_structures(&state)?;

    let id = require_valid_skill_id(&skill_id)?;
    let skill = state
        .skill_service
        .get_skill_by_id(&id, false)
        .await?
        .ok_or(SkillError::NotFound)?;

    let elapsed = start.elapsed().as_millis() as u64;
    let resp = ApiResponse::success(EditableSkillView { skill }, request_id, elapsed)
        .with_link("self", &data_link(id.as_str()));

    Ok(Json(resp))
}

/// PUT /skill_editor_handler/data/{skill_id} - Apply a change list as one commit.
pub async fn update_editable_skill(
    State(state): State<AppState>,
    auth: Authenticated,
    Path(skill_id): Path<String>,
    body: Result<Json<UpdateSkillRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<EditableSkillView>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    authorize(&state, &auth, SkillCapability::EditSkill, &skill_id).await?;
    require_new_structures(&state)?;
    let Json(body) = body?;

    let id = require_valid_skill_id(&skill_id)?;
    let skill = state
        .skill_service
        .get_skill_by_id(&id, false)
        .await?
        .ok_or(SkillError::NotFound)?;

    require_valid_version(body.version, skill.version)?;

    let changes = body
        .change_dicts
        .iter()
        .map(SkillChange::from_dict)
        .collect::<Result<Vec<_>, _>>()?;

    state
        .skill_service
        .update_skill(
            &auth.user_id,
            &id,
            skill.version,
            changes,
            body.commit_message.as_deref(),
        )
        .await?;

    let skill = state
        .skill_service
        .get_skill_by_id(&id, true)
        .await?
        .ok_or(SkillError::NotFound)?;

    let elapsed = start.elapsed().as_millis() as u64;
    let resp = ApiResponse::success(EditableSkillView { skill }, request_id, elapsed)
        .with_link("self", &data_link(id.as_str()));

    Ok(Json(resp))
}

/// DELETE /skill_editor_handler/data/{skill_id} - Permanently delete a skill.
pub async fn delete_editable_skill(
    State(state): State<AppState>,
    auth: Authenticated,
    Path(skill_id): Path<String>,
) -> Result<StatusCode, AppError> {
    authorize(&state, &auth, SkillCapability::DeleteSkill, &skill_id).await?;
    require_new_structures(&state)?;

    let id = require_valid_skill_id(&skill_id)?;
    state.skill_service.delete_skill(&auth.user_id, &id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// PUT /skill_editor_handler/publish_skill/{skill_id} - Make a private skill public.
///
/// Every failure of the publish step itself is reported as 401 with the
/// underlying message.
pub async fn publish_skill(
    State(state): State<AppState>,
    auth: Authenticated,
    Path(skill_id): Path<String>,
    body: Result<Json<PublishSkillRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<SkillRightsView>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let actions_info = authorize(&state, &auth, SkillCapability::PublishSkill, &skill_id).await?;
    let Json(body) = body?;

    // The skill is fetched before the id format is checked; an id that
    // cannot exist is not found.
    let Ok(id) = require_valid_skill_id(&skill_id) else {
        return Err(SkillError::NotFound.into());
    };
    let skill = state
        .skill_service
        .get_skill_by_id(&id, true)
        .await?
        .ok_or(SkillError::NotFound)?;

    require_valid_version(body.version, skill.version)?;

    let rights = state
        .skill_service
        .publish_skill(&id, &auth.user_id)
        .await
        .map_err(|e| AppError::Unauthorized(e.to_string()))?;
    let can_edit_skill = state
        .skill_service
        .check_can_edit_skill(&actions_info, Some(&rights));

    let view = SkillRightsView {
        skill_is_private: rights.skill_is_private,
        creator_id: rights.creator_id,
        can_edit_skill,
        skill_id: None,
    };

    let elapsed = start.elapsed().as_millis() as u64;
    let resp = ApiResponse::success(view, request_id, elapsed)
        .with_link("rights", &format!("/skill_editor_handler/rights/{id}"));

    Ok(Json(resp))
}
