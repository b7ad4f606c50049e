//! Skill endpoints
//!
//! Thin mapping from HTTP onto `SkillRepo`; status codes are the only
//! logic that lives here.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderName, HeaderValue, StatusCode},
    routing::{get, patch},
    Json, Router,
};
use serde::Deserialize;

use super::root::MessageResponse;
use crate::db::repos::SkillRepo;
use crate::http::error::ApiError;
use crate::http::extractors::{ValidJson, ValidPath, ValidQuery, ValidSkillId};
use crate::http::server::AppState;
use crate::models::{LevelOfConfidence, NewSkill, Pagination, PaginationParams, Skill, SkillName};

pub const X_TOTAL_COUNT: HeaderName = HeaderName::from_static("x-total-count");
pub const X_OFFSET: HeaderName = HeaderName::from_static("x-offset");
pub const X_LIMIT: HeaderName = HeaderName::from_static("x-limit");

/// Create skill request
#[derive(Debug, Deserialize)]
pub struct CreateSkillRequest {
    pub skill_name: String,
    pub level_of_confidence: LevelOfConfidence,
}

/// Update skill request; omitted fields keep their stored value
#[derive(Debug, Deserialize)]
pub struct UpdateSkillRequest {
    pub skill_name: Option<String>,
    pub level_of_confidence: Option<LevelOfConfidence>,
}

type PaginationHeaders = [(HeaderName, HeaderValue); 3];

/// GET /skills - list skills with offset/limit
async fn list_skills(
    State(state): State<Arc<AppState>>,
    ValidQuery(params): ValidQuery<PaginationParams>,
) -> Result<(PaginationHeaders, Json<Vec<Skill>>), ApiError> {
    let page = Pagination::from(params);
    let result = SkillRepo::new(&state.pool).list(page).await?;

    let headers = [
        (X_TOTAL_COUNT, HeaderValue::from(result.total)),
        (X_OFFSET, HeaderValue::from(page.offset)),
        (X_LIMIT, HeaderValue::from(page.limit)),
    ];

    Ok((headers, Json(result.items)))
}

/// POST /skills - create a skill
async fn create_skill(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<CreateSkillRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let name = SkillName::new(&req.skill_name)?;
    SkillRepo::new(&state.pool)
        .create(NewSkill::new(name, req.level_of_confidence))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Skill added successfully",
        }),
    ))
}

/// GET /skills/id/{id} - get a skill by id
async fn get_skill_by_id(
    State(state): State<Arc<AppState>>,
    ValidSkillId(skill_id): ValidSkillId,
) -> Result<Json<Skill>, ApiError> {
    let skill = SkillRepo::new(&state.pool)
        .get_by_id(skill_id)
        .await?
        .ok_or_else(ApiError::skill_not_found)?;

    Ok(Json(skill))
}

/// GET /skills/name/{name} - get a skill by exact name
async fn get_skill_by_name(
    State(state): State<Arc<AppState>>,
    ValidPath(name): ValidPath<String>,
) -> Result<Json<Skill>, ApiError> {
    let skill = SkillRepo::new(&state.pool)
        .get_by_name(&name)
        .await?
        .ok_or_else(ApiError::skill_not_found)?;

    Ok(Json(skill))
}

/// PATCH /skills/{id} - update name and/or level
async fn update_skill(
    State(state): State<Arc<AppState>>,
    ValidSkillId(skill_id): ValidSkillId,
    ValidJson(req): ValidJson<UpdateSkillRequest>,
) -> Result<Json<Skill>, ApiError> {
    let new_name = req.skill_name.as_deref().map(SkillName::new).transpose()?;

    let skill = SkillRepo::new(&state.pool)
        .update_if_changed(skill_id, new_name, req.level_of_confidence)
        .await?
        .into_skill()
        .ok_or_else(ApiError::skill_not_found)?;

    Ok(Json(skill))
}

/// DELETE /skills/{id} - delete a skill (idempotent)
async fn delete_skill(
    State(state): State<Arc<AppState>>,
    ValidSkillId(skill_id): ValidSkillId,
) -> Result<StatusCode, ApiError> {
    SkillRepo::new(&state.pool).delete_by_id(skill_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Skill routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/skills", get(list_skills).post(create_skill))
        .route("/skills/id/{id}", get(get_skill_by_id))
        .route("/skills/name/{name}", get(get_skill_by_name))
        .route("/skills/{id}", patch(update_skill).delete(delete_skill))
}
