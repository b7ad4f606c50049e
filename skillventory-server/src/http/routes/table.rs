//! Paged skill table for UI clients

use std::sync::Arc;

use axum::{
    extract::State,
    routing::get,
    Json, Router,
};

use crate::db::repos::SkillRepo;
use crate::http::error::ApiError;
use crate::http::extractors::ValidQuery;
use crate::http::server::AppState;
use crate::models::{PageParams, Paginated, Pagination, Skill};

/// GET /api/skills - one page of skills with page metadata
async fn skills_table(
    State(state): State<Arc<AppState>>,
    ValidQuery(params): ValidQuery<PageParams>,
) -> Result<Json<Paginated<Skill>>, ApiError> {
    let result = SkillRepo::new(&state.pool)
        .list(Pagination::from(&params))
        .await?;

    Ok(Json(Paginated::new(
        result.items,
        result.total,
        params.page(),
        params.page_size(),
    )))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/skills", get(skills_table))
}
