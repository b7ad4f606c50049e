//! API error types with IntoResponse
//!
//! Errors are converted to `{"detail": "..."}` JSON bodies with the
//! matching status code.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::repos::DbError;
use crate::models::ValidationError;

/// Message returned when a create or rename hits a taken name
pub const DUPLICATE_SKILL_DETAIL: &str = "Skill already added";

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (422)
    Validation(ValidationError),

    /// Request body or query could not be decoded (status from the rejection)
    Rejected { status: StatusCode, message: String },

    /// Resource not found (404)
    NotFound { resource: &'static str },

    /// Unique name already taken (409)
    Conflict { detail: &'static str },

    /// Database error (500, logged)
    Database(DbError),
}

impl ApiError {
    pub fn skill_not_found() -> Self {
        Self::NotFound { resource: "Skill" }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Rejected { status, .. } => *status,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match &self {
            Self::Validation(e) => e.to_string(),
            Self::Rejected { message, .. } => message.clone(),
            Self::NotFound { resource } => format!("{} not found", resource),
            Self::Conflict { detail } => (*detail).to_owned(),
            Self::Database(e) => {
                // Log the actual error, return generic message
                tracing::error!("Database error: {}", e);
                "an internal error occurred".to_owned()
            }
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::DuplicateName { .. } => Self::Conflict {
                detail: DUPLICATE_SKILL_DETAIL,
            },
            _ => Self::Database(e),
        }
    }
}
