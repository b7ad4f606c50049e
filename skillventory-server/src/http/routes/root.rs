//! Welcome endpoint

use axum::{routing::get, Json, Router};
use serde::Serialize;

/// Plain message body, shared with the create endpoint
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// GET /
async fn welcome() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Welcome to Skillventory",
    })
}

pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/", get(welcome))
}
