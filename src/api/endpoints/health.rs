//! Service index and health check.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::router::RESOURCES;
use crate::api::types::ApiContext;
use crate::config::{APP_NAME, APP_VERSION};

#[derive(Serialize)]
pub struct IndexResponse {
    pub name: &'static str,
    pub version: &'static str,
    pub resources: Vec<String>,
}

/// `GET /api`: what this server exposes.
pub async fn index() -> Json<IndexResponse> {
    Json(IndexResponse {
        name: APP_NAME,
        version: APP_VERSION,
        resources: RESOURCES.iter().map(|r| format!("/api/{r}")).collect(),
    })
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// `GET /api/health`: answers only once storage responds.
pub async fn check(State(ctx): State<ApiContext>) -> Result<Json<HealthResponse>, ApiError> {
    ctx.db
        .ping()
        .await
        .map_err(|e| ApiError::from(e).during("Storage unavailable"))?;

    Ok(Json(HealthResponse {
        status: "ok",
        version: APP_VERSION,
    }))
}

/// Fallback for unknown routes.
pub async fn not_found() -> ApiError {
    ApiError::NotFound("Route not found".into())
}
