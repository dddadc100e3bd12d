//! Health, version and format query handlers.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use std::sync::Arc;

use super::convert::ErrorResponse;
use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub calibre_version: String,
}

#[derive(Serialize)]
pub struct VersionResponse {
    pub version: String,
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        calibre_version: state.converter().version().await,
    })
}

pub async fn version(State(state): State<Arc<AppState>>) -> Json<VersionResponse> {
    Json(VersionResponse {
        version: state.converter().version().await,
    })
}

pub async fn formats(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.converter().formats().await {
        Ok(formats) => (StatusCode::OK, Json(formats)).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(e.to_string())),
        )
            .into_response(),
    }
}
