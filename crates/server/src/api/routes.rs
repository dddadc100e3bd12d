use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::{convert, handlers};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/version", get(handlers::version))
        .route("/formats", get(handlers::formats))
        .route("/convert", post(convert::convert))
        .with_state(state)
        // Browser frontends hit this service directly during development
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
