//! Router assembly

use std::time::Duration;

use axum::routing::get;
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::catalog::{actor, cinema, genre, movie};
use crate::config::Config;
use crate::state::AppState;

/// Build the full application router
///
/// Review routes ride along inside the movies router; they only exist nested
/// under a movie id.
pub fn router(config: &Config, state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/movies", movie::routes())
        .nest("/api/actors", actor::routes())
        .nest("/api/genres", genre::routes())
        .nest("/api/cinemas", cinema::routes())
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.service.timeout_secs,
        )))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
