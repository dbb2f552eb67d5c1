pub mod config;
pub mod error;
pub mod favorites;
pub mod handlers;
pub mod itunes;
pub mod models;
pub mod search;
pub mod state;

use axum::{Router, routing::get};
use state::AppState;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/search_tracks", get(handlers::search_tracks))
        .route(
            "/favoritos",
            get(handlers::list_favorites).post(handlers::toggle_favorite),
        )
        .route("/stats", get(handlers::get_stats))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
