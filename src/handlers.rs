use crate::error::AppError;
use crate::favorites::ToggleResult;
use crate::models::{
    FavoriteAddedResponse, FavoriteEntry, FavoriteRemovedResponse, FavoriteRequest,
    HealthResponse, SearchResponse, SearchTracksQuery, StatsResponse,
};
use crate::state::AppState;
use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

pub const FAVORITE_ADDED_MESSAGE: &str = "Track marked as favorite";
pub const FAVORITE_REMOVED_MESSAGE: &str = "Track unmarked as favorite";

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        message: "Band tracks API is running".to_string(),
    })
}

pub async fn search_tracks(
    State(state): State<Arc<AppState>>,
    query: Result<Query<SearchTracksQuery>, QueryRejection>,
) -> Result<Json<Arc<SearchResponse>>, AppError> {
    let Query(params) = query.map_err(|rejection| {
        AppError::InvalidRequest(format!("Invalid query string: {}", rejection.body_text()))
    })?;
    let band_name = params.name.unwrap_or_default();
    let response = state.search.search_tracks(&band_name).await?;
    Ok(Json(response))
}

pub async fn toggle_favorite(
    State(state): State<Arc<AppState>>,
    body: Result<Json<FavoriteRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) = body.map_err(|rejection| {
        AppError::InvalidRequest(format!("Invalid request body: {}", rejection.body_text()))
    })?;

    let response = match state.favorites.toggle_favorite(request).await? {
        ToggleResult::Added(favorite) => (
            StatusCode::CREATED,
            Json(FavoriteAddedResponse {
                message: FAVORITE_ADDED_MESSAGE.to_string(),
                favorite,
            }),
        )
            .into_response(),
        ToggleResult::Removed(removed) => (
            StatusCode::OK,
            Json(FavoriteRemovedResponse {
                message: FAVORITE_REMOVED_MESSAGE.to_string(),
                removed,
            }),
        )
            .into_response(),
    };

    Ok(response)
}

pub async fn list_favorites(State(state): State<Arc<AppState>>) -> Json<Vec<FavoriteEntry>> {
    Json(state.favorites.list().await)
}

pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<StatsResponse> {
    Json(StatsResponse {
        cached_searches: state.search.cached_entries().await,
        favorites: state.favorites.len().await,
    })
}
