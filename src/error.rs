use crate::itunes::ItunesError;
use crate::models::ErrorResponse;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

pub const UPSTREAM_ERROR_MESSAGE: &str = "Error querying the iTunes API";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Upstream(#[from] ItunesError),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = match &self {
            AppError::InvalidRequest(msg) => msg.clone(),
            AppError::Upstream(err) => {
                tracing::error!("iTunes search failed: {}", err);
                UPSTREAM_ERROR_MESSAGE.to_string()
            }
        };

        (self.status_code(), Json(ErrorResponse { error: message })).into_response()
    }
}
