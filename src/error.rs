use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use schoolmeal_calendar::CalendarError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Calendar(#[from] CalendarError),

    #[error("Menu source error: {0}")]
    Source(#[from] anyhow::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed menu data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Not supported by this menu source: {0}")]
    Unsupported(&'static str),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Calendar(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unsupported(_) => StatusCode::NOT_IMPLEMENTED,
            AppError::Source(_) | AppError::Io(_) | AppError::Json(_) => {
                tracing::error!(err = %self, "Request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let message = if status.is_server_error() && status != StatusCode::NOT_IMPLEMENTED {
            "An unexpected error occurred. Please try again later.".to_string()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
