use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::DbErr;
use serde_json::json;
use thiserror::Error;

/// Failure returned by a handler. Always rendered as `{"error": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    /// The request clashes with current state (e.g. pet already adopted).
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Duplicate(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Internal(&'static str),
}

impl ApiError {
    /// Logs the database error and hides it behind `message`.
    pub fn internal(message: &'static str) -> impl FnOnce(DbErr) -> Self {
        move |err| {
            tracing::Span::current().record("error", tracing::field::display(&err));
            tracing::error!(error = %err, "{}", message);
            ApiError::Internal(message)
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::Conflict(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Duplicate(_) => StatusCode::CONFLICT,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({"error": self.to_string()}))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
