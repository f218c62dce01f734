//! Application error handling
//!
//! Every handler returns `ApiResult`; failures render as
//! `{"status": "fail", "message": ..., "errors": [...]}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;
use users_service_shared::{FailResponse, FieldError, TokenError};

/// API error type that can be converted to HTTP responses
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid payload.")]
    Validation(Vec<FieldError>),

    #[error("User already exists. Please Log in.")]
    AlreadyExists,

    #[error("User does not exist.")]
    NotFound,

    #[error("Wrong password.")]
    WrongCredentials,

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),

    #[error("Database error")]
    Database(#[from] sqlx::Error),
}

impl ApiError {
    /// Validation failure for a body that could not be parsed at all
    pub fn invalid_body(detail: impl Into<String>) -> Self {
        ApiError::Validation(vec![FieldError::new("body", detail)])
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::WrongCredentials => StatusCode::BAD_REQUEST,
            // Kept as 202 for compatibility with existing clients
            ApiError::AlreadyExists => StatusCode::ACCEPTED,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Token(_) => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) | ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match self {
            ApiError::Validation(errors) => {
                FailResponse::new("Invalid payload.").with_errors(errors)
            }
            ApiError::Internal(err) => {
                error!("Internal error: {:?}", err);
                FailResponse::new("An internal error occurred.")
            }
            ApiError::Database(err) => {
                error!("Database error: {:?}", err);
                FailResponse::new("A database error occurred.")
            }
            other => FailResponse::new(other.to_string()),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
