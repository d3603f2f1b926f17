//! Mapping of store failures onto HTTP responses
//!
//! Responses carry a stable `code` and a fixed or validation-derived message.
//! Raw database errors are logged and never returned to the client.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use mentorship_db::{StoreError, ValidationError};
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::models::{ErrorResponse, NOT_FOUND_MESSAGE};

pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
pub const CONSTRAINT_VIOLATION: &str = "CONSTRAINT_VIOLATION";
pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not Found")]
    NotFound,

    #[error("{0}")]
    Validation(String),

    #[error("Request conflicts with existing data")]
    Constraint,

    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Validation(_) | ApiError::Constraint => StatusCode::BAD_REQUEST,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> Option<&'static str> {
        match self {
            ApiError::NotFound => None,
            ApiError::Validation(_) => Some(VALIDATION_ERROR),
            ApiError::Constraint => Some(CONSTRAINT_VIOLATION),
            ApiError::Internal => Some(INTERNAL_ERROR),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, id } => {
                debug!("{} {} not found", entity, id);
                ApiError::NotFound
            }
            StoreError::Validation(e) => ApiError::Validation(e.to_string()),
            StoreError::Constraint(detail) => {
                warn!("Store constraint rejected write: {}", detail);
                ApiError::Constraint
            }
            StoreError::Database(e) => {
                error!("Database error: {}", e);
                ApiError::Internal
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        debug!("Unmatched path parameters: {}", rejection.body_text());
        ApiError::NotFound
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            ApiError::NotFound => NOT_FOUND_MESSAGE.to_string(),
            other => other.to_string(),
        };
        let body = ErrorResponse {
            message,
            code: self.code().map(str::to_string),
        };

        (self.status(), Json(body)).into_response()
    }
}
