//! Error responses for the HTTP gateway.
//!
//! Batch routes only fail here when the batch could not run at all; per-package
//! failures travel inside a normal 200 response.

use crate::errors::Error;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Errors a route handler can return.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The addressed row does not exist
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of row, e.g. "Package"
        entity: &'static str,
        /// The id that did not resolve
        id: String,
    },

    /// Anything the store or engines raised
    #[error(transparent)]
    Internal(#[from] Error),
}

impl ApiError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error = match &self {
            Self::NotFound { .. } => self.to_string(),
            // Never expose database details to callers
            Self::Internal(e) => {
                tracing::error!("Request failed: {}", e);
                "Internal server error".to_string()
            }
        };

        (status, Json(ErrorBody { error })).into_response()
    }
}
