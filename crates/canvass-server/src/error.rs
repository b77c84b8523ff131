//! HTTP error taxonomy and response mapping.
//!
//! Authentication and authorization failures short-circuit in their
//! gate before any store mutation. Store failures inside a multi-step
//! handler are not rolled back; whichever steps completed stay
//! committed.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use canvass_core::error::CanvassError;
use serde_json::json;
use tracing::error;

#[derive(Debug)]
pub enum ApiError {
    /// Missing, invalid, or expired session token.
    Unauthenticated,
    /// Authenticated, but identity mismatch or insufficient role.
    Forbidden,
    /// Targeted update or lookup matched no document.
    NotFound,
    /// The store (or another internal step) failed.
    Internal,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            ApiError::Unauthenticated => "unauthorized access",
            ApiError::Forbidden => "Forbidden access",
            ApiError::NotFound => "not found",
            ApiError::Internal => "internal server error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "message": self.message() }))).into_response()
    }
}

impl From<CanvassError> for ApiError {
    fn from(err: CanvassError) -> Self {
        match err {
            CanvassError::NotFound { .. } => ApiError::NotFound,
            CanvassError::AuthenticationFailed { .. } => ApiError::Unauthenticated,
            CanvassError::AuthorizationDenied { .. } => ApiError::Forbidden,
            other => {
                error!(error = %other, "request failed");
                ApiError::Internal
            }
        }
    }
}
