//! Per-request error handling with a consistent JSON envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::services::gateway::GatewayError;

/// Error detail in the response envelope.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

/// Consistent JSON envelope for API responses.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: Option<T>,
    pub error: Option<ApiError>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Wrap a successful result in the envelope.
    pub fn success(data: T) -> Json<Self> {
        Json(Self {
            data: Some(data),
            error: None,
        })
    }

    /// Wrap an error in the envelope.
    pub fn error(code: &str, message: &str) -> Json<Self> {
        Json(Self {
            data: None,
            error: Some(ApiError {
                code: code.to_string(),
                message: message.to_string(),
            }),
        })
    }
}

/// Request-time failures, mapped to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Unknown or malformed page identifier.
    #[error("Page not found: {0}")]
    PageNotFound(String),

    #[error("Query failed: {0}")]
    Query(#[from] GatewayError),

    #[error("Render failed: {0}")]
    Render(#[from] askama::Error),
}

impl AppError {
    /// Check if this error represents a not-found condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PageNotFound(_))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::PageNotFound(id) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("Page '{id}' not found"),
            ),
            AppError::Query(e) => {
                tracing::error!(error = %e, "Page query failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "QUERY_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
            AppError::Render(e) => {
                tracing::error!(error = %e, "Page render failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        (status, ApiResponse::<()>::error(code, &message)).into_response()
    }
}
