//! Error types for the employee portal.
//!
//! Defines a unified error type that maps cleanly to the JSON envelopes clients
//! expect: `{errors}` for validation, `{message}` for domain failures,
//! `{message, error}` for failed operations and `{error}` for routing and
//! internal failures.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::validation::ValidationErrors;

/// Unified error type for portal operations.
#[derive(Debug, Error)]
pub enum PortalError {
    #[error("Validation failed on {} rule(s)", .0.len())]
    Validation(ValidationErrors),

    /// Uniqueness conflict. Reported with a client-error status.
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// A storage call failed while serving `message`'s operation.
    #[error("{message}: {detail}")]
    Operation {
        status: StatusCode,
        message: &'static str,
        detail: String,
    },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Invalid record identifier: {0}")]
    InvalidId(#[from] uuid::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Route not found")]
    RouteNotFound,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ValidationErrors> for PortalError {
    fn from(errors: ValidationErrors) -> Self {
        PortalError::Validation(errors)
    }
}

/// `{message}` / `{message, error}` body.
#[derive(Debug, Serialize)]
pub struct FailureResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// `{error}` body for routing and unhandled failures.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// `{errors}` body for validation failures.
#[derive(Debug, Serialize)]
pub struct ValidationResponse {
    pub errors: ValidationErrors,
}

fn message(status: StatusCode, message: String) -> Response {
    (
        status,
        Json(FailureResponse {
            message,
            error: None,
        }),
    )
        .into_response()
}

fn internal_server_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: "Internal server error".to_string(),
        }),
    )
        .into_response()
}

impl IntoResponse for PortalError {
    fn into_response(self) -> Response {
        match self {
            PortalError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Json(ValidationResponse { errors })).into_response()
            }
            PortalError::Conflict(msg) => message(StatusCode::BAD_REQUEST, msg),
            PortalError::NotFound(msg) => message(StatusCode::NOT_FOUND, msg),
            PortalError::Unauthorized(msg) => message(StatusCode::UNAUTHORIZED, msg),
            PortalError::Operation {
                status,
                message,
                detail,
            } => (
                status,
                Json(FailureResponse {
                    message: message.to_string(),
                    error: Some(detail),
                }),
            )
                .into_response(),
            PortalError::RouteNotFound => (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: "Route not found".to_string(),
                }),
            )
                .into_response(),
            other => {
                // Anything that escaped an operation context is unexpected.
                tracing::error!(error = %other, "Unhandled error");
                internal_server_error()
            }
        }
    }
}

/// Result type alias for portal operations.
pub type PortalResult<T> = Result<T, PortalError>;

/// Attach an operation's failure envelope to a fallible step.
///
/// The underlying error's text is surfaced to the client as `error`.
pub trait OperationContext<T> {
    fn during(self, status: StatusCode, message: &'static str) -> PortalResult<T>;
}

impl<T, E> OperationContext<T> for Result<T, E>
where
    E: Into<PortalError>,
{
    fn during(self, status: StatusCode, message: &'static str) -> PortalResult<T> {
        self.map_err(|e| {
            let error: PortalError = e.into();
            let detail = match error {
                PortalError::Database(e) => e.to_string(),
                PortalError::InvalidId(e) => e.to_string(),
                PortalError::Serialization(e) => e.to_string(),
                other => other.to_string(),
            };
            PortalError::Operation {
                status,
                message,
                detail,
            }
        })
    }
}
