//! API request and response types.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::Credential;

// ==================== Authentication ====================

/// Login response.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    /// Confirmation message.
    pub message: String,
    /// The stored credential, unfiltered.
    pub employee: Credential,
}

// ==================== Employees ====================

/// Plain confirmation message.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

// ==================== Health ====================

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Database connectivity.
    pub database: String,
}
