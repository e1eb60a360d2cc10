//! Credential domain types.
//!
//! A credential is the email/password pair created on signup and checked on login.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::coerce;

/// A stored signup credential.
///
/// The password is kept verbatim and returned to clients on login. This is a
/// known security defect retained so existing clients keep working; it is not
/// hashed anywhere in the service.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    /// Generated record identifier.
    #[serde(rename = "_id")]
    pub id: Uuid,
    /// Login email, unique across credentials.
    pub email: String,
    /// Plain-text password.
    pub password: String,
    /// When the credential was created.
    pub created_at: DateTime<Utc>,
}

impl Credential {
    /// Create a new credential from signup input.
    pub fn new(email: String, password: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            password,
            created_at: Utc::now(),
        }
    }

    /// Exact equality check against the stored password.
    pub fn password_matches(&self, candidate: &str) -> bool {
        self.password == candidate
    }
}

/// Signup input, read after the signup rule set has passed.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SignupRequest {
    /// Email address.
    pub email: String,
    /// Password, at least 6 characters.
    #[serde(deserialize_with = "coerce::text")]
    pub password: String,
}

/// Login input. Nothing is validated; absent fields read as empty strings.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default, deserialize_with = "coerce::optional_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "coerce::optional_text")]
    pub password: Option<String>,
}

impl LoginRequest {
    pub fn email(&self) -> &str {
        self.email.as_deref().unwrap_or_default()
    }

    pub fn password(&self) -> &str {
        self.password.as_deref().unwrap_or_default()
    }
}
