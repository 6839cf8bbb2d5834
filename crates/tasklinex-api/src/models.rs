//! Request and response bodies for the HTTP interface.
//!
//! Signup and login requests use the camelCase wire format the frontend
//! sends; response field names are spelled out explicitly.

use serde::{Deserialize, Serialize};

/// Signup request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Email address (must be unique)
    pub email: String,
    /// Password (plaintext on the wire, hashed before storage)
    pub password: String,
    /// Company name (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    /// Accepted for wire compatibility; signup never issues a token
    #[serde(default)]
    pub remember_me: bool,
}

/// Signup confirmation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupResponse {
    /// Success message
    pub message: String,
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Email address
    pub email: String,
    /// Password
    pub password: String,
    /// Select the long token window (15 days instead of 30 minutes)
    #[serde(default)]
    pub remember_me: bool,
}

/// Login response carrying the bearer token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Signed access token (JWT)
    pub access_token: String,
    /// Always "bearer"
    pub token_type: String,
}

/// Liveness probe response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LivenessResponse {
    /// Always "ok"
    pub status: String,
    /// Human-readable banner
    pub message: String,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}
