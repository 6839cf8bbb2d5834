//! Typed request errors and their boundary mapping.
//!
//! Each variant maps to exactly one HTTP response. Both login failure modes
//! (unknown email, wrong password) collapse into `InvalidCredentials` so the
//! responses are observationally identical and an attacker cannot probe
//! which emails are registered.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tasklinex_auth::{PasswordError, TokenError};
use tasklinex_db::StoreError;
use thiserror::Error;
use tracing::error;

use crate::models::ErrorResponse;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or missing input fields
    #[error("{message}")]
    Validation {
        code: &'static str,
        message: &'static str,
    },

    /// Duplicate email on signup
    #[error("Email already registered")]
    Conflict,

    /// Bad credentials on login; deliberately coarse-grained
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Backing store unreachable; surfaced as a server error, never retried
    #[error("Storage error: {0}")]
    Storage(sea_orm::DbErr),

    /// Hashing or signing failure
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn validation(code: &'static str, message: &'static str) -> Self {
        Self::Validation { code, message }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Conflict => ApiError::Conflict,
            StoreError::Database(e) => ApiError::Storage(e),
        }
    }
}

impl From<PasswordError> for ApiError {
    fn from(e: PasswordError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<TokenError> for ApiError {
    fn from(e: TokenError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation { code, message } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorResponse {
                    error: message.to_string(),
                    code: Some(code.to_string()),
                }),
            )
                .into_response(),

            ApiError::Conflict => (
                StatusCode::CONFLICT,
                Json(ErrorResponse {
                    error: "Email already registered".to_string(),
                    code: Some("EMAIL_EXISTS".to_string()),
                }),
            )
                .into_response(),

            ApiError::InvalidCredentials => {
                let mut response = (
                    StatusCode::UNAUTHORIZED,
                    Json(ErrorResponse {
                        error: "Invalid credentials".to_string(),
                        code: Some("INVALID_CREDENTIALS".to_string()),
                    }),
                )
                    .into_response();
                response
                    .headers_mut()
                    .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
                response
            }

            ApiError::Storage(e) => {
                error!("Storage failure: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: "Internal server error".to_string(),
                        code: Some("STORAGE_ERROR".to_string()),
                    }),
                )
                    .into_response()
            }

            ApiError::Internal(e) => {
                error!("Internal failure: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: "Internal server error".to_string(),
                        code: Some("INTERNAL_ERROR".to_string()),
                    }),
                )
                    .into_response()
            }
        }
    }
}
