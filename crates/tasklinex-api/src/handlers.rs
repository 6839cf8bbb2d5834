use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::debug;

use crate::error::ApiError;
use crate::models::*;
use crate::AppState;

/// Liveness probe
pub async fn root() -> Json<LivenessResponse> {
    Json(LivenessResponse {
        status: "ok".to_string(),
        message: "TaskLinex API is active".to_string(),
    })
}

/// Register a new account
pub async fn signup(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SignupRequest>,
) -> Result<Json<SignupResponse>, ApiError> {
    debug!(email = %req.email, "Signup request");

    let response = state.auth.signup(req).await?;
    Ok(Json(response))
}

/// Exchange credentials for a bearer token
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    debug!(email = %req.email, "Login request");

    let response = state.auth.login(req).await?;
    Ok(Json(response))
}
