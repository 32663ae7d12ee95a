//! Handlers for the `/auth` resource.

use axum::extract::State;
use axum::Json;
use dbz_core::error::CoreError;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_access_token;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// POST /api/auth/login
///
/// Exchange the configured username and password for a bearer token.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let expected = &state.config.login;
    if input.username != expected.username || input.password != expected.password {
        tracing::warn!(username = %input.username, "Rejected login attempt");
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid credentials".into(),
        )));
    }

    let token = generate_access_token(&input.username, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Failed to generate token: {e}")))?;

    tracing::info!(username = %input.username, "User logged in");
    Ok(Json(TokenResponse { token }))
}
