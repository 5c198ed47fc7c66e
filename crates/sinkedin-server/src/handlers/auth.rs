//! Login and logout handlers

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Serialize;
use tracing::info;

use sinkedin_types::{Credentials, User, Validate};

use crate::error::ApiError;
use crate::extractors::bearer_token;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

/// POST /api/login
pub async fn login(
    State(state): State<AppState>,
    Json(creds): Json<Credentials>,
) -> Result<Json<LoginResponse>, ApiError> {
    creds.validate()?;

    info!("Login attempt for {}", creds.username);
    let (user, token) = state.auth.login(&creds)?;
    Ok(Json(LoginResponse { token, user }))
}

/// POST /api/logout — requires a live session, then revokes it.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let token = bearer_token(&headers).ok_or(ApiError::Unauthorized)?;
    let user = state
        .auth
        .current_user(token)
        .ok_or(ApiError::Unauthorized)?;

    state.auth.logout(token);
    info!("Logged out {}", user.username);
    Ok(StatusCode::NO_CONTENT)
}
