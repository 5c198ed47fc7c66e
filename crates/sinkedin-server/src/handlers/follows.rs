//! Follow handlers

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::info;

use sinkedin_types::{Follow, NewFollow, Validate};

use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::AppState;

/// POST /api/follows — the follower is always the session user.
pub async fn create(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(payload): Json<NewFollow>,
) -> Result<Json<Follow>, ApiError> {
    payload.validate()?;

    let follow = state.store.create_follow(user.id, payload.following_id);
    info!("User {} followed user {}", user.id, follow.following_id);
    Ok(Json(follow))
}

/// DELETE /api/follows/:id — unfollow; idempotent.
pub async fn delete(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(following_id): Path<i64>,
) -> StatusCode {
    state.store.delete_follow(user.id, following_id);
    StatusCode::NO_CONTENT
}

/// GET /api/users/:id/followers
pub async fn followers(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Json<Vec<Follow>> {
    Json(state.store.list_followers(user_id))
}

/// GET /api/users/:id/following
pub async fn following(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Json<Vec<Follow>> {
    Json(state.store.list_following(user_id))
}
