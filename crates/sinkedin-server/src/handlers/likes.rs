//! Like handlers

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::info;

use sinkedin_types::{Like, NewLike, Validate};

use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::AppState;

/// POST /api/likes — idempotent: liking an already-liked post returns the
/// existing record.
pub async fn create(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(payload): Json<NewLike>,
) -> Result<Json<Like>, ApiError> {
    payload.validate()?;

    let like = state.store.create_like(payload.post_id, user.id);
    info!("User {} liked post {}", user.id, like.post_id);
    Ok(Json(like))
}

/// DELETE /api/posts/:id/likes — removes the session user's like on the
/// post; succeeds even when there is nothing to remove.
pub async fn delete(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(post_id): Path<i64>,
) -> StatusCode {
    state.store.delete_like(post_id, user.id);
    StatusCode::NO_CONTENT
}

/// GET /api/posts/:id/likes
pub async fn list_for_post(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
) -> Json<Vec<Like>> {
    Json(state.store.list_likes(post_id))
}
