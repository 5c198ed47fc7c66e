//! Comment handlers

use axum::extract::{Path, State};
use axum::Json;
use tracing::info;

use sinkedin_types::{Comment, NewComment, Validate};

use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::AppState;

/// POST /api/comments — the referenced post id is stored unchecked.
pub async fn create(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(payload): Json<NewComment>,
) -> Result<Json<Comment>, ApiError> {
    payload.validate()?;

    let comment = state
        .store
        .create_comment(payload.post_id, user.id, payload.content);
    info!(
        "User {} commented on post {} ({})",
        user.id, comment.post_id, comment.id
    );
    Ok(Json(comment))
}

/// GET /api/posts/:id/comments
pub async fn list_for_post(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
) -> Json<Vec<Comment>> {
    Json(state.store.list_comments(post_id))
}
