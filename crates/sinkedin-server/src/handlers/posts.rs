//! Post handlers

use axum::extract::State;
use axum::Json;
use tracing::info;

use sinkedin_types::{NewPost, Post, Validate};

use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::AppState;

/// POST /api/posts — the author is the session user, never the body.
pub async fn create(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(payload): Json<NewPost>,
) -> Result<Json<Post>, ApiError> {
    payload.validate()?;

    let post = state.store.create_post(user.id, payload.content);
    info!("User {} created post {}", user.id, post.id);
    Ok(Json(post))
}

/// GET /api/posts
pub async fn list(State(state): State<AppState>) -> Json<Vec<Post>> {
    Json(state.store.list_posts())
}
