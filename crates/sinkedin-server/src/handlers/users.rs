//! User handlers

use axum::extract::{Path, State};
use axum::Json;
use tracing::info;

use sinkedin_types::{NewUser, User, Validate};

use crate::error::ApiError;
use crate::AppState;

/// POST /api/users — registration, open to everyone.
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<NewUser>,
) -> Result<Json<User>, ApiError> {
    payload.validate()?;

    let user = state.auth.register(payload)?;
    info!("Created user {} ({})", user.username, user.id);
    Ok(Json(user))
}

/// GET /api/users
pub async fn list(State(state): State<AppState>) -> Json<Vec<User>> {
    Json(state.store.list_users())
}

/// GET /api/users/:id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<User>, ApiError> {
    state
        .store
        .get_user(id)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))
}
