//! Auth extractor for protected routes
//!
//! Protected mutating endpoints take an [`AuthUser`] argument; the request
//! is rejected with 401 before the handler body runs if the bearer session
//! is missing, expired, or points at a deleted user.

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;

use sinkedin_types::User;

use crate::error::ApiError;
use crate::AppState;

/// The user behind the request's bearer session.
#[derive(Clone, Debug)]
pub struct AuthUser(pub User);

/// Pull the token out of `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or(ApiError::Unauthorized)?;
        let user = state
            .auth
            .current_user(token)
            .ok_or(ApiError::Unauthorized)?;
        Ok(AuthUser(user))
    }
}
