//! SinkedIn Server
//!
//! A small social-networking HTTP API: profiles, short text posts,
//! comments, likes, and follow edges, backed by an in-memory entity store.
//! The router and state are exposed here so integration tests can drive
//! the app in-process.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod services;
pub mod storage;

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use services::AuthService;
use storage::MemStore;

/// Application state shared across handlers. The store is constructed once
/// at startup and injected here; nothing reaches it through globals.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<MemStore>,
    pub auth: Arc<AuthService>,
}

impl AppState {
    pub fn new(session_ttl: Duration) -> Self {
        let store = Arc::new(MemStore::new());
        let auth = Arc::new(AuthService::new(store.clone(), session_ttl));
        Self { store, auth }
    }
}

/// Build the application router with all routes and layers.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api", api_routes())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users",
            post(handlers::users::create).get(handlers::users::list),
        )
        .route("/users/:id", get(handlers::users::get))
        .route("/users/:id/followers", get(handlers::follows::followers))
        .route("/users/:id/following", get(handlers::follows::following))
        .route("/login", post(handlers::auth::login))
        .route("/logout", post(handlers::auth::logout))
        .route(
            "/posts",
            post(handlers::posts::create).get(handlers::posts::list),
        )
        .route(
            "/posts/:id/comments",
            get(handlers::comments::list_for_post),
        )
        .route(
            "/posts/:id/likes",
            get(handlers::likes::list_for_post).delete(handlers::likes::delete),
        )
        .route("/comments", post(handlers::comments::create))
        .route("/likes", post(handlers::likes::create))
        .route("/follows", post(handlers::follows::create))
        .route("/follows/:id", delete(handlers::follows::delete))
}
