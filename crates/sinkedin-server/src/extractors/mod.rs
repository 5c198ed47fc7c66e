//! Request extractors

pub mod auth;

pub use auth::{bearer_token, AuthUser};
