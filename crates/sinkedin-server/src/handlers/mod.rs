//! HTTP handlers

pub mod auth;
pub mod comments;
pub mod follows;
pub mod health;
pub mod likes;
pub mod posts;
pub mod users;

pub use health::health;
