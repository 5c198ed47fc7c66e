//! Business logic services

pub mod auth;
pub mod session;

pub use auth::{AuthError, AuthService};
pub use session::SessionStore;
