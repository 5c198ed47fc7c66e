//! Authentication service
//!
//! Registration, login, and session-derived identity. The authenticated
//! user id always comes from the session; client-supplied ids are ignored
//! by every protected operation.

use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use rand::rngs::OsRng;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use sinkedin_types::{Credentials, NewUser, User};

use crate::services::SessionStore;
use crate::storage::MemStore;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("username already taken")]
    UsernameTaken,
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("failed to hash password: {0}")]
    PasswordHash(String),
}

pub struct AuthService {
    store: Arc<MemStore>,
    sessions: SessionStore,
}

impl AuthService {
    pub fn new(store: Arc<MemStore>, session_ttl: Duration) -> Self {
        Self {
            store,
            sessions: SessionStore::new(session_ttl),
        }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Create a user account with a hashed credential. Usernames are
    /// unique across the store.
    pub fn register(&self, mut new_user: NewUser) -> Result<User, AuthError> {
        if self.store.find_user_by_username(&new_user.username).is_some() {
            return Err(AuthError::UsernameTaken);
        }

        new_user.password = hash_password(&new_user.password)?;
        let user = self.store.create_user(new_user);
        info!("Registered user {} ({})", user.username, user.id);
        Ok(user)
    }

    /// Verify credentials and open a session.
    pub fn login(&self, creds: &Credentials) -> Result<(User, String), AuthError> {
        let user = self
            .store
            .find_user_by_username(&creds.username)
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(&creds.password, &user.password) {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.sessions.issue(user.id);
        info!("Login successful for {}", user.username);
        Ok((user, token))
    }

    /// Close a session; idempotent.
    pub fn logout(&self, token: &str) {
        self.sessions.revoke(token);
    }

    /// Session-derived identity: token -> live user, or nothing.
    pub fn current_user(&self, token: &str) -> Option<User> {
        let user_id = self.sessions.resolve(token)?;
        self.store.get_user(user_id)
    }
}

fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::PasswordHash(e.to_string()))
}

fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}
