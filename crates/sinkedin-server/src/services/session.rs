//! In-memory session store
//!
//! Opaque UUIDv4 bearer tokens mapped to user ids, with a TTL. Expired
//! entries are dropped lazily on lookup; a periodic sweep task removes the
//! rest.

use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

struct Session {
    user_id: i64,
    expires_at: Instant,
}

pub struct SessionStore {
    sessions: Arc<DashMap<String, Session>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            ttl,
        }
    }

    /// Create a session for `user_id` and return its bearer token.
    pub fn issue(&self, user_id: i64) -> String {
        let token = uuid::Uuid::new_v4().to_string();
        self.sessions.insert(
            token.clone(),
            Session {
                user_id,
                expires_at: Instant::now() + self.ttl,
            },
        );
        debug!("Issued session for user {}", user_id);
        token
    }

    /// Resolve a token to its user id, dropping the entry if expired.
    pub fn resolve(&self, token: &str) -> Option<i64> {
        let entry = self.sessions.get(token)?;
        if Instant::now() > entry.expires_at {
            drop(entry);
            self.sessions.remove(token);
            return None;
        }
        Some(entry.user_id)
    }

    /// Delete a session; succeeds whether or not the token exists.
    pub fn revoke(&self, token: &str) {
        self.sessions.remove(token);
    }

    /// Spawn the background task that evicts expired sessions. Must be
    /// called from within a tokio runtime.
    pub fn start_sweeper(&self) {
        let sessions = self.sessions.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(60));
            loop {
                interval.tick().await;

                let now = Instant::now();
                let expired: Vec<String> = sessions
                    .iter()
                    .filter(|entry| now > entry.expires_at)
                    .map(|entry| entry.key().clone())
                    .collect();

                for token in expired {
                    sessions.remove(&token);
                }
            }
        });
    }
}
