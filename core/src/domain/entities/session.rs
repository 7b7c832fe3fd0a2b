//! Session entity for opaque bearer-token authentication.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default session lifetime in days
pub const DEFAULT_SESSION_TTL_DAYS: i64 = 30;

/// Authenticated session backed by an opaque bearer token
///
/// Only a SHA-256 hash of the token is stored; the token itself is
/// returned to the client once at login and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Unique identifier for the session
    pub id: Uuid,

    /// The user this session authenticates
    pub user_id: Uuid,

    /// SHA-256 hex digest of the bearer token
    #[serde(skip_serializing)]
    pub token_hash: String,

    /// Whether a two-factor login code has been verified for this session
    pub two_fa_verified: bool,

    /// Whether the session has been revoked by logout
    pub is_revoked: bool,

    /// Timestamp when the session was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the session expires
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Creates a new session for a user
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user the session belongs to
    /// * `token_hash` - SHA-256 hex digest of the bearer token
    /// * `ttl_days` - Session lifetime in days
    pub fn new(user_id: Uuid, token_hash: String, ttl_days: i64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            token_hash,
            two_fa_verified: false,
            is_revoked: false,
            created_at: now,
            expires_at: now + Duration::days(ttl_days),
        }
    }

    /// Checks if the session has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    /// Checks if the session can authenticate requests
    pub fn is_valid(&self) -> bool {
        !self.is_revoked && !self.is_expired()
    }

    /// Revokes the session
    pub fn revoke(&mut self) {
        self.is_revoked = true;
    }

    /// Marks the two-factor login step as completed
    pub fn mark_two_fa_verified(&mut self) {
        self.two_fa_verified = true;
    }
}
