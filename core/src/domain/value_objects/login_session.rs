//! Login session value object returned after successful authentication.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Result of a successful login
///
/// Carries the opaque bearer token exactly once; only its hash is
/// persisted server-side. When `two_factor_required` is set the client
/// must complete a `login` one-time code before the session counts as
/// fully verified.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginSession {
    /// Identifier of the created session
    pub session_id: Uuid,

    /// Opaque bearer token for the Authorization header
    pub token: String,

    /// When the session expires
    pub expires_at: DateTime<Utc>,

    /// Whether a two-factor login code must still be verified
    pub two_factor_required: bool,
}

impl LoginSession {
    /// Creates a new login session value
    ///
    /// # Arguments
    ///
    /// * `session_id` - Identifier of the persisted session
    /// * `token` - The plaintext bearer token handed to the client
    /// * `expires_at` - Session expiry timestamp
    /// * `two_factor_required` - Whether 2FA completion is pending
    pub fn new(
        session_id: Uuid,
        token: String,
        expires_at: DateTime<Utc>,
        two_factor_required: bool,
    ) -> Self {
        Self {
            session_id,
            token,
            expires_at,
            two_factor_required,
        }
    }
}
