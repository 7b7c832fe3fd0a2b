//! Session repository trait for opaque bearer-token sessions.

use async_trait::async_trait;

use crate::domain::entities::session::Session;
use crate::errors::DomainError;

/// Repository trait for Session persistence operations
///
/// Lookups go through the SHA-256 hash of the bearer token; plaintext
/// tokens never reach storage. Marking the two-factor step verified is
/// transactional and lives on
/// [`TxScope`](crate::repositories::unit_of_work::TxScope).
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Persist a new session
    ///
    /// # Arguments
    /// * `session` - The Session entity to persist
    ///
    /// # Returns
    /// * `Ok(Session)` - The saved session
    /// * `Err(DomainError)` - Save failed
    async fn create(&self, session: Session) -> Result<Session, DomainError>;

    /// Find a session by the hash of its bearer token
    ///
    /// # Arguments
    /// * `token_hash` - SHA-256 hex digest of the presented token
    ///
    /// # Returns
    /// * `Ok(Some(Session))` - Session found (may be expired or revoked)
    /// * `Ok(None)` - No session with that token
    /// * `Err(DomainError)` - Database error occurred
    async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<Session>, DomainError>;

    /// Revoke a session by token hash
    ///
    /// # Arguments
    /// * `token_hash` - SHA-256 hex digest of the presented token
    ///
    /// # Returns
    /// * `Ok(true)` - Session was revoked
    /// * `Ok(false)` - Session not found
    /// * `Err(DomainError)` - Revocation failed
    async fn revoke(&self, token_hash: &str) -> Result<bool, DomainError>;
}
