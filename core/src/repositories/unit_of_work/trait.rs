//! Unit-of-work traits for transactional multi-step mutations.
//!
//! Flows that must mutate several rows atomically (code consumption
//! plus its effect, record creation plus its notification) run against
//! a [`TxScope`] obtained from [`UnitOfWork::begin`]. Nothing is
//! visible to other requests until `commit`; any failure path calls
//! `rollback` and leaves the store untouched.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::notification::Notification;
use crate::domain::entities::user::User;
use crate::domain::entities::verification_record::VerificationRecord;
use crate::errors::DomainResult;

/// Operations available inside one open transaction
///
/// A scope is consumed by exactly one of `commit` or `rollback`.
#[async_trait]
pub trait TxScope: Send {
    /// Delete the stored one-time code for a user
    ///
    /// # Arguments
    /// * `user_id` - The UUID of the user whose code is consumed
    ///
    /// # Returns
    /// * `Ok(true)` - A code row was deleted
    /// * `Ok(false)` - No code existed for the user
    async fn delete_code(&mut self, user_id: Uuid) -> DomainResult<bool>;

    /// Write back an updated user
    async fn save_user(&mut self, user: &User) -> DomainResult<()>;

    /// Mark the two-factor step verified on a session
    ///
    /// # Arguments
    /// * `session_id` - The UUID of the session to mark
    async fn mark_session_verified(&mut self, session_id: Uuid) -> DomainResult<()>;

    /// Insert a notification
    async fn insert_notification(&mut self, notification: &Notification) -> DomainResult<()>;

    /// Insert a verification record for a user, replacing any prior one
    ///
    /// Storage keeps at most one record per user; a rejected record is
    /// overwritten by a fresh submission.
    async fn replace_verification_record(
        &mut self,
        record: &VerificationRecord,
    ) -> DomainResult<()>;

    /// Update an existing verification record in place
    async fn update_verification_record(
        &mut self,
        record: &VerificationRecord,
    ) -> DomainResult<()>;

    /// Commit every buffered operation atomically
    async fn commit(self: Box<Self>) -> DomainResult<()>;

    /// Discard every buffered operation
    async fn rollback(self: Box<Self>) -> DomainResult<()>;
}

/// Factory for transaction scopes
///
/// # Example
/// ```no_run
/// # use uuid::Uuid;
/// # use pt_core::repositories::unit_of_work::UnitOfWork;
/// # async fn example(uow: &dyn UnitOfWork, user_id: Uuid) -> Result<(), Box<dyn std::error::Error>> {
/// let mut tx = uow.begin().await?;
/// tx.delete_code(user_id).await?;
/// tx.commit().await?;
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Open a new transaction scope
    async fn begin(&self) -> DomainResult<Box<dyn TxScope>>;
}
