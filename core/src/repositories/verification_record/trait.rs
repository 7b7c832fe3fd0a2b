//! Verification record repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::verification_record::VerificationRecord;
use crate::errors::DomainError;

/// Repository trait for VerificationRecord read operations
///
/// Record writes (creation and review transitions) are transactional
/// with their companion notification and go through
/// [`TxScope`](crate::repositories::unit_of_work::TxScope); this trait
/// covers lookups only.
#[async_trait]
pub trait VerificationRecordRepository: Send + Sync {
    /// Find the active record for a user
    ///
    /// At most one record exists per user.
    ///
    /// # Arguments
    /// * `user_id` - The UUID of the user
    ///
    /// # Returns
    /// * `Ok(Some(VerificationRecord))` - The user's record
    /// * `Ok(None)` - The user has never submitted
    /// * `Err(DomainError)` - Database error occurred
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<VerificationRecord>, DomainError>;

    /// Find a record by id
    ///
    /// # Arguments
    /// * `id` - The UUID of the record
    ///
    /// # Returns
    /// * `Ok(Some(VerificationRecord))` - Record found
    /// * `Ok(None)` - No record with that id
    /// * `Err(DomainError)` - Database error occurred
    async fn find_by_id(&self, id: Uuid) -> Result<Option<VerificationRecord>, DomainError>;
}
