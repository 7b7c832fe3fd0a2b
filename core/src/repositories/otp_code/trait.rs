//! One-time code repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::one_time_code::OneTimeCode;
use crate::errors::DomainError;

/// Repository trait for OneTimeCode persistence operations
///
/// Storage enforces at most one code per user. Issuing a new code
/// replaces any existing one for that user regardless of purpose or
/// expiry. Consumption (deletion on successful verification) happens
/// inside a transaction and is exposed on
/// [`TxScope`](crate::repositories::unit_of_work::TxScope), not here.
#[async_trait]
pub trait OtpCodeRepository: Send + Sync {
    /// Insert a code for a user, replacing any existing one
    ///
    /// # Arguments
    /// * `code` - The OneTimeCode to persist
    ///
    /// # Returns
    /// * `Ok(OneTimeCode)` - The stored code
    /// * `Err(DomainError)` - Database error occurred
    ///
    /// # Example
    /// ```no_run
    /// # use uuid::Uuid;
    /// # use pt_core::repositories::OtpCodeRepository;
    /// # use pt_core::domain::entities::one_time_code::{OneTimeCode, OtpPurpose};
    /// # async fn example(repo: &impl OtpCodeRepository) -> Result<(), Box<dyn std::error::Error>> {
    /// let code = OneTimeCode::new(Uuid::new_v4(), OtpPurpose::Login, None);
    /// let stored = repo.upsert(code).await?;
    /// println!("Code expires at {}", stored.expires_at);
    /// # Ok(())
    /// # }
    /// ```
    async fn upsert(&self, code: OneTimeCode) -> Result<OneTimeCode, DomainError>;

    /// Find the active code for a user
    ///
    /// # Arguments
    /// * `user_id` - The UUID of the user
    ///
    /// # Returns
    /// * `Ok(Some(OneTimeCode))` - The user's current code (possibly expired)
    /// * `Ok(None)` - No code stored for the user
    /// * `Err(DomainError)` - Database error occurred
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<OneTimeCode>, DomainError>;
}
