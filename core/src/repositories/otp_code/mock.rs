//! Mock implementation of OtpCodeRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::one_time_code::OneTimeCode;
use crate::errors::DomainError;

use super::r#trait::OtpCodeRepository;

/// Mock one-time code repository for testing
///
/// Keyed by user id, mirroring the unique-per-user constraint.
pub struct MockOtpCodeRepository {
    pub codes: Arc<RwLock<HashMap<Uuid, OneTimeCode>>>,
}

impl MockOtpCodeRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            codes: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a mock sharing its store with a transaction scope mock
    pub fn with_store(codes: Arc<RwLock<HashMap<Uuid, OneTimeCode>>>) -> Self {
        Self { codes }
    }
}

impl Default for MockOtpCodeRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OtpCodeRepository for MockOtpCodeRepository {
    async fn upsert(&self, code: OneTimeCode) -> Result<OneTimeCode, DomainError> {
        let mut codes = self.codes.write().await;
        codes.insert(code.user_id, code.clone());
        Ok(code)
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<OneTimeCode>, DomainError> {
        let codes = self.codes.read().await;
        Ok(codes.get(&user_id).cloned())
    }
}
