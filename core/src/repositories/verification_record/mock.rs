//! Mock implementation of VerificationRecordRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::verification_record::VerificationRecord;
use crate::errors::DomainError;

use super::r#trait::VerificationRecordRepository;

/// Mock verification record repository for testing, keyed by user id
pub struct MockVerificationRecordRepository {
    pub records: Arc<RwLock<HashMap<Uuid, VerificationRecord>>>,
}

impl MockVerificationRecordRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a mock sharing its store with a transaction scope mock
    pub fn with_store(records: Arc<RwLock<HashMap<Uuid, VerificationRecord>>>) -> Self {
        Self { records }
    }
}

impl Default for MockVerificationRecordRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VerificationRecordRepository for MockVerificationRecordRepository {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<VerificationRecord>, DomainError> {
        let records = self.records.read().await;
        Ok(records.get(&user_id).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<VerificationRecord>, DomainError> {
        let records = self.records.read().await;
        Ok(records.values().find(|r| r.id == id).cloned())
    }
}
