//! Mock unit of work for testing transactional flows.
//!
//! Operations are buffered and applied to the shared in-memory stores
//! only on `commit`, so tests can assert that nothing leaks out of a
//! rolled-back or failed transaction.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::notification::Notification;
use crate::domain::entities::one_time_code::OneTimeCode;
use crate::domain::entities::session::Session;
use crate::domain::entities::user::User;
use crate::domain::entities::verification_record::VerificationRecord;
use crate::errors::{DomainError, DomainResult};

use super::r#trait::{TxScope, UnitOfWork};

/// Where an injected failure fires
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockTxFailure {
    /// Fail when the named operation is invoked
    OnOperation(&'static str),
    /// Fail at commit, discarding the buffer
    OnCommit,
}

/// Operation buffered inside an open mock transaction
#[derive(Debug, Clone)]
enum BufferedOp {
    DeleteCode(Uuid),
    SaveUser(User),
    MarkSessionVerified(Uuid),
    InsertNotification(Notification),
    ReplaceRecord(VerificationRecord),
    UpdateRecord(VerificationRecord),
}

/// Shared in-memory stores backing the mock unit of work
///
/// Hand the same `Arc`s to the plain repository mocks so reads and
/// transactional writes observe one consistent world.
#[derive(Clone, Default)]
pub struct MockStores {
    pub users: Arc<RwLock<HashMap<Uuid, User>>>,
    /// Keyed by user id, one code per user
    pub codes: Arc<RwLock<HashMap<Uuid, OneTimeCode>>>,
    /// Keyed by token hash
    pub sessions: Arc<RwLock<HashMap<String, Session>>>,
    pub notifications: Arc<RwLock<HashMap<Uuid, Notification>>>,
    /// Keyed by user id, one record per user
    pub records: Arc<RwLock<HashMap<Uuid, VerificationRecord>>>,
}

impl MockStores {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Mock unit of work handing out buffering transaction scopes
pub struct MockUnitOfWork {
    pub stores: MockStores,
    failure: Option<MockTxFailure>,
    pub commits: Arc<RwLock<usize>>,
    pub rollbacks: Arc<RwLock<usize>>,
}

impl MockUnitOfWork {
    /// Create a mock over fresh stores
    pub fn new() -> Self {
        Self::with_stores(MockStores::new())
    }

    /// Create a mock over existing shared stores
    pub fn with_stores(stores: MockStores) -> Self {
        Self {
            stores,
            failure: None,
            commits: Arc::new(RwLock::new(0)),
            rollbacks: Arc::new(RwLock::new(0)),
        }
    }

    /// Inject a failure into every scope this mock opens
    pub fn failing_with(mut self, failure: MockTxFailure) -> Self {
        self.failure = Some(failure);
        self
    }

    /// Number of committed transactions
    pub async fn commit_count(&self) -> usize {
        *self.commits.read().await
    }

    /// Number of rolled-back transactions
    pub async fn rollback_count(&self) -> usize {
        *self.rollbacks.read().await
    }
}

impl Default for MockUnitOfWork {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UnitOfWork for MockUnitOfWork {
    async fn begin(&self) -> DomainResult<Box<dyn TxScope>> {
        Ok(Box::new(MockTxScope {
            stores: self.stores.clone(),
            buffer: Vec::new(),
            failure: self.failure.clone(),
            commits: Arc::clone(&self.commits),
            rollbacks: Arc::clone(&self.rollbacks),
        }))
    }
}

/// Buffering transaction scope over [`MockStores`]
pub struct MockTxScope {
    stores: MockStores,
    buffer: Vec<BufferedOp>,
    failure: Option<MockTxFailure>,
    commits: Arc<RwLock<usize>>,
    rollbacks: Arc<RwLock<usize>>,
}

impl MockTxScope {
    fn check_failure(&self, operation: &'static str) -> DomainResult<()> {
        if self.failure == Some(MockTxFailure::OnOperation(operation)) {
            return Err(DomainError::internal(format!(
                "injected failure in {}",
                operation
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl TxScope for MockTxScope {
    async fn delete_code(&mut self, user_id: Uuid) -> DomainResult<bool> {
        self.check_failure("delete_code")?;
        let exists = self.stores.codes.read().await.contains_key(&user_id);
        self.buffer.push(BufferedOp::DeleteCode(user_id));
        Ok(exists)
    }

    async fn save_user(&mut self, user: &User) -> DomainResult<()> {
        self.check_failure("save_user")?;
        self.buffer.push(BufferedOp::SaveUser(user.clone()));
        Ok(())
    }

    async fn mark_session_verified(&mut self, session_id: Uuid) -> DomainResult<()> {
        self.check_failure("mark_session_verified")?;
        self.buffer.push(BufferedOp::MarkSessionVerified(session_id));
        Ok(())
    }

    async fn insert_notification(&mut self, notification: &Notification) -> DomainResult<()> {
        self.check_failure("insert_notification")?;
        self.buffer
            .push(BufferedOp::InsertNotification(notification.clone()));
        Ok(())
    }

    async fn replace_verification_record(
        &mut self,
        record: &VerificationRecord,
    ) -> DomainResult<()> {
        self.check_failure("replace_verification_record")?;
        self.buffer.push(BufferedOp::ReplaceRecord(record.clone()));
        Ok(())
    }

    async fn update_verification_record(
        &mut self,
        record: &VerificationRecord,
    ) -> DomainResult<()> {
        self.check_failure("update_verification_record")?;
        self.buffer.push(BufferedOp::UpdateRecord(record.clone()));
        Ok(())
    }

    async fn commit(self: Box<Self>) -> DomainResult<()> {
        if self.failure == Some(MockTxFailure::OnCommit) {
            return Err(DomainError::internal("injected failure at commit"));
        }

        for op in self.buffer {
            match op {
                BufferedOp::DeleteCode(user_id) => {
                    self.stores.codes.write().await.remove(&user_id);
                }
                BufferedOp::SaveUser(user) => {
                    self.stores.users.write().await.insert(user.id, user);
                }
                BufferedOp::MarkSessionVerified(session_id) => {
                    let mut sessions = self.stores.sessions.write().await;
                    if let Some(session) =
                        sessions.values_mut().find(|s| s.id == session_id)
                    {
                        session.mark_two_fa_verified();
                    }
                }
                BufferedOp::InsertNotification(notification) => {
                    self.stores
                        .notifications
                        .write()
                        .await
                        .insert(notification.id, notification);
                }
                BufferedOp::ReplaceRecord(record) | BufferedOp::UpdateRecord(record) => {
                    self.stores
                        .records
                        .write()
                        .await
                        .insert(record.user_id, record);
                }
            }
        }

        *self.commits.write().await += 1;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> DomainResult<()> {
        *self.rollbacks.write().await += 1;
        Ok(())
    }
}
