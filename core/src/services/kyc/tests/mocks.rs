//! Mock collaborators and harness for KYC service tests

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::domain::entities::user::User;
use crate::domain::entities::verification_record::{DocumentType, RecordKind, VerificationRecord};
use crate::repositories::unit_of_work::{MockStores, MockTxFailure, MockUnitOfWork};
use crate::repositories::user::MockUserRepository;
use crate::repositories::verification_record::MockVerificationRecordRepository;
use crate::services::kyc::{KycService, RecordSubmission};
use crate::services::realtime::RealtimeNotifierTrait;

pub struct MockNotifier {
    pub published: Arc<Mutex<Vec<(String, serde_json::Value)>>>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self {
            published: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl RealtimeNotifierTrait for MockNotifier {
    async fn publish(&self, topic: &str, payload: serde_json::Value) -> Result<(), String> {
        self.published
            .lock()
            .unwrap()
            .push((topic.to_string(), payload));
        Ok(())
    }
}

/// Fully wired KYC service over shared mock stores
pub struct KycHarness {
    pub service: KycService<
        MockVerificationRecordRepository,
        MockUserRepository,
        MockUnitOfWork,
        MockNotifier,
    >,
    pub stores: MockStores,
    pub uow: Arc<MockUnitOfWork>,
    pub published: Arc<Mutex<Vec<(String, serde_json::Value)>>>,
}

impl KycHarness {
    pub fn new() -> Self {
        Self::build(MockUnitOfWork::new())
    }

    pub fn with_tx_failure(failure: MockTxFailure) -> Self {
        Self::build(MockUnitOfWork::new().failing_with(failure))
    }

    fn build(uow: MockUnitOfWork) -> Self {
        let stores = uow.stores.clone();
        let uow = Arc::new(uow);
        let notifier = MockNotifier::new();
        let published = Arc::clone(&notifier.published);

        let service = KycService::new(
            Arc::new(MockVerificationRecordRepository::with_store(Arc::clone(
                &stores.records,
            ))),
            Arc::new(MockUserRepository {
                users: Arc::clone(&stores.users),
            }),
            Arc::clone(&uow),
            Arc::new(notifier),
        );

        Self {
            service,
            stores,
            uow,
            published,
        }
    }

    pub async fn seed_user(&self, user: &User) {
        self.stores
            .users
            .write()
            .await
            .insert(user.id, user.clone());
    }

    pub async fn seed_record(&self, record: &VerificationRecord) {
        self.stores
            .records
            .write()
            .await
            .insert(record.user_id, record.clone());
    }
}

pub fn verified_user() -> User {
    let mut user = User::new(
        "trader@example.com".to_string(),
        "hashed-password".to_string(),
        "Trader".to_string(),
    );
    user.verify_email();
    user
}

pub fn admin_user() -> User {
    let mut user = User::new(
        "admin@example.com".to_string(),
        "hashed-password".to_string(),
        "Admin".to_string(),
    );
    user.verify_email();
    user.is_admin = true;
    user
}

pub fn address_submission() -> RecordSubmission {
    RecordSubmission {
        kind: RecordKind::Address,
        document_type: DocumentType::UtilityBill,
        front_document: "docs/utility-bill.png".to_string(),
        back_document: None,
        country: None,
        region: None,
        address: None,
    }
}

pub fn identity_submission() -> RecordSubmission {
    RecordSubmission {
        kind: RecordKind::Identity,
        document_type: DocumentType::Passport,
        front_document: "docs/passport-front.png".to_string(),
        back_document: Some("docs/passport-back.png".to_string()),
        country: Some("Australia".to_string()),
        region: Some("NSW".to_string()),
        address: Some("1 Harbour St, Sydney".to_string()),
    }
}
