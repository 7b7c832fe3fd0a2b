//! Shared in-memory doubles for the HTTP integration tests.
//!
//! All fake repositories and the fake unit of work share one `Backend`,
//! so writes made through the service layer during one request are
//! visible to the next request against the same harness.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use actix_web::http::StatusCode;
use actix_web::{test, web};
use async_trait::async_trait;
use serde_json::{json, Value};
use uuid::Uuid;

use pt_api::app::{create_app, AppState};
use pt_core::domain::entities::notification::{Notification, NotificationRead};
use pt_core::domain::entities::one_time_code::OneTimeCode;
use pt_core::domain::entities::session::Session;
use pt_core::domain::entities::user::User;
use pt_core::domain::entities::verification_record::VerificationRecord;
use pt_core::errors::{DomainError, DomainResult};
use pt_core::repositories::{
    NotificationRepository, OtpCodeRepository, SessionRepository, TxScope, UnitOfWork,
    UserRepository, VerificationRecordRepository,
};
use pt_core::services::account::{AccountService, AccountServiceConfig, PasswordHasherTrait};
use pt_core::services::kyc::KycService;
use pt_core::services::notification::NotificationService;
use pt_core::services::otp::{MailerTrait, OtpService, OtpServiceConfig, RateLimiterTrait};
use pt_core::services::realtime::NoopRealtimeNotifier;

/// Shared storage behind every fake repository
#[derive(Default)]
pub struct Backend {
    pub users: Mutex<HashMap<Uuid, User>>,
    pub sessions: Mutex<HashMap<Uuid, Session>>,
    /// Live codes keyed by user id; at most one per user
    pub codes: Mutex<HashMap<Uuid, OneTimeCode>>,
    pub notifications: Mutex<Vec<Notification>>,
    pub read_markers: Mutex<Vec<NotificationRead>>,
    pub records: Mutex<HashMap<Uuid, VerificationRecord>>,
}

pub struct FakeUserRepository {
    backend: Arc<Backend>,
}

#[async_trait]
impl UserRepository for FakeUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        Ok(self.backend.users.lock().unwrap().get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .backend
            .users
            .lock()
            .unwrap()
            .values()
            .find(|user| user.email == email)
            .cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        self.backend
            .users
            .lock()
            .unwrap()
            .insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        self.backend
            .users
            .lock()
            .unwrap()
            .insert(user.id, user.clone());
        Ok(user)
    }
}

pub struct FakeSessionRepository {
    backend: Arc<Backend>,
}

#[async_trait]
impl SessionRepository for FakeSessionRepository {
    async fn create(&self, session: Session) -> Result<Session, DomainError> {
        self.backend
            .sessions
            .lock()
            .unwrap()
            .insert(session.id, session.clone());
        Ok(session)
    }

    async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<Session>, DomainError> {
        Ok(self
            .backend
            .sessions
            .lock()
            .unwrap()
            .values()
            .find(|session| session.token_hash == token_hash)
            .cloned())
    }

    async fn revoke(&self, token_hash: &str) -> Result<bool, DomainError> {
        let mut sessions = self.backend.sessions.lock().unwrap();
        match sessions
            .values_mut()
            .find(|session| session.token_hash == token_hash && !session.is_revoked)
        {
            Some(session) => {
                session.revoke();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

pub struct FakeOtpCodeRepository {
    backend: Arc<Backend>,
}

#[async_trait]
impl OtpCodeRepository for FakeOtpCodeRepository {
    async fn upsert(&self, code: OneTimeCode) -> Result<OneTimeCode, DomainError> {
        self.backend
            .codes
            .lock()
            .unwrap()
            .insert(code.user_id, code.clone());
        Ok(code)
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<OneTimeCode>, DomainError> {
        Ok(self.backend.codes.lock().unwrap().get(&user_id).cloned())
    }
}

pub struct FakeNotificationRepository {
    backend: Arc<Backend>,
}

#[async_trait]
impl NotificationRepository for FakeNotificationRepository {
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Notification>, DomainError> {
        let mut rows: Vec<Notification> = self
            .backend
            .notifications
            .lock()
            .unwrap()
            .iter()
            .filter(|row| row.user_id == Some(user_id) || row.user_id.is_none())
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Notification>, DomainError> {
        Ok(self
            .backend
            .notifications
            .lock()
            .unwrap()
            .iter()
            .find(|row| row.id == id)
            .cloned())
    }

    async fn insert(&self, notification: Notification) -> Result<Notification, DomainError> {
        self.backend
            .notifications
            .lock()
            .unwrap()
            .push(notification.clone());
        Ok(notification)
    }

    async fn mark_read(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut rows = self.backend.notifications.lock().unwrap();
        match rows.iter_mut().find(|row| row.id == id && row.read_at.is_none()) {
            Some(row) => {
                row.mark_read();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn insert_read_marker(&self, marker: NotificationRead) -> Result<(), DomainError> {
        let mut markers = self.backend.read_markers.lock().unwrap();
        let exists = markers
            .iter()
            .any(|m| m.notification_id == marker.notification_id && m.user_id == marker.user_id);
        if !exists {
            markers.push(marker);
        }
        Ok(())
    }

    async fn list_read_marker_ids(&self, user_id: Uuid) -> Result<Vec<Uuid>, DomainError> {
        Ok(self
            .backend
            .read_markers
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.user_id == user_id)
            .map(|m| m.notification_id)
            .collect())
    }
}

pub struct FakeVerificationRecordRepository {
    backend: Arc<Backend>,
}

#[async_trait]
impl VerificationRecordRepository for FakeVerificationRecordRepository {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<VerificationRecord>, DomainError> {
        Ok(self
            .backend
            .records
            .lock()
            .unwrap()
            .values()
            .find(|record| record.user_id == user_id)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<VerificationRecord>, DomainError> {
        Ok(self.backend.records.lock().unwrap().get(&id).cloned())
    }
}

pub struct FakeUnitOfWork {
    backend: Arc<Backend>,
}

#[async_trait]
impl UnitOfWork for FakeUnitOfWork {
    async fn begin(&self) -> DomainResult<Box<dyn TxScope>> {
        Ok(Box::new(FakeTxScope {
            backend: self.backend.clone(),
        }))
    }
}

/// Transaction scope that applies writes immediately
///
/// Sufficient for request-level tests; rollback leaves already-applied
/// writes in place.
pub struct FakeTxScope {
    backend: Arc<Backend>,
}

#[async_trait]
impl TxScope for FakeTxScope {
    async fn delete_code(&mut self, user_id: Uuid) -> DomainResult<bool> {
        Ok(self.backend.codes.lock().unwrap().remove(&user_id).is_some())
    }

    async fn save_user(&mut self, user: &User) -> DomainResult<()> {
        self.backend
            .users
            .lock()
            .unwrap()
            .insert(user.id, user.clone());
        Ok(())
    }

    async fn mark_session_verified(&mut self, session_id: Uuid) -> DomainResult<()> {
        let mut sessions = self.backend.sessions.lock().unwrap();
        let session = sessions
            .get_mut(&session_id)
            .ok_or_else(|| DomainError::not_found("session"))?;
        session.mark_two_fa_verified();
        Ok(())
    }

    async fn insert_notification(&mut self, notification: &Notification) -> DomainResult<()> {
        self.backend
            .notifications
            .lock()
            .unwrap()
            .push(notification.clone());
        Ok(())
    }

    async fn replace_verification_record(
        &mut self,
        record: &VerificationRecord,
    ) -> DomainResult<()> {
        let mut records = self.backend.records.lock().unwrap();
        records.retain(|_, existing| existing.user_id != record.user_id);
        records.insert(record.id, record.clone());
        Ok(())
    }

    async fn update_verification_record(
        &mut self,
        record: &VerificationRecord,
    ) -> DomainResult<()> {
        self.backend
            .records
            .lock()
            .unwrap()
            .insert(record.id, record.clone());
        Ok(())
    }

    async fn commit(self: Box<Self>) -> DomainResult<()> {
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> DomainResult<()> {
        Ok(())
    }
}

/// Deterministic hasher so tests can seed users with known passwords
pub struct TestHasher;

impl PasswordHasherTrait for TestHasher {
    fn hash(&self, password: &str) -> Result<String, String> {
        Ok(format!("hashed:{}", password))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, String> {
        Ok(hash == format!("hashed:{}", password))
    }
}

/// Mailer that records outbound messages instead of sending them
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<(String, String, String)>>,
}

#[async_trait]
impl MailerTrait for RecordingMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<String, String> {
        let mut sent = self.sent.lock().unwrap();
        sent.push((to.to_string(), subject.to_string(), body.to_string()));
        Ok(format!("mail_{}", sent.len()))
    }
}

/// Rate limiter with a fixed answer
pub struct TestRateLimiter {
    pub limited: bool,
}

#[async_trait]
impl RateLimiterTrait for TestRateLimiter {
    async fn is_rate_limited(&self, _identifier: &str, _origin: &str) -> Result<bool, String> {
        Ok(self.limited)
    }

    async fn record_attempt(&self, _identifier: &str, _origin: &str) -> Result<i64, String> {
        Ok(1)
    }

    async fn reset_in_seconds(
        &self,
        _identifier: &str,
        _origin: &str,
    ) -> Result<Option<i64>, String> {
        Ok(self.limited.then_some(1800))
    }
}

pub type TestState = AppState<
    FakeUserRepository,
    FakeSessionRepository,
    TestHasher,
    FakeOtpCodeRepository,
    FakeUnitOfWork,
    RecordingMailer,
    TestRateLimiter,
    NoopRealtimeNotifier,
    FakeVerificationRecordRepository,
    FakeNotificationRepository,
>;

/// The application state for one test plus handles into its storage
pub struct TestHarness {
    pub backend: Arc<Backend>,
    pub mailer: Arc<RecordingMailer>,
    pub state: web::Data<TestState>,
}

/// Builds a harness with the rate limiter wide open
pub fn harness() -> TestHarness {
    harness_with_limiter(false)
}

/// Builds a harness; `limited` forces every code send over the limit
pub fn harness_with_limiter(limited: bool) -> TestHarness {
    let backend = Arc::new(Backend::default());
    let mailer = Arc::new(RecordingMailer::default());

    let user_repository = Arc::new(FakeUserRepository {
        backend: backend.clone(),
    });
    let session_repository = Arc::new(FakeSessionRepository {
        backend: backend.clone(),
    });
    let code_repository = Arc::new(FakeOtpCodeRepository {
        backend: backend.clone(),
    });
    let record_repository = Arc::new(FakeVerificationRecordRepository {
        backend: backend.clone(),
    });
    let notification_repository = Arc::new(FakeNotificationRepository {
        backend: backend.clone(),
    });
    let unit_of_work = Arc::new(FakeUnitOfWork {
        backend: backend.clone(),
    });
    let notifier = Arc::new(NoopRealtimeNotifier::new());

    let account_service = Arc::new(AccountService::new(
        user_repository.clone(),
        session_repository,
        Arc::new(TestHasher),
        AccountServiceConfig::default(),
    ));
    let otp_service = Arc::new(OtpService::new(
        code_repository,
        unit_of_work.clone(),
        mailer.clone(),
        Arc::new(TestRateLimiter { limited }),
        notifier.clone(),
        OtpServiceConfig::default(),
    ));
    let kyc_service = Arc::new(KycService::new(
        record_repository,
        user_repository,
        unit_of_work,
        notifier,
    ));
    let notification_service = Arc::new(NotificationService::new(notification_repository));

    let state = web::Data::new(AppState {
        account_service,
        otp_service,
        kyc_service,
        notification_service,
    });

    TestHarness {
        backend,
        mailer,
        state,
    }
}

/// Applies a mutation to a stored user, looked up by email
pub fn update_user<M>(backend: &Backend, email: &str, mutate: M)
where
    M: FnOnce(&mut User),
{
    let mut users = backend.users.lock().unwrap();
    let user = users
        .values_mut()
        .find(|user| user.email == email)
        .expect("user not seeded");
    mutate(user);
}

/// Reads the live code stored for a user
pub fn stored_code(backend: &Backend, user_id: Uuid) -> Option<OneTimeCode> {
    backend.codes.lock().unwrap().get(&user_id).cloned()
}

/// Looks up a stored user's id by email
pub fn user_id_by_email(backend: &Backend, email: &str) -> Uuid {
    backend
        .users
        .lock()
        .unwrap()
        .values()
        .find(|user| user.email == email)
        .map(|user| user.id)
        .expect("user not seeded")
}

/// Registers a user over HTTP and asserts the account was created
pub async fn register_user(h: &TestHarness, email: &str, password: &str, display_name: &str) {
    let app = test::init_service(create_app(h.state.clone())).await;
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(json!({
                "email": email,
                "password": password,
                "display_name": display_name,
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
}

/// Logs a user in over HTTP and returns the bearer token
pub async fn login_token(h: &TestHarness, email: &str, password: &str) -> String {
    let app = test::init_service(create_app(h.state.clone())).await;
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({ "email": email, "password": password }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    body["data"]["token"]
        .as_str()
        .expect("login response carries a token")
        .to_string()
}
