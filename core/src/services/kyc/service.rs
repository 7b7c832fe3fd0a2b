//! Verification record submission and admin review

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entities::notification::Notification;
use crate::domain::entities::user::User;
use crate::domain::entities::verification_record::{
    RecordKind, VerificationRecord, VerificationStatus,
};
use crate::errors::{AccountError, DomainError, DomainResult, KycError, ValidationError};
use crate::repositories::unit_of_work::{TxScope, UnitOfWork};
use crate::repositories::user::UserRepository;
use crate::repositories::verification_record::VerificationRecordRepository;
use crate::services::kyc::types::{RecordSubmission, ReviewDecision, SubmitOutcome};
use crate::services::realtime::RealtimeNotifierTrait;

/// Service for address and identity verification
///
/// Users submit documents for review; admins approve or reject them.
/// Approving an identity record also stamps the user's ID verification
/// and re-evaluates trust promotion.
pub struct KycService<V, U, W, N>
where
    V: VerificationRecordRepository,
    U: UserRepository,
    W: UnitOfWork,
    N: RealtimeNotifierTrait,
{
    record_repository: Arc<V>,
    user_repository: Arc<U>,
    unit_of_work: Arc<W>,
    notifier: Arc<N>,
}

impl<V, U, W, N> KycService<V, U, W, N>
where
    V: VerificationRecordRepository,
    U: UserRepository,
    W: UnitOfWork,
    N: RealtimeNotifierTrait,
{
    /// Creates a new KYC service
    pub fn new(
        record_repository: Arc<V>,
        user_repository: Arc<U>,
        unit_of_work: Arc<W>,
        notifier: Arc<N>,
    ) -> Self {
        Self {
            record_repository,
            user_repository,
            unit_of_work,
            notifier,
        }
    }

    /// Submits a verification record for review
    ///
    /// This method:
    /// 1. Requires the submitting user's email to be verified
    /// 2. Validates the document references for the submitted kind
    /// 3. Short-circuits when a verified or pending record already exists
    /// 4. Stores a fresh pending record, replacing a rejected one
    /// 5. Inserts a notification for the user in the same transaction
    ///
    /// # Arguments
    /// * `user` - The submitting user
    /// * `submission` - Validated submission payload
    ///
    /// # Returns
    /// * `Ok(SubmitOutcome)` - Created record, or the existing state
    /// * `Err(DomainError)` - Gate, validation, or storage failure
    pub async fn submit(
        &self,
        user: &User,
        submission: RecordSubmission,
    ) -> DomainResult<SubmitOutcome> {
        if !user.is_email_verified() {
            return Err(KycError::EmailNotVerified.into());
        }

        validate_submission(&submission)?;

        if let Some(existing) = self.record_repository.find_by_user(user.id).await? {
            match existing.status {
                VerificationStatus::Verified => return Ok(SubmitOutcome::AlreadyVerified),
                VerificationStatus::Pending => return Ok(SubmitOutcome::AlreadyPending),
                VerificationStatus::Reject => {}
            }
        }

        let record = VerificationRecord::new(
            user.id,
            submission.kind,
            submission.document_type,
            submission.front_document,
            submission.back_document,
            submission.country,
            submission.region,
            submission.address,
        );
        let notification = Notification::for_user(
            user.id,
            "Verification submitted",
            format!(
                "Your {} verification was submitted and is pending review.",
                record.kind.as_str()
            ),
        );

        let mut tx = self.unit_of_work.begin().await?;
        if let Err(e) = store_submission(&mut *tx, &record, &notification).await {
            let _ = tx.rollback().await;
            return Err(e);
        }
        tx.commit().await?;

        tracing::info!(
            user_id = %user.id,
            record_id = %record.id,
            kind = record.kind.as_str(),
            event = "verification_submitted",
            "Verification record submitted for review"
        );

        self.publish_notification(user.id, &notification).await;

        Ok(SubmitOutcome::Created(record))
    }

    /// Reviews a pending verification record
    ///
    /// This method:
    /// 1. Requires the caller to be an admin
    /// 2. Rejects review of records that are no longer pending
    /// 3. Applies the decision and stamps `reviewed_at`
    /// 4. On identity approval, stamps the owner's ID verification and
    ///    re-evaluates trust promotion
    /// 5. Inserts a notification for the owner in the same transaction
    ///
    /// # Arguments
    /// * `admin` - The reviewing user
    /// * `record_id` - Record under review
    /// * `decision` - Approve or reject
    /// * `note` - Optional reviewer note, appended to the notification
    ///
    /// # Returns
    /// * `Ok(VerificationRecord)` - The reviewed record
    /// * `Err(DomainError)` - Gate, state, or storage failure
    pub async fn review(
        &self,
        admin: &User,
        record_id: Uuid,
        decision: ReviewDecision,
        note: Option<&str>,
    ) -> DomainResult<VerificationRecord> {
        if !admin.is_admin {
            return Err(AccountError::InsufficientPermissions.into());
        }

        let mut record = self
            .record_repository
            .find_by_id(record_id)
            .await?
            .ok_or_else(|| DomainError::not_found("verification record"))?;
        if record.status != VerificationStatus::Pending {
            return Err(KycError::AlreadyReviewed.into());
        }

        let mut owner_update = None;
        match decision {
            ReviewDecision::Approve => {
                record.approve();
                if record.kind == RecordKind::Identity {
                    let mut owner = self
                        .user_repository
                        .find_by_id(record.user_id)
                        .await?
                        .ok_or_else(|| DomainError::not_found("user"))?;
                    owner.verify_id();
                    let promoted = owner.promote_trust_if_fully_verified();
                    owner_update = Some((owner, promoted));
                }
            }
            ReviewDecision::Reject => {
                record.reject(note.unwrap_or("Documents could not be verified"));
            }
        }

        let promoted = owner_update.as_ref().is_some_and(|(_, p)| *p);
        let notification = Notification::for_user(
            record.user_id,
            "Verification reviewed",
            review_body(&record, promoted, note),
        );

        let mut tx = self.unit_of_work.begin().await?;
        if let Err(e) = store_review(
            &mut *tx,
            &record,
            owner_update.as_ref().map(|(owner, _)| owner),
            &notification,
        )
        .await
        {
            let _ = tx.rollback().await;
            return Err(e);
        }
        tx.commit().await?;

        tracing::info!(
            record_id = %record.id,
            user_id = %record.user_id,
            admin_id = %admin.id,
            decision = record.status.as_str(),
            event = "verification_reviewed",
            "Verification record reviewed"
        );

        self.publish_notification(record.user_id, &notification).await;

        Ok(record)
    }

    /// Publishes a stored notification to the owner's realtime topic
    ///
    /// Delivery failures are logged and do not fail the flow.
    async fn publish_notification(&self, user_id: Uuid, notification: &Notification) {
        let topic = format!("user:{}:notifications", user_id);
        if let Ok(payload) = serde_json::to_value(notification) {
            if let Err(e) = self.notifier.publish(&topic, payload).await {
                tracing::warn!(
                    user_id = %user_id,
                    error = %e,
                    "Failed to publish verification notification"
                );
            }
        }
    }
}

/// Validates kind-specific required fields on a submission
fn validate_submission(submission: &RecordSubmission) -> DomainResult<()> {
    if submission.front_document.trim().is_empty() {
        return Err(ValidationError::RequiredField {
            field: "front_document".to_string(),
        }
        .into());
    }
    if submission.kind == RecordKind::Identity {
        for (field, value) in [
            ("country", &submission.country),
            ("region", &submission.region),
            ("address", &submission.address),
        ] {
            let missing = value.as_deref().map_or(true, |v| v.trim().is_empty());
            if missing {
                return Err(ValidationError::RequiredField {
                    field: field.to_string(),
                }
                .into());
            }
        }
    }
    Ok(())
}

/// Composes the review outcome notification body
fn review_body(record: &VerificationRecord, promoted: bool, note: Option<&str>) -> String {
    let mut body = match record.status {
        VerificationStatus::Verified if promoted => format!(
            "Your {} verification was approved. Your account is now trusted.",
            record.kind.as_str()
        ),
        VerificationStatus::Verified => {
            format!("Your {} verification was approved.", record.kind.as_str())
        }
        _ => format!("Your {} verification was rejected.", record.kind.as_str()),
    };
    if let Some(note) = note {
        if !note.trim().is_empty() {
            body.push_str(&format!(" Reviewer note: {}", note.trim()));
        }
    }
    body
}

/// Writes a fresh submission and its notification inside one transaction
async fn store_submission(
    tx: &mut dyn TxScope,
    record: &VerificationRecord,
    notification: &Notification,
) -> DomainResult<()> {
    tx.replace_verification_record(record).await?;
    tx.insert_notification(notification).await?;
    Ok(())
}

/// Writes a review outcome and its notification inside one transaction
async fn store_review(
    tx: &mut dyn TxScope,
    record: &VerificationRecord,
    owner: Option<&User>,
    notification: &Notification,
) -> DomainResult<()> {
    tx.update_verification_record(record).await?;
    if let Some(owner) = owner {
        tx.save_user(owner).await?;
    }
    tx.insert_notification(notification).await?;
    Ok(())
}
