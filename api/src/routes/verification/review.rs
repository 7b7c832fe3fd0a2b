//! Verification review endpoint handler (admin only).

use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::dto::verification::{ReviewRequest, VerificationRecordResponse};
use crate::handlers::error::{domain_error_response, validation_error_response};
use crate::middleware::auth::AuthContext;

use pt_core::errors::{DomainError, ValidationError};
use pt_core::repositories::{
    NotificationRepository, OtpCodeRepository, SessionRepository, UnitOfWork, UserRepository,
    VerificationRecordRepository,
};
use pt_core::services::account::PasswordHasherTrait;
use pt_core::services::kyc::ReviewDecision;
use pt_core::services::otp::{MailerTrait, RateLimiterTrait};
use pt_core::services::realtime::RealtimeNotifierTrait;
use pt_shared::types::response::ApiResponse;

/// Handler for POST /api/v1/verification/{id}/review
///
/// Applies an admin decision to a pending record. Approval marks the
/// submitter's identity check passed and may promote their trust level;
/// rejection stores the reviewer note so the user can fix and resubmit.
/// Reviewing an already-reviewed record is a conflict.
///
/// # Responses
/// - 200 OK: decision applied, updated record in `data`
/// - 403 Forbidden: caller is not an admin
/// - 404 Not Found: no record with that id
/// - 409 Conflict: record already reviewed
/// - 422 Unprocessable Entity: unknown decision value
pub async fn review<U, S, P, C, W, M, R, N, V, F>(
    state: web::Data<AppState<U, S, P, C, W, M, R, N, V, F>>,
    auth: AuthContext,
    path: web::Path<Uuid>,
    request: web::Json<ReviewRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    S: SessionRepository + 'static,
    P: PasswordHasherTrait + 'static,
    C: OtpCodeRepository + 'static,
    W: UnitOfWork + 'static,
    M: MailerTrait + 'static,
    R: RateLimiterTrait + 'static,
    N: RealtimeNotifierTrait + 'static,
    V: VerificationRecordRepository + 'static,
    F: NotificationRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    let decision = match request.decision.as_str() {
        "verified" => ReviewDecision::Approve,
        "reject" => ReviewDecision::Reject,
        other => {
            let error: DomainError = ValidationError::InvalidValue {
                field: "decision".to_string(),
                value: other.to_string(),
            }
            .into();
            return domain_error_response(&error);
        }
    };

    match state
        .kyc_service
        .review(&auth.user, path.into_inner(), decision, request.note.as_deref())
        .await
    {
        Ok(record) => HttpResponse::Ok().json(ApiResponse::success_with_data(
            "Verification record reviewed",
            VerificationRecordResponse::from_record(&record),
        )),
        Err(error) => domain_error_response(&error),
    }
}
