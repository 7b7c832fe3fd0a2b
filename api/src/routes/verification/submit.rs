//! Verification submission endpoint handler.

use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::app::AppState;
use crate::dto::verification::{SubmitVerificationRequest, VerificationRecordResponse};
use crate::handlers::error::{domain_error_response, validation_error_response};
use crate::middleware::auth::AuthContext;

use pt_core::repositories::{
    NotificationRepository, OtpCodeRepository, SessionRepository, UnitOfWork, UserRepository,
    VerificationRecordRepository,
};
use pt_core::services::account::PasswordHasherTrait;
use pt_core::services::kyc::SubmitOutcome;
use pt_core::services::otp::{MailerTrait, RateLimiterTrait};
use pt_core::services::realtime::RealtimeNotifierTrait;
use pt_shared::types::response::ApiResponse;

/// Handler for POST /api/v1/verification/submit
///
/// Creates a pending verification record for the caller. Requires a
/// verified email. A user holds at most one active record: submitting
/// over a verified or pending record is a no-op, while a rejected
/// record is replaced by the fresh submission.
///
/// # Responses
/// - 201 Created: pending record created
/// - 200 OK: already verified or already pending, nothing created
/// - 403 Forbidden: email not verified yet
/// - 422 Unprocessable Entity: unknown kind/document type, missing
///   identity fields
pub async fn submit<U, S, P, C, W, M, R, N, V, F>(
    state: web::Data<AppState<U, S, P, C, W, M, R, N, V, F>>,
    auth: AuthContext,
    request: web::Json<SubmitVerificationRequest>,
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

    let submission = match request.into_inner().into_submission() {
        Ok(submission) => submission,
        Err(error) => return domain_error_response(&error),
    };

    match state.kyc_service.submit(&auth.user, submission).await {
        Ok(SubmitOutcome::Created(record)) => HttpResponse::Created().json(
            ApiResponse::success_with_data(
                "Verification submitted and pending review",
                VerificationRecordResponse::from_record(&record),
            ),
        ),
        Ok(SubmitOutcome::AlreadyVerified) => HttpResponse::Ok().json(ApiResponse::<()>::success(
            "Your account is already verified",
        )),
        Ok(SubmitOutcome::AlreadyPending) => HttpResponse::Ok().json(ApiResponse::<()>::success(
            "Your verification is already under review",
        )),
        Err(error) => domain_error_response(&error),
    }
}
