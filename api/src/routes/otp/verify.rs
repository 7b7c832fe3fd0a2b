//! Code verification endpoint handler.

use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::app::AppState;
use crate::dto::otp::{VerifyCodeRequest, VerifyCodeResponse};
use crate::handlers::error::{domain_error_response, validation_error_response};
use crate::middleware::auth::AuthContext;

use pt_core::domain::entities::one_time_code::OtpPurpose;
use pt_core::errors::{DomainError, ValidationError};
use pt_core::repositories::{
    NotificationRepository, OtpCodeRepository, SessionRepository, UnitOfWork, UserRepository,
    VerificationRecordRepository,
};
use pt_core::services::account::PasswordHasherTrait;
use pt_core::services::otp::{MailerTrait, RateLimiterTrait};
use pt_core::services::realtime::RealtimeNotifierTrait;
use pt_shared::types::response::ApiResponse;

/// Handler for POST /api/v1/otp/verify
///
/// Checks the submitted code against the user's live code for the given
/// purpose and applies the purpose-specific account effects: email
/// verification, two-factor session marking, or two-factor disablement.
/// The code is consumed whether or not effects apply; a second verify
/// with the same code fails.
///
/// # Responses
/// - 200 OK: code accepted, applied effects in `data`
/// - 400 Bad Request: code expired
/// - 404 Not Found: wrong code, wrong purpose, or already consumed
/// - 422 Unprocessable Entity: unknown purpose or malformed code
pub async fn verify<U, S, P, C, W, M, R, N, V, F>(
    state: web::Data<AppState<U, S, P, C, W, M, R, N, V, F>>,
    auth: AuthContext,
    request: web::Json<VerifyCodeRequest>,
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

    let purpose = match request.purpose.parse::<OtpPurpose>() {
        Ok(purpose) => purpose,
        Err(_) => {
            let error: DomainError = ValidationError::InvalidValue {
                field: "purpose".to_string(),
                value: request.purpose.clone(),
            }
            .into();
            return domain_error_response(&error);
        }
    };

    let mut user = auth.user;
    match state
        .otp_service
        .verify_code(&mut user, auth.session.id, &request.code, purpose)
        .await
    {
        Ok(result) => HttpResponse::Ok().json(ApiResponse::success_with_data(
            "Code verified successfully",
            VerifyCodeResponse::from_result(&result),
        )),
        Err(error) => domain_error_response(&error),
    }
}
