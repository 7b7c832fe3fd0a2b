//! Login endpoint handler.

use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::app::AppState;
use crate::dto::auth::{LoginRequest, LoginResponse};
use crate::handlers::error::{domain_error_response, validation_error_response};

use pt_core::repositories::{
    NotificationRepository, OtpCodeRepository, SessionRepository, UnitOfWork, UserRepository,
    VerificationRecordRepository,
};
use pt_core::services::account::PasswordHasherTrait;
use pt_core::services::otp::{MailerTrait, RateLimiterTrait};
use pt_core::services::realtime::RealtimeNotifierTrait;
use pt_shared::types::response::ApiResponse;

/// Handler for POST /api/v1/auth/login
///
/// Verifies the credentials and opens a new session. The returned
/// bearer token is shown exactly once; the server stores only a hash.
/// When the account has two-factor enabled, `two_factor_required` is
/// true and the session stays restricted until a login code is
/// verified.
///
/// # Responses
/// - 200 OK: session opened, token in `data`
/// - 401 Unauthorized: unknown email or wrong password
/// - 422 Unprocessable Entity: malformed request body
pub async fn login<U, S, P, C, W, M, R, N, V, F>(
    state: web::Data<AppState<U, S, P, C, W, M, R, N, V, F>>,
    request: web::Json<LoginRequest>,
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

    match state
        .account_service
        .login(&request.email, &request.password)
        .await
    {
        Ok((user, session)) => HttpResponse::Ok().json(ApiResponse::success_with_data(
            "Login successful",
            LoginResponse::new(&user, session),
        )),
        Err(error) => domain_error_response(&error),
    }
}
