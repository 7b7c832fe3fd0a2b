//! Registration endpoint handler.

use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::app::AppState;
use crate::dto::auth::{RegisterRequest, UserResponse};
use crate::handlers::error::{domain_error_response, validation_error_response};

use pt_core::repositories::{
    NotificationRepository, OtpCodeRepository, SessionRepository, UnitOfWork, UserRepository,
    VerificationRecordRepository,
};
use pt_core::services::account::PasswordHasherTrait;
use pt_core::services::otp::{MailerTrait, RateLimiterTrait};
use pt_core::services::realtime::RealtimeNotifierTrait;
use pt_shared::types::response::ApiResponse;

/// Handler for POST /api/v1/auth/register
///
/// Creates a new account from an email, password, and display name. The
/// account starts unverified with basic trust.
///
/// # Request Body
///
/// ```json
/// {
///     "email": "trader@example.com",
///     "password": "correct-horse-battery",
///     "display_name": "Trader"
/// }
/// ```
///
/// # Responses
/// - 201 Created: account created, user summary in `data`
/// - 409 Conflict: email already registered
/// - 422 Unprocessable Entity: malformed email, short password, or
///   empty display name
pub async fn register<U, S, P, C, W, M, R, N, V, F>(
    state: web::Data<AppState<U, S, P, C, W, M, R, N, V, F>>,
    request: web::Json<RegisterRequest>,
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
        .register(&request.email, &request.password, &request.display_name)
        .await
    {
        Ok(user) => HttpResponse::Created().json(ApiResponse::success_with_data(
            "Account registered successfully",
            UserResponse::from_user(&user),
        )),
        Err(error) => domain_error_response(&error),
    }
}
