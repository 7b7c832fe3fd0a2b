//! Logout endpoint handler.

use actix_web::{web, HttpResponse};

use crate::app::AppState;
use crate::handlers::error::domain_error_response;
use crate::middleware::auth::AuthContext;

use pt_core::repositories::{
    NotificationRepository, OtpCodeRepository, SessionRepository, UnitOfWork, UserRepository,
    VerificationRecordRepository,
};
use pt_core::services::account::PasswordHasherTrait;
use pt_core::services::otp::{MailerTrait, RateLimiterTrait};
use pt_core::services::realtime::RealtimeNotifierTrait;
use pt_shared::types::response::ApiResponse;

/// Handler for POST /api/v1/auth/logout
///
/// Revokes the presented session. The bearer token stops working
/// immediately; logging out twice with the same token yields 401
/// because the session no longer resolves.
///
/// # Responses
/// - 200 OK: session revoked
/// - 401 Unauthorized: missing, invalid, or already revoked token
pub async fn logout<U, S, P, C, W, M, R, N, V, F>(
    state: web::Data<AppState<U, S, P, C, W, M, R, N, V, F>>,
    auth: AuthContext,
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
    match state.account_service.logout(&auth.token).await {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::<()>::success("Logged out successfully")),
        Err(error) => domain_error_response(&error),
    }
}
