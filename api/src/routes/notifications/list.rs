//! Notification feed listing endpoint handler.

use actix_web::{web, HttpResponse};

use crate::app::AppState;
use crate::dto::notification::NotificationListResponse;
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

/// Handler for GET /api/v1/notifications
///
/// Returns the caller's feed: targeted notifications plus global
/// announcements, newest first, with per-user read state resolved.
///
/// # Responses
/// - 200 OK: feed in `data` with an unread count
pub async fn list<U, S, P, C, W, M, R, N, V, F>(
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
    match state.notification_service.list(auth.user.id).await {
        Ok(items) => HttpResponse::Ok().json(ApiResponse::success_with_data(
            "Notifications retrieved",
            NotificationListResponse::new(items),
        )),
        Err(error) => domain_error_response(&error),
    }
}
