//! Notification mark-read endpoint handler.

use actix_web::{web, HttpResponse};
use uuid::Uuid;

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

/// Handler for POST /api/v1/notifications/{id}/read
///
/// Marks one notification read for the caller. Targeted rows record a
/// read timestamp; global announcements get a per-user read marker.
/// Marking twice is idempotent. Another user's targeted notification is
/// reported as not found rather than forbidden.
///
/// # Responses
/// - 200 OK: marked read (or already read)
/// - 404 Not Found: unknown id or another user's notification
pub async fn mark_read<U, S, P, C, W, M, R, N, V, F>(
    state: web::Data<AppState<U, S, P, C, W, M, R, N, V, F>>,
    auth: AuthContext,
    path: web::Path<Uuid>,
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
    match state
        .notification_service
        .mark_read(auth.user.id, path.into_inner())
        .await
    {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::<()>::success("Notification marked as read")),
        Err(error) => domain_error_response(&error),
    }
}
