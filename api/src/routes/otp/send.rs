//! Code issuance endpoint handler.

use actix_web::{web, HttpRequest, HttpResponse};
use chrono::Utc;
use validator::Validate;

use crate::app::AppState;
use crate::dto::otp::{SendCodeRequest, SendCodeResponse};
use crate::handlers::error::{domain_error_response, validation_error_response};
use crate::middleware::auth::AuthContext;

use pt_core::domain::entities::one_time_code::OtpPurpose;
use pt_core::errors::{DomainError, ValidationError};
use pt_core::repositories::{
    NotificationRepository, OtpCodeRepository, SessionRepository, UnitOfWork, UserRepository,
    VerificationRecordRepository,
};
use pt_core::services::account::PasswordHasherTrait;
use pt_core::services::otp::{MailerTrait, RateLimiterTrait, SendCodeResult};
use pt_core::services::realtime::RealtimeNotifierTrait;
use pt_shared::types::response::ApiResponse;

/// Handler for POST /api/v1/otp/send
///
/// Issues a fresh 6-digit code for the given purpose and emails it to
/// the authenticated user. Issuing again replaces any earlier live code
/// for the same user. Sending for `email_verification` when the email
/// is already verified is a successful no-op.
///
/// # Request Body
///
/// ```json
/// {
///     "purpose": "two_fa",
///     "operation_type": "buy"
/// }
/// ```
///
/// # Responses
/// - 200 OK: code dispatched (or already verified no-op)
/// - 400 Bad Request: missing or invalid `operation_type` for `two_fa`
/// - 422 Unprocessable Entity: unknown purpose
/// - 429 Too Many Requests: resend cooldown or hourly cap hit
pub async fn send<U, S, P, C, W, M, R, N, V, F>(
    req: HttpRequest,
    state: web::Data<AppState<U, S, P, C, W, M, R, N, V, F>>,
    auth: AuthContext,
    request: web::Json<SendCodeRequest>,
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

    let origin = extract_client_origin(&req);

    match state
        .otp_service
        .send_code(&auth.user, purpose, request.operation_type.as_deref(), &origin)
        .await
    {
        Ok(SendCodeResult::Sent {
            message_id,
            expires_at,
            next_resend_at,
        }) => {
            let resend_after = (next_resend_at - Utc::now()).num_seconds().max(0);
            HttpResponse::Ok().json(ApiResponse::success_with_data(
                "Verification code sent successfully. Please check your email.",
                SendCodeResponse {
                    message_id,
                    expires_at,
                    resend_after,
                },
            ))
        }
        Ok(SendCodeResult::AlreadyVerified) => {
            HttpResponse::Ok().json(ApiResponse::<()>::success("Email is already verified"))
        }
        Err(error) => domain_error_response(&error),
    }
}

/// Extracts the client origin used for rate limiting
///
/// Proxied deployments carry the originating client in the first
/// X-Forwarded-For entry.
fn extract_client_origin(req: &HttpRequest) -> String {
    if let Some(forwarded_for) = req.headers().get("X-Forwarded-For") {
        if let Ok(forwarded_str) = forwarded_for.to_str() {
            if let Some(ip) = forwarded_str.split(',').next() {
                let ip = ip.trim();
                if !ip.is_empty() {
                    return ip.to_string();
                }
            }
        }
    }

    if let Some(real_ip) = req.headers().get("X-Real-IP") {
        if let Ok(ip_str) = real_ip.to_str() {
            return ip_str.to_string();
        }
    }

    req.connection_info()
        .peer_addr()
        .unwrap_or("unknown")
        .to_string()
}
