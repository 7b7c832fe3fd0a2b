//! Application factory and shared state.
//!
//! `create_app` assembles the Actix application from injected service
//! instances: middleware stack, route table, and the envelope handlers
//! for malformed input and unmatched paths.

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::error::InternalError;
use actix_web::middleware::Logger;
use actix_web::{web, App, Error, HttpResponse};
use chrono::Utc;
use std::sync::Arc;

use crate::middleware::{create_cors, SecurityMiddleware, SessionAuth, SessionAuthenticator};
use crate::routes;

use pt_core::repositories::{
    NotificationRepository, OtpCodeRepository, SessionRepository, UnitOfWork, UserRepository,
    VerificationRecordRepository,
};
use pt_core::services::account::{AccountService, PasswordHasherTrait};
use pt_core::services::kyc::KycService;
use pt_core::services::notification::NotificationService;
use pt_core::services::otp::{MailerTrait, OtpService, RateLimiterTrait};
use pt_core::services::realtime::RealtimeNotifierTrait;
use pt_shared::types::response::{ApiResponse, HealthResponse, HealthStatus};

/// Shared application state holding the domain services.
///
/// The services stay generic over their repository and gateway traits so
/// the same factory serves the production wiring and the in-memory
/// doubles used by the integration tests.
pub struct AppState<U, S, P, C, W, M, R, N, V, F>
where
    U: UserRepository,
    S: SessionRepository,
    P: PasswordHasherTrait,
    C: OtpCodeRepository,
    W: UnitOfWork,
    M: MailerTrait,
    R: RateLimiterTrait,
    N: RealtimeNotifierTrait,
    V: VerificationRecordRepository,
    F: NotificationRepository,
{
    pub account_service: Arc<AccountService<U, S, P>>,
    pub otp_service: Arc<OtpService<C, W, M, R, N>>,
    pub kyc_service: Arc<KycService<V, U, W, N>>,
    pub notification_service: Arc<NotificationService<F>>,
}

/// Create and configure the application with all dependencies.
///
/// Middleware order matters: security headers run first, then CORS,
/// then request logging. Bearer authentication is applied per scope so
/// the open endpoints (health, register, login) skip it entirely.
pub fn create_app<U, S, P, C, W, M, R, N, V, F>(
    app_state: web::Data<AppState<U, S, P, C, W, M, R, N, V, F>>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
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
    // The session middleware resolves bearer tokens through dynamic
    // dispatch because it cannot name the concrete service generics.
    let authenticator: Arc<dyn SessionAuthenticator> = app_state.account_service.clone();

    let cors = create_cors();
    let security = SecurityMiddleware::new();

    App::new()
        .app_data(app_state)
        .app_data(web::Data::new(authenticator))
        // Malformed JSON bodies and path parameters get the standard
        // envelope instead of the Actix plain-text default.
        .app_data(web::JsonConfig::default().error_handler(|err, _req| {
            let response = HttpResponse::BadRequest().json(ApiResponse::<()>::error(format!(
                "Invalid request body: {}",
                err
            )));
            InternalError::from_response(err, response).into()
        }))
        .app_data(web::PathConfig::default().error_handler(|err, _req| {
            let response =
                HttpResponse::BadRequest().json(ApiResponse::<()>::error("Invalid path parameter"));
            InternalError::from_response(err, response).into()
        }))
        .wrap(Logger::default())
        .wrap(cors)
        .wrap(security)
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/auth")
                        .route(
                            "/register",
                            web::post().to(routes::auth::register::<U, S, P, C, W, M, R, N, V, F>),
                        )
                        .route(
                            "/login",
                            web::post().to(routes::auth::login::<U, S, P, C, W, M, R, N, V, F>),
                        )
                        .route(
                            "/logout",
                            web::post()
                                .to(routes::auth::logout::<U, S, P, C, W, M, R, N, V, F>)
                                .wrap(SessionAuth::new()),
                        ),
                )
                .service(
                    web::scope("/otp")
                        .wrap(SessionAuth::new())
                        .route(
                            "/send",
                            web::post().to(routes::otp::send::<U, S, P, C, W, M, R, N, V, F>),
                        )
                        .route(
                            "/verify",
                            web::post().to(routes::otp::verify::<U, S, P, C, W, M, R, N, V, F>),
                        ),
                )
                .service(
                    web::scope("/verification")
                        .wrap(SessionAuth::new())
                        .route(
                            "/submit",
                            web::post()
                                .to(routes::verification::submit::<U, S, P, C, W, M, R, N, V, F>),
                        )
                        .route(
                            "/{id}/review",
                            web::post()
                                .to(routes::verification::review::<U, S, P, C, W, M, R, N, V, F>),
                        ),
                )
                .service(
                    web::scope("/notifications")
                        .wrap(SessionAuth::new())
                        .route(
                            "",
                            web::get()
                                .to(routes::notifications::list::<U, S, P, C, W, M, R, N, V, F>),
                        )
                        .route(
                            "/{id}/read",
                            web::post()
                                .to(routes::notifications::mark_read::<U, S, P, C, W, M, R, N, V, F>),
                        ),
                ),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler.
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success_with_data(
        "Service is healthy",
        HealthResponse {
            status: HealthStatus::Healthy,
            service: "peertrade-api".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    ))
}

/// Default 404 handler.
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::<()>::error(
        "The requested resource was not found",
    ))
}
