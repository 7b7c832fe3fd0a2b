//! PeerTrade API server binary.
//!
//! Wires the MySQL repositories, Redis-backed services, and mail
//! gateway into the domain services, then serves the REST surface.

use actix_web::{web, HttpServer};
use dotenvy::dotenv;
use log::info;
use std::sync::Arc;

use pt_api::app::{create_app, AppState};
use pt_core::services::account::{AccountService, AccountServiceConfig};
use pt_core::services::kyc::KycService;
use pt_core::services::notification::NotificationService;
use pt_core::services::otp::{OtpService, OtpServiceConfig};
use pt_infra::database::mysql::{
    MySqlNotificationRepository, MySqlOtpCodeRepository, MySqlSessionRepository, MySqlUnitOfWork,
    MySqlUserRepository, MySqlVerificationRecordRepository,
};
use pt_infra::{
    create_mailer, BcryptPasswordHasher, DatabasePool, RedisClient, RedisRateLimiter,
    RedisRealtimeNotifier,
};
use pt_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting PeerTrade API server");

    let config = AppConfig::from_env();

    let database = DatabasePool::new(&config.database).await?;
    let redis_client = Arc::new(RedisClient::new(&config.cache).await?);

    let pool = database.get_pool().clone();
    let user_repository = Arc::new(MySqlUserRepository::new(pool.clone()));
    let session_repository = Arc::new(MySqlSessionRepository::new(pool.clone()));
    let code_repository = Arc::new(MySqlOtpCodeRepository::new(pool.clone()));
    let record_repository = Arc::new(MySqlVerificationRecordRepository::new(pool.clone()));
    let notification_repository = Arc::new(MySqlNotificationRepository::new(pool.clone()));
    let unit_of_work = Arc::new(MySqlUnitOfWork::new(pool));

    let mailer = Arc::new(create_mailer(&config.mail));
    let rate_limiter = Arc::new(RedisRateLimiter::new(
        redis_client.clone(),
        config.rate_limit.clone(),
    ));
    let notifier = Arc::new(RedisRealtimeNotifier::new(redis_client));

    let account_service = Arc::new(AccountService::new(
        user_repository.clone(),
        session_repository,
        Arc::new(BcryptPasswordHasher::new()),
        AccountServiceConfig::default(),
    ));
    let otp_service = Arc::new(OtpService::new(
        code_repository,
        unit_of_work.clone(),
        mailer,
        rate_limiter,
        notifier.clone(),
        OtpServiceConfig::default(),
    ));
    let kyc_service = Arc::new(KycService::new(
        record_repository,
        user_repository,
        unit_of_work,
        notifier,
    ));
    let notification_service = Arc::new(NotificationService::new(notification_repository));

    let app_state = web::Data::new(AppState {
        account_service,
        otp_service,
        kyc_service,
        notification_service,
    });

    let bind_address = config.server.bind_address();
    let workers = config.server.workers;
    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || create_app(app_state.clone()));
    if workers > 0 {
        server = server.workers(workers);
    }

    server.bind(&bind_address)?.run().await?;

    Ok(())
}
