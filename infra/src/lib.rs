//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the PeerTrade backend,
//! following Clean Architecture principles. It provides concrete implementations
//! for database access, caching, outbound mail, and realtime publishing.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Database**: MySQL repositories and the transactional unit of work, using SQLx
//! - **Cache**: Redis client used for rate limiting
//! - **Mail**: Outbound mail over an HTTP provider API, plus a console mock
//! - **Realtime**: Redis pub/sub publisher for user notification topics
//! - **Services**: Rate limiter and password hasher implementations
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)
//! - `redis-cache`: Enable Redis support (default)
//! - `mock-services`: Enable mock implementations for testing

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Cache module - Redis client and operations
pub mod cache;

/// Mail module - Outbound mail providers
pub mod mail;

/// Realtime module - Redis pub/sub publisher
pub mod realtime;

/// Services module - Infrastructure service implementations
pub mod services;

#[cfg(feature = "mysql")]
pub use database::DatabasePool;

pub use cache::RedisClient;
pub use mail::{create_mailer, MailerService};
pub use realtime::RedisRealtimeNotifier;
pub use services::{BcryptPasswordHasher, RedisRateLimiter};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Mail delivery error
    #[error("Mail error: {0}")]
    Mail(String),

    /// General infrastructure error
    #[error("Infrastructure error: {0}")]
    General(String),
}
