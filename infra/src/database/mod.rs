//! Database module - MySQL implementations using SQLx
//!
//! This module provides the database access layer:
//! - Connection pool management
//! - Repository implementations for every core repository trait
//! - The transactional unit of work wrapping `sqlx::Transaction`

pub mod connection;
pub mod mysql;

// Re-export commonly used types
pub use connection::DatabasePool;
pub use mysql::{
    MySqlNotificationRepository, MySqlOtpCodeRepository, MySqlSessionRepository,
    MySqlUnitOfWork, MySqlUserRepository, MySqlVerificationRecordRepository,
};
