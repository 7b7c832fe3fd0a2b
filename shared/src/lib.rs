//! Shared utilities and common types for the PeerTrade server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Response envelope structures
//! - Utility functions (email/password validation, etc.)
//! - Common type definitions

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, Environment,
    DatabaseConfig, CacheConfig, MailConfig, RateLimitConfig,
    ServerConfig, CorsConfig, LoggingConfig,
};
pub use types::ApiResponse;
pub use utils::validation;
