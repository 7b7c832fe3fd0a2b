//! Cache module for Redis-backed infrastructure
//!
//! Provides the shared Redis client used by the rate limiter and the
//! realtime notifier, including connection retry logic.

pub mod redis_client;

pub use redis_client::RedisClient;

// Re-export commonly used types
pub use pt_shared::config::cache::CacheConfig;
