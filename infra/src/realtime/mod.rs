//! Realtime notification module
//!
//! Redis pub/sub backing for the core realtime notifier trait.

pub mod redis_notifier;

pub use redis_notifier::RedisRealtimeNotifier;
