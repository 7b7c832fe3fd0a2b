//! Traits for mail delivery and rate limiting integration

use async_trait::async_trait;

/// Trait for outbound mail integration
#[async_trait]
pub trait MailerTrait: Send + Sync {
    /// Send an email, returning the provider message id
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<String, String>;
}

/// Trait for rate limiting code issuance
#[async_trait]
pub trait RateLimiterTrait: Send + Sync {
    /// Check if the (identifier, origin) pair has exceeded its limit
    async fn is_rate_limited(&self, identifier: &str, origin: &str) -> Result<bool, String>;

    /// Increment the counter for the (identifier, origin) pair
    async fn record_attempt(&self, identifier: &str, origin: &str) -> Result<i64, String>;

    /// Get the remaining time until the limit resets (in seconds)
    async fn reset_in_seconds(&self, identifier: &str, origin: &str)
        -> Result<Option<i64>, String>;
}
