//! Redis-based sliding-window rate limiter for code issuance

use async_trait::async_trait;
use chrono::Utc;
use redis::AsyncCommands;
use std::sync::Arc;

use pt_core::services::otp::RateLimiterTrait;
use pt_shared::config::rate_limit::RateLimitConfig;

use crate::cache::redis_client::RedisClient;

/// Redis-backed implementation of the issuance rate limiter
///
/// Attempts are tracked in two sorted sets scored by timestamp, one per
/// user identifier and one per client origin. An issuance is limited
/// when either window is full.
pub struct RedisRateLimiter {
    redis_client: Arc<RedisClient>,
    config: RateLimitConfig,
}

impl RedisRateLimiter {
    /// Create a new Redis-based rate limiter
    pub fn new(redis_client: Arc<RedisClient>, config: RateLimitConfig) -> Self {
        Self {
            redis_client,
            config,
        }
    }

    fn user_key(identifier: &str) -> String {
        format!("rate_limit:otp:user:{}", identifier)
    }

    fn origin_key(origin: &str) -> String {
        format!("rate_limit:otp:origin:{}", origin)
    }

    /// Count attempts inside the current window, trimming expired ones
    async fn window_count(&self, key: &str) -> Result<u32, String> {
        let mut conn = self.redis_client.get_connection();

        let now = Utc::now().timestamp_millis();
        let window_start = now - (self.config.window_seconds() as i64 * 1000);

        // Drop entries that slid out of the window
        let _: redis::RedisResult<i64> = redis::cmd("ZREMRANGEBYSCORE")
            .arg(key)
            .arg("-inf")
            .arg(window_start)
            .query_async(&mut conn)
            .await;

        conn.zcount(key, window_start, "+inf")
            .await
            .map_err(|e| format!("Failed to count rate limit window: {}", e))
    }

    /// Record one attempt in a window and return the new count
    async fn push_attempt(&self, key: &str) -> Result<i64, String> {
        let mut conn = self.redis_client.get_connection();

        let now = Utc::now().timestamp_millis();
        let window_start = now - (self.config.window_seconds() as i64 * 1000);

        let _: i64 = redis::cmd("ZADD")
            .arg(key)
            .arg(now)
            .arg(now.to_string())
            .query_async(&mut conn)
            .await
            .map_err(|e| format!("Failed to record attempt: {}", e))?;

        let _: i64 = redis::cmd("EXPIRE")
            .arg(key)
            .arg(self.config.window_seconds())
            .query_async(&mut conn)
            .await
            .map_err(|e| format!("Failed to set expiry: {}", e))?;

        conn.zcount(key, window_start, "+inf")
            .await
            .map_err(|e| format!("Failed to count attempts: {}", e))
    }

    /// Seconds until the oldest attempt in a window slides out
    async fn window_reset(&self, key: &str) -> Result<Option<i64>, String> {
        let mut conn = self.redis_client.get_connection();

        let now = Utc::now().timestamp_millis();
        let window_ms = self.config.window_seconds() as i64 * 1000;
        let window_start = now - window_ms;

        let oldest: Vec<(String, i64)> = conn
            .zrangebyscore_limit_withscores(key, window_start, "+inf", 0, 1)
            .await
            .map_err(|e| format!("Failed to read rate limit window: {}", e))?;

        Ok(oldest
            .first()
            .map(|(_, timestamp)| ((timestamp + window_ms - now) / 1000).max(0)))
    }
}

#[async_trait]
impl RateLimiterTrait for RedisRateLimiter {
    async fn is_rate_limited(&self, identifier: &str, origin: &str) -> Result<bool, String> {
        if !self.config.enabled {
            return Ok(false);
        }

        let user_count = self.window_count(&Self::user_key(identifier)).await?;
        if user_count >= self.config.otp.per_user_per_hour {
            return Ok(true);
        }

        let origin_count = self.window_count(&Self::origin_key(origin)).await?;
        Ok(origin_count >= self.config.otp.per_origin_per_hour)
    }

    async fn record_attempt(&self, identifier: &str, origin: &str) -> Result<i64, String> {
        if !self.config.enabled {
            return Ok(0);
        }

        let count = self.push_attempt(&Self::user_key(identifier)).await?;
        self.push_attempt(&Self::origin_key(origin)).await?;

        Ok(count)
    }

    async fn reset_in_seconds(
        &self,
        identifier: &str,
        origin: &str,
    ) -> Result<Option<i64>, String> {
        let user_reset = self.window_reset(&Self::user_key(identifier)).await?;
        let origin_reset = self.window_reset(&Self::origin_key(origin)).await?;

        // The longer wait is the one that unblocks both windows
        Ok(match (user_reset, origin_reset) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (Some(a), None) => Some(a),
            (None, Some(b)) => Some(b),
            (None, None) => None,
        })
    }
}
