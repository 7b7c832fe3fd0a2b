//! Redis pub/sub notifier implementation

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use pt_core::services::realtime::RealtimeNotifierTrait;

use crate::cache::redis_client::RedisClient;

/// Realtime notifier publishing over Redis pub/sub
///
/// Topics map directly onto Redis channels; the websocket delivery edge
/// subscribes to them elsewhere. Publishing to a channel with no
/// subscribers is a successful no-op.
pub struct RedisRealtimeNotifier {
    redis_client: Arc<RedisClient>,
}

impl RedisRealtimeNotifier {
    /// Create a new Redis-backed notifier
    pub fn new(redis_client: Arc<RedisClient>) -> Self {
        Self { redis_client }
    }
}

#[async_trait]
impl RealtimeNotifierTrait for RedisRealtimeNotifier {
    async fn publish(&self, topic: &str, payload: serde_json::Value) -> Result<(), String> {
        let mut conn = self.redis_client.get_connection();

        let receivers: i64 = redis::cmd("PUBLISH")
            .arg(topic)
            .arg(payload.to_string())
            .query_async(&mut conn)
            .await
            .map_err(|e| format!("Failed to publish to {}: {}", topic, e))?;

        debug!(
            topic = %topic,
            receivers = receivers,
            "Published realtime payload"
        );

        Ok(())
    }
}
