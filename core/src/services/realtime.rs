//! Real-time notification collaborator.
//!
//! Flows that want to push a payload to a connected client publish
//! through this trait. Publishing is fire-and-forget: failures are
//! logged by callers and never fail the surrounding operation.

use async_trait::async_trait;

/// Trait for real-time publish integration
#[async_trait]
pub trait RealtimeNotifierTrait: Send + Sync {
    /// Publish a payload to a topic
    ///
    /// # Arguments
    /// * `topic` - Channel name, e.g. `user:{id}:notifications`
    /// * `payload` - JSON payload delivered to subscribers
    async fn publish(&self, topic: &str, payload: serde_json::Value) -> Result<(), String>;
}

/// No-op implementation of RealtimeNotifierTrait
///
/// Used when no real-time backend is wired, e.g. in development
/// without Redis.
pub struct NoopRealtimeNotifier;

impl NoopRealtimeNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoopRealtimeNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RealtimeNotifierTrait for NoopRealtimeNotifier {
    async fn publish(&self, _topic: &str, _payload: serde_json::Value) -> Result<(), String> {
        Ok(())
    }
}
