//! Mock implementation of NotificationRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::notification::{Notification, NotificationRead};
use crate::errors::DomainError;

use super::r#trait::NotificationRepository;

/// Mock notification repository for testing
pub struct MockNotificationRepository {
    pub notifications: Arc<RwLock<HashMap<Uuid, Notification>>>,
    pub read_markers: Arc<RwLock<Vec<NotificationRead>>>,
}

impl MockNotificationRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            notifications: Arc::new(RwLock::new(HashMap::new())),
            read_markers: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Create a mock seeded with the given notifications
    pub fn with_notifications(notifications: Vec<Notification>) -> Self {
        let map = notifications.into_iter().map(|n| (n.id, n)).collect();
        Self {
            notifications: Arc::new(RwLock::new(map)),
            read_markers: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl Default for MockNotificationRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationRepository for MockNotificationRepository {
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Notification>, DomainError> {
        let notifications = self.notifications.read().await;
        let mut visible: Vec<Notification> = notifications
            .values()
            .filter(|n| n.user_id == Some(user_id) || n.is_global())
            .cloned()
            .collect();
        visible.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(visible)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Notification>, DomainError> {
        let notifications = self.notifications.read().await;
        Ok(notifications.get(&id).cloned())
    }

    async fn insert(&self, notification: Notification) -> Result<Notification, DomainError> {
        let mut notifications = self.notifications.write().await;
        notifications.insert(notification.id, notification.clone());
        Ok(notification)
    }

    async fn mark_read(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut notifications = self.notifications.write().await;

        if let Some(notification) = notifications.get_mut(&id) {
            notification.mark_read();
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn insert_read_marker(&self, marker: NotificationRead) -> Result<(), DomainError> {
        let mut markers = self.read_markers.write().await;

        let already_present = markers
            .iter()
            .any(|m| m.notification_id == marker.notification_id && m.user_id == marker.user_id);
        if !already_present {
            markers.push(marker);
        }
        Ok(())
    }

    async fn list_read_marker_ids(&self, user_id: Uuid) -> Result<Vec<Uuid>, DomainError> {
        let markers = self.read_markers.read().await;
        Ok(markers
            .iter()
            .filter(|m| m.user_id == user_id)
            .map(|m| m.notification_id)
            .collect())
    }
}
