//! DTOs for the notification feed endpoints.

use serde::{Deserialize, Serialize};

use pt_core::domain::value_objects::NotificationFeedItem;

/// Response payload for GET /api/v1/notifications
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationListResponse {
    /// Feed items, newest first
    pub notifications: Vec<NotificationFeedItem>,
    /// Number of unread items in the feed
    pub unread_count: usize,
}

impl NotificationListResponse {
    pub fn new(notifications: Vec<NotificationFeedItem>) -> Self {
        let unread_count = notifications.iter().filter(|item| !item.is_read).count();
        Self {
            notifications,
            unread_count,
        }
    }
}
