//! Notification feed item value object for the listing endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::notification::Notification;

/// A notification as presented in a user's feed
///
/// Merges targeted and global notifications into one shape; `is_read`
/// is computed from `read_at` for targeted rows and from the per-user
/// read marker for global rows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationFeedItem {
    /// Identifier of the underlying notification
    pub id: Uuid,

    /// Short headline
    pub title: String,

    /// Message body
    pub body: String,

    /// Whether this is a global announcement
    pub is_global: bool,

    /// Whether the requesting user has read it
    pub is_read: bool,

    /// When the notification was created
    pub created_at: DateTime<Utc>,
}

impl NotificationFeedItem {
    /// Builds a feed item from a notification and the resolved read state
    ///
    /// # Arguments
    ///
    /// * `notification` - The stored notification
    /// * `is_read` - Read state for the requesting user
    pub fn from_notification(notification: &Notification, is_read: bool) -> Self {
        Self {
            id: notification.id,
            title: notification.title.clone(),
            body: notification.body.clone(),
            is_global: notification.is_global(),
            is_read,
            created_at: notification.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_item_from_targeted_notification() {
        let user_id = Uuid::new_v4();
        let mut note = Notification::for_user(user_id, "Email verified", "Done.");
        note.mark_read();

        let item = NotificationFeedItem::from_notification(&note, note.read_at.is_some());

        assert_eq!(item.id, note.id);
        assert!(!item.is_global);
        assert!(item.is_read);
    }

    #[test]
    fn test_feed_item_from_global_notification() {
        let note = Notification::global("Maintenance", "Downtime tonight.");

        let item = NotificationFeedItem::from_notification(&note, false);

        assert!(item.is_global);
        assert!(!item.is_read);
    }
}
