//! Notification entities for the in-app feed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// In-app notification, either targeted at one user or global
///
/// A global notification has no `user_id` and is visible to every user.
/// Read state for targeted notifications lives in `read_at`; global
/// notifications track per-user reads through [`NotificationRead`]
/// markers instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Unique identifier for the notification
    pub id: Uuid,

    /// Target user, or `None` for a global announcement
    pub user_id: Option<Uuid>,

    /// Short headline shown in the feed
    pub title: String,

    /// Message body
    pub body: String,

    /// When the target user read it; always `None` for global rows
    pub read_at: Option<DateTime<Utc>>,

    /// Timestamp when the notification was created
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Creates a notification targeted at a single user
    pub fn for_user(user_id: Uuid, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: Some(user_id),
            title: title.into(),
            body: body.into(),
            read_at: None,
            created_at: Utc::now(),
        }
    }

    /// Creates a global notification visible to all users
    pub fn global(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: None,
            title: title.into(),
            body: body.into(),
            read_at: None,
            created_at: Utc::now(),
        }
    }

    /// Checks if this is a global announcement
    pub fn is_global(&self) -> bool {
        self.user_id.is_none()
    }

    /// Marks a targeted notification as read
    pub fn mark_read(&mut self) {
        if self.read_at.is_none() {
            self.read_at = Some(Utc::now());
        }
    }
}

/// Per-user read marker for a global notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRead {
    /// Unique identifier for the marker
    pub id: Uuid,

    /// The global notification that was read
    pub notification_id: Uuid,

    /// The user who read it
    pub user_id: Uuid,

    /// When it was read
    pub read_at: DateTime<Utc>,
}

impl NotificationRead {
    /// Creates a read marker for a user and a global notification
    pub fn new(notification_id: Uuid, user_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            notification_id,
            user_id,
            read_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_notification_is_not_global() {
        let note = Notification::for_user(Uuid::new_v4(), "Email verified", "Your email is verified.");

        assert!(!note.is_global());
        assert!(note.read_at.is_none());
    }

    #[test]
    fn test_global_notification_has_no_target() {
        let note = Notification::global("Maintenance", "Scheduled downtime at 02:00 UTC.");

        assert!(note.is_global());
        assert_eq!(note.user_id, None);
    }

    #[test]
    fn test_mark_read_sets_timestamp_once() {
        let mut note = Notification::for_user(Uuid::new_v4(), "Hi", "There");
        note.mark_read();
        let first = note.read_at;
        note.mark_read();

        assert!(first.is_some());
        assert_eq!(note.read_at, first);
    }
}
