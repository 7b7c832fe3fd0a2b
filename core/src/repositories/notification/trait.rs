//! Notification repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::notification::{Notification, NotificationRead};
use crate::errors::DomainError;

/// Repository trait for Notification persistence operations
///
/// Listing merges a user's targeted notifications with global
/// announcements. Read state for targeted rows lives on the row itself;
/// global rows use per-user [`NotificationRead`] markers.
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// List all notifications visible to a user, newest first
    ///
    /// Includes the user's own notifications and every global
    /// announcement.
    ///
    /// # Arguments
    /// * `user_id` - The UUID of the requesting user
    ///
    /// # Returns
    /// * `Ok(Vec<Notification>)` - Visible notifications, newest first
    /// * `Err(DomainError)` - Database error occurred
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Notification>, DomainError>;

    /// Find a notification by id
    ///
    /// # Arguments
    /// * `id` - The UUID of the notification
    ///
    /// # Returns
    /// * `Ok(Some(Notification))` - Notification found
    /// * `Ok(None)` - No notification with that id
    /// * `Err(DomainError)` - Database error occurred
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Notification>, DomainError>;

    /// Insert a notification outside any transaction
    ///
    /// # Arguments
    /// * `notification` - The notification to persist
    ///
    /// # Returns
    /// * `Ok(Notification)` - The stored notification
    /// * `Err(DomainError)` - Save failed
    async fn insert(&self, notification: Notification) -> Result<Notification, DomainError>;

    /// Set the read timestamp on a targeted notification
    ///
    /// # Arguments
    /// * `id` - The UUID of the notification
    ///
    /// # Returns
    /// * `Ok(true)` - Row updated
    /// * `Ok(false)` - Notification not found
    /// * `Err(DomainError)` - Update failed
    async fn mark_read(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Record that a user has read a global notification
    ///
    /// Idempotent: inserting a marker that already exists is a no-op.
    ///
    /// # Arguments
    /// * `marker` - The read marker to persist
    ///
    /// # Returns
    /// * `Ok(())` - Marker stored or already present
    /// * `Err(DomainError)` - Save failed
    async fn insert_read_marker(&self, marker: NotificationRead) -> Result<(), DomainError>;

    /// List ids of global notifications a user has read
    ///
    /// # Arguments
    /// * `user_id` - The UUID of the user
    ///
    /// # Returns
    /// * `Ok(Vec<Uuid>)` - Notification ids with a read marker for the user
    /// * `Err(DomainError)` - Database error occurred
    async fn list_read_marker_ids(&self, user_id: Uuid) -> Result<Vec<Uuid>, DomainError>;
}
