//! Notification feed listing and read tracking

use std::collections::HashSet;
use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entities::notification::NotificationRead;
use crate::domain::value_objects::notification_feed::NotificationFeedItem;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::notification::NotificationRepository;

/// Service for the per-user notification feed
///
/// The feed merges a user's targeted notifications with global
/// announcements. Read state for targeted rows lives on the row;
/// global rows track reads through per-user markers.
pub struct NotificationService<N>
where
    N: NotificationRepository,
{
    notification_repository: Arc<N>,
}

impl<N> NotificationService<N>
where
    N: NotificationRepository,
{
    /// Creates a new notification service
    pub fn new(notification_repository: Arc<N>) -> Self {
        Self {
            notification_repository,
        }
    }

    /// Lists a user's notification feed, newest first
    ///
    /// This method:
    /// 1. Loads the user's notifications together with global rows
    /// 2. Loads the user's read markers for global rows
    /// 3. Computes the read flag per item from the matching source
    ///
    /// # Arguments
    /// * `user_id` - The requesting user
    ///
    /// # Returns
    /// * `Ok(Vec<NotificationFeedItem>)` - Feed items, newest first
    pub async fn list(&self, user_id: Uuid) -> DomainResult<Vec<NotificationFeedItem>> {
        let notifications = self.notification_repository.list_for_user(user_id).await?;
        let read_markers: HashSet<Uuid> = self
            .notification_repository
            .list_read_marker_ids(user_id)
            .await?
            .into_iter()
            .collect();

        let feed = notifications
            .iter()
            .map(|notification| {
                let is_read = if notification.is_global() {
                    read_markers.contains(&notification.id)
                } else {
                    notification.read_at.is_some()
                };
                NotificationFeedItem::from_notification(notification, is_read)
            })
            .collect();
        Ok(feed)
    }

    /// Marks one notification as read for a user
    ///
    /// Targeted notifications get their read timestamp set; a
    /// notification addressed to another user is reported as not found.
    /// Global notifications get an idempotent per-user read marker.
    ///
    /// # Arguments
    /// * `user_id` - The requesting user
    /// * `notification_id` - The notification to mark
    ///
    /// # Returns
    /// * `Ok(())` - Read state recorded, or already recorded
    /// * `Err(DomainError)` - Unknown or foreign notification
    pub async fn mark_read(&self, user_id: Uuid, notification_id: Uuid) -> DomainResult<()> {
        let notification = self
            .notification_repository
            .find_by_id(notification_id)
            .await?
            .ok_or_else(|| DomainError::not_found("notification"))?;

        match notification.user_id {
            Some(owner) if owner == user_id => {
                self.notification_repository.mark_read(notification_id).await?;
            }
            Some(_) => {
                // Another user's notification is indistinguishable from a
                // missing one.
                return Err(DomainError::not_found("notification"));
            }
            None => {
                let marker = NotificationRead::new(notification_id, user_id);
                self.notification_repository.insert_read_marker(marker).await?;
            }
        }

        tracing::debug!(
            user_id = %user_id,
            notification_id = %notification_id,
            "Notification marked read"
        );
        Ok(())
    }
}
