//! Notification repository module.

mod r#trait;
pub use r#trait::NotificationRepository;

#[cfg(test)]
pub mod mock;
#[cfg(test)]
pub use mock::MockNotificationRepository;
