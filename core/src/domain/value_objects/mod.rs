//! Value objects representing immutable domain concepts.

pub mod login_session;
pub mod notification_feed;

// Re-export commonly used types
pub use login_session::LoginSession;
pub use notification_feed::NotificationFeedItem;
