//! Notification feed endpoints.

pub mod list;
pub mod mark_read;

pub use list::list;
pub use mark_read::mark_read;
