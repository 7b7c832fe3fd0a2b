//! Notification feed service

mod service;

#[cfg(test)]
mod tests;

pub use service::NotificationService;
