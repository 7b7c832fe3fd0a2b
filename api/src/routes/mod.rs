//! HTTP route handlers grouped by resource.

pub mod auth;
pub mod notifications;
pub mod otp;
pub mod verification;
