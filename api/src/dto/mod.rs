//! Request and response DTOs for the REST surface.

pub mod auth;
pub mod notification;
pub mod otp;
pub mod verification;
