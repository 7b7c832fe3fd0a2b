//! Account service module
//!
//! This module covers the account lifecycle:
//! - Registration with hashed credentials
//! - Login issuing opaque bearer-token sessions
//! - Logout and bearer-token authentication

mod config;
mod hasher;
mod service;

#[cfg(test)]
mod tests;

pub use config::AccountServiceConfig;
pub use hasher::PasswordHasherTrait;
pub use service::AccountService;
