//! One-time code service module
//!
//! This module provides the complete one-time code workflow:
//! - Code generation and mail dispatch
//! - Rate limiting and resend cooldowns
//! - Single-use verification with purpose-specific effects
//! - Transactional consume-plus-effect semantics

mod config;
mod effects;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use config::OtpServiceConfig;
pub use effects::{
    ApplyEmailVerified, ConsumeOnly, EffectContext, EffectRegistry, MarkSessionVerified,
    VerificationEffect,
};
pub use service::OtpService;
pub use traits::{MailerTrait, RateLimiterTrait};
pub use types::{SendCodeResult, VerifyCodeResult};
