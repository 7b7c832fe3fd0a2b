//! Configuration for the one-time code service

use crate::domain::entities::one_time_code::DEFAULT_EXPIRATION_MINUTES;

/// Configuration for the one-time code service
#[derive(Debug, Clone)]
pub struct OtpServiceConfig {
    /// Number of minutes before a code expires
    pub code_expiration_minutes: i64,
    /// Minimum seconds between code resend requests
    pub resend_cooldown_seconds: i64,
    /// Maximum codes a user may request per hour
    pub max_sends_per_hour: u32,
}

impl Default for OtpServiceConfig {
    fn default() -> Self {
        Self {
            code_expiration_minutes: DEFAULT_EXPIRATION_MINUTES,
            resend_cooldown_seconds: 60,
            max_sends_per_hour: 5,
        }
    }
}
