//! Rate limiting configuration module

use serde::{Deserialize, Serialize};

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    /// Enable rate limiting
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// OTP issuance rate limits
    pub otp: OtpRateLimits,
}

/// OTP-specific rate limits
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpRateLimits {
    /// Max codes issued per user per hour
    pub per_user_per_hour: u32,

    /// Max codes issued per origin (client IP) per hour
    pub per_origin_per_hour: u32,

    /// Cooldown period between sends in seconds
    #[serde(default = "default_otp_cooldown")]
    pub cooldown_seconds: u64,
}

impl Default for OtpRateLimits {
    fn default() -> Self {
        Self {
            per_user_per_hour: 5,
            per_origin_per_hour: 20,
            cooldown_seconds: default_otp_cooldown(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            otp: OtpRateLimits::default(),
        }
    }
}

impl RateLimitConfig {
    /// Get max OTP sends per user per window
    pub fn max_requests(&self) -> u32 {
        self.otp.per_user_per_hour
    }

    /// Get the rate-limit window in seconds
    pub fn window_seconds(&self) -> u64 {
        3600  // 1 hour window for OTP issuance
    }

    /// Create a development configuration (more lenient limits)
    pub fn development() -> Self {
        Self {
            enabled: true,
            otp: OtpRateLimits {
                per_user_per_hour: 30,
                per_origin_per_hour: 100,
                ..Default::default()
            },
        }
    }

    /// Create a production configuration (stricter limits)
    pub fn production() -> Self {
        Self::default()
    }
}

fn default_enabled() -> bool {
    true
}

fn default_otp_cooldown() -> u64 {
    60  // 1 minute
}
