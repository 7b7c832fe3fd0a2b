//! One-time code entity for email-based operation verification.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of the one-time code
pub const CODE_LENGTH: usize = 6;

/// Default expiration time for one-time codes (5 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 5;

/// Purpose a one-time code was issued for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OtpPurpose {
    /// Verify ownership of the account email address
    EmailVerification,
    /// Authorize a buy/sell trade
    TwoFa,
    /// Complete a two-factor login
    Login,
    /// Turn off two-factor gating
    TwoFaDisable,
}

impl OtpPurpose {
    /// Stable string form used for storage and logging
    pub fn as_str(&self) -> &'static str {
        match self {
            OtpPurpose::EmailVerification => "email_verification",
            OtpPurpose::TwoFa => "two_fa",
            OtpPurpose::Login => "login",
            OtpPurpose::TwoFaDisable => "two_fa_disable",
        }
    }
}

impl std::fmt::Display for OtpPurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OtpPurpose {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email_verification" => Ok(OtpPurpose::EmailVerification),
            "two_fa" => Ok(OtpPurpose::TwoFa),
            "login" => Ok(OtpPurpose::Login),
            "two_fa_disable" => Ok(OtpPurpose::TwoFaDisable),
            _ => Err(format!("Unknown OTP purpose: {}", s)),
        }
    }
}

/// Side of a trade a two-factor code authorizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    Buy,
    Sell,
}

impl TradeSide {
    /// Stable string form used for storage
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeSide::Buy => "buy",
            TradeSide::Sell => "sell",
        }
    }
}

impl std::str::FromStr for TradeSide {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "buy" => Ok(TradeSide::Buy),
            "sell" => Ok(TradeSide::Sell),
            _ => Err(format!("Unknown trade side: {}", s)),
        }
    }
}

/// One-time code entity tied to a user and an operation purpose
///
/// At most one code exists per user at any time; issuing a new code
/// replaces the prior one. A code is deleted when successfully consumed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneTimeCode {
    /// Unique identifier for the code record
    pub id: Uuid,

    /// The user this code belongs to
    pub user_id: Uuid,

    /// The 6-digit numeric code
    pub code: String,

    /// What operation this code authorizes
    pub purpose: OtpPurpose,

    /// Trade side for two-factor trade codes
    pub trade_side: Option<TradeSide>,

    /// Timestamp when the code was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the code expires
    pub expires_at: DateTime<Utc>,
}

impl OneTimeCode {
    /// Creates a new one-time code with a random 6-digit code
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user the code is issued to
    /// * `purpose` - The operation the code authorizes
    /// * `trade_side` - Trade side, required for `TwoFa` codes
    pub fn new(user_id: Uuid, purpose: OtpPurpose, trade_side: Option<TradeSide>) -> Self {
        Self::new_with_expiration(user_id, purpose, trade_side, DEFAULT_EXPIRATION_MINUTES)
    }

    /// Creates a new one-time code with a custom expiration time
    pub fn new_with_expiration(
        user_id: Uuid,
        purpose: OtpPurpose,
        trade_side: Option<TradeSide>,
        expiration_minutes: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            code: Self::generate_code(),
            purpose,
            trade_side,
            created_at: now,
            expires_at: now + Duration::minutes(expiration_minutes),
        }
    }

    /// Generates a random 6-digit code, uniform over [100000, 999999]
    fn generate_code() -> String {
        let mut rng = rand::thread_rng();
        let code: u32 = rng.gen_range(100_000..1_000_000);
        code.to_string()
    }

    /// Checks if the code has expired
    ///
    /// A code is expired when the current time is at or after the stored
    /// expiry.
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    /// Checks if this code was issued for the given purpose
    pub fn matches_purpose(&self, purpose: OtpPurpose) -> bool {
        self.purpose == purpose
    }
}
