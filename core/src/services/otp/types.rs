//! Types for one-time code service results

use chrono::{DateTime, Utc};

use crate::domain::entities::one_time_code::OtpPurpose;

/// Result of requesting a one-time code
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendCodeResult {
    /// A code was generated and mailed
    Sent {
        /// Provider message id from the mailer
        message_id: String,
        /// When the code expires
        expires_at: DateTime<Utc>,
        /// When the user may request another code
        next_resend_at: DateTime<Utc>,
    },
    /// The email is already verified; nothing was generated or sent
    AlreadyVerified,
}

/// Result of successfully verifying a code
///
/// Records which effects were applied so callers can shape the
/// response without re-deriving them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyCodeResult {
    /// The purpose the code was verified for
    pub purpose: OtpPurpose,
    /// Whether the email-verified timestamp was set by this call
    pub email_verified: bool,
    /// Whether the user's trust level was promoted by this call
    pub trust_promoted: bool,
    /// Whether the current session was marked two-factor-verified
    pub session_marked: bool,
}

impl VerifyCodeResult {
    /// A result with no effects applied yet
    pub fn for_purpose(purpose: OtpPurpose) -> Self {
        Self {
            purpose,
            email_verified: false,
            trust_promoted: false,
            session_marked: false,
        }
    }
}
