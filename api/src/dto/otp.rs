//! DTOs for the one-time code endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use pt_core::services::otp::VerifyCodeResult;

/// Request body for POST /api/v1/otp/send
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendCodeRequest {
    /// Operation the code will authorize: `email_verification`,
    /// `two_fa`, `login`, or `two_fa_disable`
    #[validate(length(min = 1, max = 32, message = "Purpose is required"))]
    pub purpose: String,

    /// Trade side (`buy` or `sell`), required when purpose is `two_fa`
    pub operation_type: Option<String>,
}

/// Request body for POST /api/v1/otp/verify
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyCodeRequest {
    /// Purpose the code was issued for
    #[validate(length(min = 1, max = 32, message = "Purpose is required"))]
    pub purpose: String,

    /// 6-digit code from the email
    #[validate(length(equal = 6, message = "Code must be exactly 6 digits"))]
    pub code: String,
}

/// Response payload for a dispatched code
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendCodeResponse {
    /// Provider message id for the outbound email
    pub message_id: String,
    /// When the code stops being accepted
    pub expires_at: DateTime<Utc>,
    /// Seconds until another code may be requested
    pub resend_after: i64,
}

/// Account-state effects applied by a successful verification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyCodeResponse {
    pub purpose: String,
    pub email_verified: bool,
    pub trust_promoted: bool,
    pub session_marked: bool,
}

impl VerifyCodeResponse {
    pub fn from_result(result: &VerifyCodeResult) -> Self {
        Self {
            purpose: result.purpose.to_string(),
            email_verified: result.email_verified,
            trust_promoted: result.trust_promoted,
            session_marked: result.session_marked,
        }
    }
}
