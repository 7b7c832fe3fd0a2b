//! Domain-specific error types for one-time code, account, and
//! verification operations.
//!
//! Each enum maps one failure family; translation to HTTP status codes
//! happens at the presentation layer.

use thiserror::Error;

/// One-time code errors
///
/// These errors cover issuance and verification of one-time codes.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum OtpError {
    #[error("Invalid verification code")]
    InvalidCode,

    #[error("OTP has expired")]
    Expired,

    #[error("Operation type is required for trade verification")]
    MissingTradeSide,

    #[error("Invalid operation type: {side}")]
    InvalidTradeSide { side: String },

    #[error("Failed to deliver verification email")]
    MailDeliveryFailure,

    #[error("Rate limit exceeded: retry in {minutes} minutes")]
    RateLimitExceeded { minutes: u32 },
}

/// Account and session errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AccountError {
    #[error("Email already registered")]
    EmailAlreadyRegistered,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Session expired")]
    SessionExpired,

    #[error("Invalid session")]
    InvalidSession,

    #[error("User not found")]
    UserNotFound,

    #[error("Insufficient permissions")]
    InsufficientPermissions,
}

/// Address/identity verification errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum KycError {
    #[error("Email must be verified before submitting verification documents")]
    EmailNotVerified,

    #[error("Verification record has already been reviewed")]
    AlreadyReviewed,
}

/// Validation errors
///
/// These errors represent input validation failures.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid format: {field}")]
    InvalidFormat { field: String },

    #[error("Invalid length: {field} (expected: {expected}, actual: {actual})")]
    InvalidLength {
        field: String,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid email")]
    InvalidEmail,

    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },
}
