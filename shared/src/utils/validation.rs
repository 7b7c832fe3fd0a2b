//! Common validation utilities

use once_cell::sync::Lazy;
use regex::Regex;

/// Minimum accepted password length
pub const MIN_PASSWORD_LENGTH: usize = 8;

// Pragmatic email shape check; full RFC 5322 is not the goal
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap()
});

// Exactly six ASCII digits
static OTP_CODE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{6}$").unwrap()
});

/// Check if an email address has a valid shape
pub fn is_valid_email(email: &str) -> bool {
    email.len() <= 254 && EMAIL_REGEX.is_match(email)
}

/// Check if a password satisfies the minimum policy
pub fn is_valid_password(password: &str) -> bool {
    password.len() >= MIN_PASSWORD_LENGTH
}

/// Check if a string is a well-formed 6-digit OTP code
pub fn is_valid_otp_code(code: &str) -> bool {
    OTP_CODE_REGEX.is_match(code)
}

/// Mask an email address for logging (e.g. `jo****@example.com`)
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if local.len() > 2 => {
            format!("{}****@{}", &local[..2], domain)
        }
        Some((_, domain)) => format!("****@{}", domain),
        None => "****".to_string(),
    }
}
