//! Mail service interface
//!
//! Defines the trait for outbound mail implementations that deliver
//! one-time codes and account notices.

use async_trait::async_trait;

use crate::InfrastructureError;

/// Mail service trait for sending email messages
///
/// Implementations include:
/// - HTTP mail API provider
/// - Mock implementation for development
#[async_trait]
pub trait MailService: Send + Sync {
    /// Send an email message
    ///
    /// # Arguments
    ///
    /// * `to` - The recipient address
    /// * `subject` - The message subject line
    /// * `body` - The plain-text message content
    ///
    /// # Returns
    ///
    /// * `Ok(message_id)` - Provider identifier for the sent message
    /// * `Err(InfrastructureError)` - If sending fails
    async fn send_mail(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<String, InfrastructureError>;

    /// Get the service provider name
    fn provider_name(&self) -> &str;

    /// Check if the service is available
    ///
    /// Default implementation always returns true.
    async fn is_available(&self) -> bool {
        true
    }
}

/// Mask an email address for logging
///
/// Keeps the first character of the local part and the full domain.
pub fn mask_email(email: &str) -> String {
    match email.find('@') {
        Some(at_pos) => {
            let local = &email[..at_pos];
            let domain = &email[at_pos..];
            match local.chars().next() {
                Some(first) => format!("{}***{}", first, domain),
                None => format!("***{}", domain),
            }
        }
        None => "*".repeat(email.len()),
    }
}

/// Validate the basic structure of an email address
///
/// Full validation happens at the API boundary; this guards providers
/// against obviously unusable recipients.
pub fn is_valid_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && domain.contains('.')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    }
}
