//! Mail Service Module
//!
//! Outbound mail implementations for delivering one-time codes and
//! account notices.
//!
//! ## Features
//!
//! - **Mail Service Trait**: Common interface for all mail providers
//! - **Mock Implementation**: Console output for development
//! - **HTTP API Support**: Production delivery via a JSON mail API
//! - **Security**: Recipient address masking in logs

pub mod http_api;
pub mod mail_service;
pub mod mailer_adapter;
pub mod mock_mail;

// Re-export commonly used types
pub use http_api::HttpApiMailService;
pub use mail_service::{is_valid_email, mask_email, MailService};
pub use mailer_adapter::MailerService;
pub use mock_mail::MockMailService;

use pt_shared::config::mail::MailConfig;

/// Create a mailer based on configuration
///
/// Returns the appropriate mail provider wrapped in the core-facing
/// adapter, falling back to the mock provider when the configured one
/// cannot be initialized.
///
/// # Arguments
///
/// * `config` - Mail configuration containing provider settings
pub fn create_mailer(config: &MailConfig) -> MailerService {
    match config.provider.as_str() {
        "mock" => MailerService::new(Box::new(MockMailService::new())),
        "http-api" => match HttpApiMailService::new(config.clone()) {
            Ok(service) => MailerService::new(Box::new(service)),
            Err(e) => {
                tracing::error!("Failed to initialize HTTP mail service: {}", e);
                tracing::warn!("Falling back to mock mail service");
                MailerService::new(Box::new(MockMailService::new()))
            }
        },
        _ => {
            tracing::warn!(
                "Unknown mail provider '{}', using mock implementation",
                config.provider
            );
            MailerService::new(Box::new(MockMailService::new()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_mailer_mock_provider() {
        let config = MailConfig::default();
        assert!(config.is_mock());

        let mailer = create_mailer(&config);
        assert_eq!(mailer.provider_name(), "Mock");
    }

    #[test]
    fn test_create_mailer_http_api_provider() {
        let config = MailConfig {
            provider: "http-api".to_string(),
            api_key: "key".to_string(),
            ..MailConfig::default()
        };

        let mailer = create_mailer(&config);
        assert_eq!(mailer.provider_name(), "HttpApi");
    }

    #[test]
    fn test_create_mailer_falls_back_when_misconfigured() {
        let config = MailConfig {
            provider: "http-api".to_string(),
            api_key: String::new(),
            ..MailConfig::default()
        };

        let mailer = create_mailer(&config);
        assert_eq!(mailer.provider_name(), "Mock");
    }

    #[test]
    fn test_create_mailer_unknown_provider_uses_mock() {
        let config = MailConfig {
            provider: "telegraph".to_string(),
            ..MailConfig::default()
        };

        let mailer = create_mailer(&config);
        assert_eq!(mailer.provider_name(), "Mock");
    }
}
