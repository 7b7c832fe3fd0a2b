//! Mail provider configuration module

use serde::{Deserialize, Serialize};

/// Outbound mail configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailConfig {
    /// Mail provider ("http-api", "mock")
    pub provider: String,

    /// Mail API base URL
    pub api_url: String,

    /// API key for the mail provider
    pub api_key: String,

    /// Sender address
    pub from_address: String,

    /// Sender display name
    pub from_name: String,

    /// Request timeout in seconds
    #[serde(default = "default_send_timeout")]
    pub send_timeout: u64,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            provider: String::from("mock"),
            api_url: String::from("https://api.mail.example.com/v1/send"),
            api_key: String::new(),
            from_address: String::from("no-reply@peertrade.example.com"),
            from_name: String::from("PeerTrade"),
            send_timeout: default_send_timeout(),
        }
    }
}

impl MailConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            provider: std::env::var("MAIL_PROVIDER")
                .unwrap_or_else(|_| "mock".to_string()),
            api_url: std::env::var("MAIL_API_URL")
                .unwrap_or_else(|_| "https://api.mail.example.com/v1/send".to_string()),
            api_key: std::env::var("MAIL_API_KEY").unwrap_or_default(),
            from_address: std::env::var("MAIL_FROM_ADDRESS")
                .unwrap_or_else(|_| "no-reply@peertrade.example.com".to_string()),
            from_name: std::env::var("MAIL_FROM_NAME")
                .unwrap_or_else(|_| "PeerTrade".to_string()),
            send_timeout: std::env::var("MAIL_SEND_TIMEOUT")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap_or(default_send_timeout()),
        }
    }

    /// Check whether the mock provider is selected
    pub fn is_mock(&self) -> bool {
        self.provider == "mock"
    }
}

fn default_send_timeout() -> u64 {
    10
}
