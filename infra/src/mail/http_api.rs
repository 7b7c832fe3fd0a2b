//! HTTP Mail API Service Implementation
//!
//! Sends mail through a JSON-over-HTTP provider API authenticated with
//! a bearer key. Transient failures are retried with exponential
//! backoff; client errors fail immediately.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use pt_shared::config::mail::MailConfig;

use super::mail_service::{is_valid_email, mask_email, MailService};
use crate::InfrastructureError;

/// Maximum attempts per message
const MAX_RETRIES: u32 = 3;
/// Initial backoff between attempts
const RETRY_DELAY_MS: u64 = 1000;

/// Successful provider response
#[derive(Debug, Deserialize)]
struct SendResponse {
    message_id: String,
}

/// Mail service backed by an HTTP provider API
pub struct HttpApiMailService {
    client: reqwest::Client,
    config: MailConfig,
}

impl HttpApiMailService {
    /// Create a new HTTP mail service
    pub fn new(config: MailConfig) -> Result<Self, InfrastructureError> {
        if config.api_url.trim().is_empty() {
            return Err(InfrastructureError::Config(
                "Mail API URL is not configured".to_string(),
            ));
        }
        if config.api_key.trim().is_empty() {
            return Err(InfrastructureError::Config(
                "Mail API key is not configured".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.send_timeout))
            .build()
            .map_err(InfrastructureError::Http)?;

        info!(
            "HTTP mail service initialized with sender: {}",
            mask_email(&config.from_address)
        );

        Ok(Self { client, config })
    }

    /// Send mail with retry logic
    async fn send_with_retry(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<String, InfrastructureError> {
        let payload = serde_json::json!({
            "from": {
                "email": self.config.from_address,
                "name": self.config.from_name,
            },
            "to": to,
            "subject": subject,
            "body": body,
        });

        let mut attempts = 0;
        let mut delay = Duration::from_millis(RETRY_DELAY_MS);

        loop {
            attempts += 1;

            debug!(
                "Sending mail attempt {}/{} to {}",
                attempts,
                MAX_RETRIES,
                mask_email(to)
            );

            let result = self
                .client
                .post(&self.config.api_url)
                .bearer_auth(&self.config.api_key)
                .json(&payload)
                .send()
                .await;

            match result {
                Ok(response) if response.status().is_success() => {
                    // Providers without an id in the response still get
                    // a unique handle for logging
                    let message_id = response
                        .json::<SendResponse>()
                        .await
                        .map(|r| r.message_id)
                        .unwrap_or_else(|_| format!("mail_{}", Uuid::new_v4()));

                    info!(
                        "Mail sent successfully to {} with id: {}",
                        mask_email(to),
                        message_id
                    );
                    return Ok(message_id);
                }
                Ok(response) => {
                    let status = response.status();

                    // Client errors other than throttling will not
                    // succeed on retry
                    if status.is_client_error()
                        && status != reqwest::StatusCode::TOO_MANY_REQUESTS
                    {
                        error!("Mail API rejected request with status {}", status);
                        return Err(InfrastructureError::Mail(format!(
                            "Mail API rejected request: {}",
                            status
                        )));
                    }

                    if attempts >= MAX_RETRIES {
                        return Err(InfrastructureError::Mail(format!(
                            "Failed to send mail after {} attempts: {}",
                            attempts, status
                        )));
                    }

                    warn!(
                        "Mail API returned {} (attempt {}/{}), retrying in {:?}",
                        status, attempts, MAX_RETRIES, delay
                    );
                }
                Err(e) => {
                    if attempts >= MAX_RETRIES {
                        error!("Failed to reach mail API after {} attempts: {}", attempts, e);
                        return Err(InfrastructureError::Http(e));
                    }

                    warn!(
                        "Mail API request failed (attempt {}/{}): {}. Retrying in {:?}",
                        attempts, MAX_RETRIES, e, delay
                    );
                }
            }

            tokio::time::sleep(delay).await;
            delay *= 2;
        }
    }
}

#[async_trait]
impl MailService for HttpApiMailService {
    async fn send_mail(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<String, InfrastructureError> {
        if !is_valid_email(to) {
            return Err(InfrastructureError::Mail(format!(
                "Invalid recipient address: {}",
                mask_email(to)
            )));
        }

        info!(
            "Sending mail to {} via HTTP API (body length: {} chars)",
            mask_email(to),
            body.len()
        );

        self.send_with_retry(to, subject, body).await
    }

    fn provider_name(&self) -> &str {
        "HttpApi"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> MailConfig {
        MailConfig {
            provider: "http-api".to_string(),
            api_url: "https://mail.example.com/v1/send".to_string(),
            api_key: "test-key".to_string(),
            from_address: "no-reply@example.com".to_string(),
            from_name: "PeerTrade".to_string(),
            send_timeout: 5,
        }
    }

    #[test]
    fn test_new_with_valid_config() {
        let service = HttpApiMailService::new(sample_config()).unwrap();
        assert_eq!(service.provider_name(), "HttpApi");
    }

    #[test]
    fn test_new_rejects_missing_api_url() {
        let mut config = sample_config();
        config.api_url = String::new();

        let result = HttpApiMailService::new(config);
        assert!(matches!(result, Err(InfrastructureError::Config(_))));
    }

    #[test]
    fn test_new_rejects_missing_api_key() {
        let mut config = sample_config();
        config.api_key = "  ".to_string();

        let result = HttpApiMailService::new(config);
        assert!(matches!(result, Err(InfrastructureError::Config(_))));
    }

    #[tokio::test]
    async fn test_send_rejects_invalid_recipient_without_network() {
        let service = HttpApiMailService::new(sample_config()).unwrap();

        let result = service.send_mail("bad-address", "Subject", "Body").await;
        assert!(matches!(result, Err(InfrastructureError::Mail(_))));
    }
}
