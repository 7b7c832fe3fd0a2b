//! Mailer adapter bridging infrastructure providers to the core trait

use async_trait::async_trait;

use pt_core::services::otp::MailerTrait;

use super::mail_service::MailService;

/// Adapter that exposes any mail provider through the core MailerTrait
pub struct MailerService {
    inner: Box<dyn MailService>,
}

impl MailerService {
    /// Wrap a concrete provider
    pub fn new(inner: Box<dyn MailService>) -> Self {
        Self { inner }
    }

    /// Name of the wrapped provider
    pub fn provider_name(&self) -> &str {
        self.inner.provider_name()
    }
}

#[async_trait]
impl MailerTrait for MailerService {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<String, String> {
        self.inner
            .send_mail(to, subject, body)
            .await
            .map_err(|e| e.to_string())
    }
}
