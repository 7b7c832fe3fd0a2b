//! Main one-time code service implementation

use chrono::Utc;
use constant_time_eq::constant_time_eq;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::one_time_code::{OneTimeCode, OtpPurpose, TradeSide, CODE_LENGTH};
use crate::domain::entities::user::User;
use crate::errors::{DomainError, DomainResult, OtpError};
use crate::repositories::{OtpCodeRepository, UnitOfWork};
use crate::services::realtime::RealtimeNotifierTrait;

use super::config::OtpServiceConfig;
use super::effects::{EffectContext, EffectRegistry};
use super::traits::{MailerTrait, RateLimiterTrait};
use super::types::{SendCodeResult, VerifyCodeResult};

/// One-time code service covering issuance and verification
///
/// Issuance replaces any prior code for the user and mails the new one.
/// Verification consumes the code and applies the purpose's registered
/// effect inside a single transaction.
pub struct OtpService<C, W, M, R, N>
where
    C: OtpCodeRepository,
    W: UnitOfWork,
    M: MailerTrait,
    R: RateLimiterTrait,
    N: RealtimeNotifierTrait,
{
    /// Code repository for issuance and lookup
    code_repository: Arc<C>,
    /// Transaction factory for atomic consume-plus-effect
    unit_of_work: Arc<W>,
    /// Outbound mail collaborator
    mailer: Arc<M>,
    /// Rate limiter for issuance abuse
    rate_limiter: Arc<R>,
    /// Real-time notifier, fire-and-forget
    notifier: Arc<N>,
    /// Purpose-to-effect mapping
    effects: EffectRegistry,
    /// Service configuration
    config: OtpServiceConfig,
}

impl<C, W, M, R, N> OtpService<C, W, M, R, N>
where
    C: OtpCodeRepository,
    W: UnitOfWork,
    M: MailerTrait,
    R: RateLimiterTrait,
    N: RealtimeNotifierTrait,
{
    /// Create a new one-time code service
    ///
    /// # Arguments
    ///
    /// * `code_repository` - Repository for code persistence
    /// * `unit_of_work` - Transaction factory
    /// * `mailer` - Outbound mail collaborator
    /// * `rate_limiter` - Issuance rate limiter
    /// * `notifier` - Real-time notification collaborator
    /// * `config` - Service configuration
    pub fn new(
        code_repository: Arc<C>,
        unit_of_work: Arc<W>,
        mailer: Arc<M>,
        rate_limiter: Arc<R>,
        notifier: Arc<N>,
        config: OtpServiceConfig,
    ) -> Self {
        Self {
            code_repository,
            unit_of_work,
            mailer,
            rate_limiter,
            notifier,
            effects: EffectRegistry::standard(),
            config,
        }
    }

    /// Replace the effect registry, for wiring custom purposes
    pub fn with_effects(mut self, effects: EffectRegistry) -> Self {
        self.effects = effects;
        self
    }

    /// Issue a one-time code and mail it to the user
    ///
    /// This method:
    /// 1. Validates the trade side for `two_fa` requests
    /// 2. Short-circuits `email_verification` when the email is already verified
    /// 3. Checks rate limiting per (user identifier, client origin)
    /// 4. Generates a 6-digit code and stores it, replacing any prior code
    /// 5. Sends the code via the mail collaborator
    /// 6. Increments the rate limit counter
    ///
    /// # Arguments
    ///
    /// * `user` - The authenticated requesting user
    /// * `purpose` - The operation the code will authorize
    /// * `trade_side` - Raw `operation_type` value, required for `two_fa`
    /// * `origin` - Client origin the request arrived from, for rate limiting
    ///
    /// # Returns
    ///
    /// * `Ok(SendCodeResult)` - Code sent, or already-verified no-op
    /// * `Err(DomainError)` - Validation, rate limit, or delivery failure
    pub async fn send_code(
        &self,
        user: &User,
        purpose: OtpPurpose,
        trade_side: Option<&str>,
        origin: &str,
    ) -> DomainResult<SendCodeResult> {
        // Step 1: trade codes must carry a buy/sell side
        let side = self.resolve_trade_side(purpose, trade_side)?;

        // Step 2: re-verifying an already verified email is a no-op success
        if purpose == OtpPurpose::EmailVerification && user.is_email_verified() {
            tracing::info!(
                user_id = %user.id,
                event = "otp_send_skipped",
                "Email already verified, skipping code issuance"
            );
            return Ok(SendCodeResult::AlreadyVerified);
        }

        // Step 3: rate limit per (user identifier, client origin)
        let identifier = user.id.to_string();
        let limited = self
            .rate_limiter
            .is_rate_limited(&identifier, origin)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to check rate limit: {}", e),
            })?;

        if limited {
            let reset_seconds = self
                .rate_limiter
                .reset_in_seconds(&identifier, origin)
                .await
                .unwrap_or(Some(3600))
                .unwrap_or(3600);
            let minutes = (reset_seconds / 60).max(1) as u32;

            tracing::warn!(
                user_id = %user.id,
                purpose = %purpose,
                reset_seconds = reset_seconds,
                event = "otp_rate_limited",
                "Code issuance rate limit exceeded"
            );
            return Err(OtpError::RateLimitExceeded { minutes }.into());
        }

        // Step 4: generate and store, replacing any existing code
        let code = OneTimeCode::new_with_expiration(
            user.id,
            purpose,
            side,
            self.config.code_expiration_minutes,
        );
        let code = self.code_repository.upsert(code).await?;

        tracing::info!(
            user_id = %user.id,
            purpose = %purpose,
            code_id = %code.id,
            event = "otp_generated",
            "Generated new one-time code"
        );

        // Step 5: mail the code
        let (subject, body) = Self::compose_mail(&code);
        let message_id = self
            .mailer
            .send(&user.email, &subject, &body)
            .await
            .map_err(|e| {
                tracing::error!(
                    user_id = %user.id,
                    purpose = %purpose,
                    error = %e,
                    event = "otp_mail_failed",
                    "Failed to deliver one-time code email"
                );
                DomainError::Otp(OtpError::MailDeliveryFailure)
            })?;

        // Step 6: count the send after it succeeded
        let _count = self
            .rate_limiter
            .record_attempt(&identifier, origin)
            .await
            .unwrap_or(1);

        let next_resend_at =
            Utc::now() + chrono::Duration::seconds(self.config.resend_cooldown_seconds);

        Ok(SendCodeResult::Sent {
            message_id,
            expires_at: code.expires_at,
            next_resend_at,
        })
    }

    /// Verify a submitted code and atomically apply its effect
    ///
    /// This method:
    /// 1. Locates the user's stored code; absent or mismatched → `InvalidCode`
    /// 2. Compares codes in constant time
    /// 3. Rejects codes issued for a different purpose
    /// 4. Rejects expired codes, leaving the stored row in place
    /// 5. Deletes the code and applies the purpose's effect in one transaction
    /// 6. Publishes any resulting notifications after commit
    ///
    /// # Arguments
    ///
    /// * `user` - The authenticated user, updated in place by effects
    /// * `session_id` - The session the request was authenticated with
    /// * `submitted` - The code provided by the user
    /// * `purpose` - The operation kind being verified
    ///
    /// # Returns
    ///
    /// * `Ok(VerifyCodeResult)` - Which effects were applied
    /// * `Err(DomainError)` - Invalid, expired, or storage failure
    pub async fn verify_code(
        &self,
        user: &mut User,
        session_id: Uuid,
        submitted: &str,
        purpose: OtpPurpose,
    ) -> DomainResult<VerifyCodeResult> {
        // A well-formed code is 6 ASCII digits; anything else can never match
        if submitted.len() != CODE_LENGTH || !submitted.chars().all(|c| c.is_ascii_digit()) {
            tracing::warn!(
                user_id = %user.id,
                code_length = submitted.len(),
                event = "otp_malformed",
                "Malformed code submitted"
            );
            return Err(OtpError::InvalidCode.into());
        }

        let stored = match self.code_repository.find_by_user(user.id).await? {
            Some(stored) => stored,
            None => {
                tracing::warn!(
                    user_id = %user.id,
                    event = "otp_not_found",
                    "No stored code for user"
                );
                return Err(OtpError::InvalidCode.into());
            }
        };

        if !constant_time_eq(stored.code.as_bytes(), submitted.as_bytes()) {
            tracing::warn!(
                user_id = %user.id,
                event = "otp_mismatch",
                "Submitted code does not match stored code"
            );
            return Err(OtpError::InvalidCode.into());
        }

        if !stored.matches_purpose(purpose) {
            tracing::warn!(
                user_id = %user.id,
                stored_purpose = %stored.purpose,
                submitted_purpose = %purpose,
                event = "otp_purpose_mismatch",
                "Code was issued for a different purpose"
            );
            return Err(OtpError::InvalidCode.into());
        }

        // Expiry is checked only after the code matched; the expired row
        // stays in place until the next issuance replaces it
        if stored.is_expired() {
            tracing::warn!(
                user_id = %user.id,
                purpose = %purpose,
                expired_at = %stored.expires_at,
                event = "otp_expired",
                "Expired code submitted"
            );
            return Err(OtpError::Expired.into());
        }

        let effect = self.effects.get(purpose).ok_or_else(|| DomainError::Internal {
            message: format!("No effect registered for purpose: {}", purpose),
        })?;

        let mut outcome = VerifyCodeResult::for_purpose(purpose);
        let mut published = Vec::new();

        // Consume the code and apply the effect atomically
        let mut tx = self.unit_of_work.begin().await?;
        let applied = match tx.delete_code(user.id).await {
            Ok(true) => {
                let mut ctx = EffectContext {
                    tx: &mut *tx,
                    user,
                    session_id,
                    outcome: &mut outcome,
                    published: &mut published,
                };
                effect.apply(&mut ctx).await
            }
            // A concurrent verification consumed it first
            Ok(false) => Err(OtpError::InvalidCode.into()),
            Err(e) => Err(e),
        };

        if let Err(e) = applied {
            let _ = tx.rollback().await;
            return Err(e);
        }
        tx.commit().await?;

        tracing::info!(
            user_id = %user.id,
            purpose = %purpose,
            email_verified = outcome.email_verified,
            trust_promoted = outcome.trust_promoted,
            session_marked = outcome.session_marked,
            event = "otp_verified",
            "One-time code verified"
        );

        // Fire-and-forget broadcast of committed notifications
        let topic = format!("user:{}:notifications", user.id);
        for notification in &published {
            if let Ok(payload) = serde_json::to_value(notification) {
                if let Err(e) = self.notifier.publish(&topic, payload).await {
                    tracing::warn!(
                        user_id = %user.id,
                        error = %e,
                        event = "notify_publish_failed",
                        "Real-time publish failed"
                    );
                }
            }
        }

        Ok(outcome)
    }

    fn resolve_trade_side(
        &self,
        purpose: OtpPurpose,
        trade_side: Option<&str>,
    ) -> DomainResult<Option<TradeSide>> {
        if purpose != OtpPurpose::TwoFa {
            return Ok(None);
        }
        match trade_side {
            None => Err(OtpError::MissingTradeSide.into()),
            Some(raw) => raw
                .parse::<TradeSide>()
                .map(Some)
                .map_err(|_| OtpError::InvalidTradeSide { side: raw.to_string() }.into()),
        }
    }

    fn compose_mail(code: &OneTimeCode) -> (String, String) {
        let subject = match code.purpose {
            OtpPurpose::EmailVerification => "Verify your email address",
            OtpPurpose::TwoFa => "Confirm your trade",
            OtpPurpose::Login => "Your login code",
            OtpPurpose::TwoFaDisable => "Confirm disabling two-factor authentication",
        };
        let body = format!(
            "Your verification code is {}. It expires in {} minutes.",
            code.code,
            (code.expires_at - code.created_at).num_minutes()
        );
        (subject.to_string(), body)
    }
}
