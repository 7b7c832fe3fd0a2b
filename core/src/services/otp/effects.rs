//! Purpose-specific effects applied when a code verifies.
//!
//! Each [`OtpPurpose`] maps to one [`VerificationEffect`] through the
//! [`EffectRegistry`]. The service resolves the effect and runs it
//! inside the same transaction that consumes the code, so adding a new
//! purpose means registering a new effect, not editing the verify flow.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::notification::Notification;
use crate::domain::entities::one_time_code::OtpPurpose;
use crate::domain::entities::user::User;
use crate::errors::DomainResult;
use crate::repositories::unit_of_work::TxScope;

use super::types::VerifyCodeResult;

/// State an effect runs against
///
/// Everything an effect writes goes through `tx`; notifications pushed
/// to `published` are broadcast only after the transaction commits.
pub struct EffectContext<'a> {
    /// Open transaction scope shared with code consumption
    pub tx: &'a mut dyn TxScope,
    /// The verifying user, mutated in place
    pub user: &'a mut User,
    /// The session the request was authenticated with
    pub session_id: Uuid,
    /// Effect flags reported back to the caller
    pub outcome: &'a mut VerifyCodeResult,
    /// Notifications to publish after commit
    pub published: &'a mut Vec<Notification>,
}

/// One operation kind's post-verification effect
#[async_trait]
pub trait VerificationEffect: Send + Sync {
    /// Apply the effect inside the open transaction
    async fn apply(&self, ctx: &mut EffectContext<'_>) -> DomainResult<()>;
}

/// Marks the current session two-factor-verified
///
/// Shared by `login` and `two_fa`: both gate an action on the session
/// having passed a fresh code check.
pub struct MarkSessionVerified;

#[async_trait]
impl VerificationEffect for MarkSessionVerified {
    async fn apply(&self, ctx: &mut EffectContext<'_>) -> DomainResult<()> {
        ctx.tx.mark_session_verified(ctx.session_id).await?;
        ctx.outcome.session_marked = true;
        Ok(())
    }
}

/// No effect beyond code consumption
///
/// Registered for `two_fa_disable`; the purpose exists as an extension
/// point and currently only proves code possession.
pub struct ConsumeOnly;

#[async_trait]
impl VerificationEffect for ConsumeOnly {
    async fn apply(&self, _ctx: &mut EffectContext<'_>) -> DomainResult<()> {
        Ok(())
    }
}

/// Sets the email-verified timestamp and promotes trust when due
///
/// Emits exactly one notification per successful application; the body
/// mentions the promotion when it happened.
pub struct ApplyEmailVerified;

#[async_trait]
impl VerificationEffect for ApplyEmailVerified {
    async fn apply(&self, ctx: &mut EffectContext<'_>) -> DomainResult<()> {
        let was_verified = ctx.user.is_email_verified();
        ctx.user.verify_email();
        ctx.outcome.email_verified = !was_verified;

        let promoted = ctx.user.promote_trust_if_fully_verified();
        ctx.outcome.trust_promoted = promoted;

        ctx.tx.save_user(ctx.user).await?;

        let body = if promoted {
            "Your email address has been verified. All identity checks are complete and your account is now trusted."
        } else {
            "Your email address has been verified."
        };
        let notification = Notification::for_user(ctx.user.id, "Email verified", body);
        ctx.tx.insert_notification(&notification).await?;
        ctx.published.push(notification);

        Ok(())
    }
}

/// Registry mapping operation kinds to their effects
pub struct EffectRegistry {
    effects: HashMap<OtpPurpose, Arc<dyn VerificationEffect>>,
}

impl EffectRegistry {
    /// An empty registry with no purposes wired
    pub fn empty() -> Self {
        Self {
            effects: HashMap::new(),
        }
    }

    /// The standard mapping for all four operation kinds
    pub fn standard() -> Self {
        let mark_session: Arc<dyn VerificationEffect> = Arc::new(MarkSessionVerified);
        Self::empty()
            .with_effect(OtpPurpose::Login, Arc::clone(&mark_session))
            .with_effect(OtpPurpose::TwoFa, mark_session)
            .with_effect(OtpPurpose::TwoFaDisable, Arc::new(ConsumeOnly))
            .with_effect(OtpPurpose::EmailVerification, Arc::new(ApplyEmailVerified))
    }

    /// Register or replace the effect for a purpose
    pub fn with_effect(
        mut self,
        purpose: OtpPurpose,
        effect: Arc<dyn VerificationEffect>,
    ) -> Self {
        self.effects.insert(purpose, effect);
        self
    }

    /// Look up the effect for a purpose
    pub fn get(&self, purpose: OtpPurpose) -> Option<&Arc<dyn VerificationEffect>> {
        self.effects.get(&purpose)
    }
}

impl Default for EffectRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
