//! Business services containing domain logic and use cases.

pub mod account;
pub mod kyc;
pub mod notification;
pub mod otp;
pub mod realtime;

// Re-export commonly used types
pub use account::{AccountService, AccountServiceConfig, PasswordHasherTrait};
pub use kyc::{KycService, RecordSubmission, ReviewDecision, SubmitOutcome};
pub use notification::NotificationService;
pub use otp::{
    MailerTrait, OtpService, OtpServiceConfig, RateLimiterTrait, SendCodeResult, VerifyCodeResult,
};
pub use realtime::{NoopRealtimeNotifier, RealtimeNotifierTrait};

// Placeholder for future service modules
// pub mod trade_service;
