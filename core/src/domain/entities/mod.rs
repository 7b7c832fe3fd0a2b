//! Domain entities representing core business objects.

pub mod notification;
pub mod one_time_code;
pub mod session;
pub mod user;
pub mod verification_record;

// Re-export commonly used types
pub use notification::{Notification, NotificationRead};
pub use one_time_code::{
    OneTimeCode, OtpPurpose, TradeSide,
    CODE_LENGTH, DEFAULT_EXPIRATION_MINUTES,
};
pub use session::{Session, DEFAULT_SESSION_TTL_DAYS};
pub use user::{TrustLevel, User};
pub use verification_record::{
    DocumentType, RecordKind, VerificationRecord, VerificationStatus,
};
