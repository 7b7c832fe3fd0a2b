pub mod notification;
pub mod otp_code;
pub mod session;
pub mod unit_of_work;
pub mod user;
pub mod verification_record;

pub use notification::NotificationRepository;
pub use otp_code::OtpCodeRepository;
pub use session::SessionRepository;
pub use unit_of_work::{TxScope, UnitOfWork};
pub use user::UserRepository;
pub use verification_record::VerificationRecordRepository;

#[cfg(test)]
pub use notification::MockNotificationRepository;
#[cfg(test)]
pub use otp_code::MockOtpCodeRepository;
#[cfg(test)]
pub use session::MockSessionRepository;
#[cfg(test)]
pub use unit_of_work::{MockStores, MockTxFailure, MockUnitOfWork};
#[cfg(test)]
pub use user::MockUserRepository;
#[cfg(test)]
pub use verification_record::MockVerificationRecordRepository;
