//! MySQL repository implementations
//!
//! Each repository maps one core trait onto a table. Rows use CHAR(36)
//! UUID text columns and UTC timestamps. Row-to-entity mapping helpers
//! are shared with the unit of work, which runs the same statements
//! inside a transaction.

mod notification_repository;
mod otp_code_repository;
mod session_repository;
mod unit_of_work;
mod user_repository;
mod verification_record_repository;

pub use notification_repository::MySqlNotificationRepository;
pub use otp_code_repository::MySqlOtpCodeRepository;
pub use session_repository::MySqlSessionRepository;
pub use unit_of_work::{MySqlTxScope, MySqlUnitOfWork};
pub use user_repository::MySqlUserRepository;
pub use verification_record_repository::MySqlVerificationRecordRepository;
