//! Verification record repository module.

mod r#trait;
pub use r#trait::VerificationRecordRepository;

#[cfg(test)]
pub mod mock;
#[cfg(test)]
pub use mock::MockVerificationRecordRepository;
