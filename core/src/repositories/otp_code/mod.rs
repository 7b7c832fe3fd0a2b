//! One-time code repository module.

mod r#trait;
pub use r#trait::OtpCodeRepository;

#[cfg(test)]
pub mod mock;
#[cfg(test)]
pub use mock::MockOtpCodeRepository;
