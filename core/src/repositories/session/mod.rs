//! Session repository module.

mod r#trait;
pub use r#trait::SessionRepository;

#[cfg(test)]
pub mod mock;
#[cfg(test)]
pub use mock::MockSessionRepository;
