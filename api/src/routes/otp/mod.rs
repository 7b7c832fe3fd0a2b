//! One-time code endpoints: issuance and verification.

pub mod send;
pub mod verify;

pub use send::send;
pub use verify::verify;
