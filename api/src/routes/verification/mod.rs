//! Address/identity verification endpoints: submission and review.

pub mod review;
pub mod submit;

pub use review::review;
pub use submit::submit;
