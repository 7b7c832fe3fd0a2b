//! KYC verification service
//!
//! Handles address and identity verification submissions and the admin
//! review flow. Submission is gated on a verified email; approving an
//! identity record stamps the owner's ID verification and re-evaluates
//! trust promotion. Review outcomes are stored together with an owner
//! notification in one transaction.

mod service;
mod types;

#[cfg(test)]
mod tests;

pub use service::KycService;
pub use types::{RecordSubmission, ReviewDecision, SubmitOutcome};
