//! Types for verification submission and review

use crate::domain::entities::verification_record::{DocumentType, RecordKind, VerificationRecord};

/// A user's verification submission before validation
#[derive(Debug, Clone)]
pub struct RecordSubmission {
    /// Address or identity verification
    pub kind: RecordKind,
    /// Type of document submitted
    pub document_type: DocumentType,
    /// Storage reference for the document front side
    pub front_document: String,
    /// Storage reference for the document back side, if any
    pub back_document: Option<String>,
    /// Country, required for identity submissions
    pub country: Option<String>,
    /// Region or state, required for identity submissions
    pub region: Option<String>,
    /// Street address, required for identity submissions
    pub address: Option<String>,
}

/// Result of a verification submission
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// A fresh pending record was created
    Created(VerificationRecord),
    /// The user already has a verified record; nothing was created
    AlreadyVerified,
    /// The user already has a pending record; nothing was created
    AlreadyPending,
}

/// Admin decision on a pending record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewDecision {
    /// Approve the record
    Approve,
    /// Reject the record; the user may resubmit
    Reject,
}
