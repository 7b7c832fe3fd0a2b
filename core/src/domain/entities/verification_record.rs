//! Address/identity verification record entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of verification a record covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// Proof of residential address
    Address,
    /// Government-issued identity document
    Identity,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Address => "address",
            RecordKind::Identity => "identity",
        }
    }
}

impl std::str::FromStr for RecordKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "address" => Ok(RecordKind::Address),
            "identity" => Ok(RecordKind::Identity),
            _ => Err(format!("Unknown record kind: {}", s)),
        }
    }
}

/// Accepted document types for verification submissions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Passport,
    NationalId,
    DriverLicense,
    UtilityBill,
}

impl DocumentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Passport => "passport",
            DocumentType::NationalId => "national_id",
            DocumentType::DriverLicense => "driver_license",
            DocumentType::UtilityBill => "utility_bill",
        }
    }
}

impl std::str::FromStr for DocumentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "passport" => Ok(DocumentType::Passport),
            "national_id" => Ok(DocumentType::NationalId),
            "driver_license" => Ok(DocumentType::DriverLicense),
            "utility_bill" => Ok(DocumentType::UtilityBill),
            _ => Err(format!("Unknown document type: {}", s)),
        }
    }
}

/// Review state of a verification record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    /// Submitted, awaiting admin review
    Pending,
    /// Approved by an admin
    Verified,
    /// Declined by an admin; the user may resubmit
    Reject,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::Pending => "pending",
            VerificationStatus::Verified => "verified",
            VerificationStatus::Reject => "reject",
        }
    }
}

impl std::str::FromStr for VerificationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(VerificationStatus::Pending),
            "verified" => Ok(VerificationStatus::Verified),
            "reject" => Ok(VerificationStatus::Reject),
            _ => Err(format!("Unknown verification status: {}", s)),
        }
    }
}

/// Address or identity verification record
///
/// At most one record per user is active at a time. Only the initial
/// submission is user-driven; review transitions happen through the
/// admin endpoint. A rejected record is replaced on resubmission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRecord {
    /// Unique identifier for the record
    pub id: Uuid,

    /// The user being verified
    pub user_id: Uuid,

    /// Address or identity verification
    pub kind: RecordKind,

    /// Type of document submitted
    pub document_type: DocumentType,

    /// Storage reference for the document front side
    pub front_document: String,

    /// Storage reference for the document back side, if any
    pub back_document: Option<String>,

    /// Country, required for identity records
    pub country: Option<String>,

    /// Region or state, required for identity records
    pub region: Option<String>,

    /// Street address, required for identity records
    pub address: Option<String>,

    /// Current review state
    pub status: VerificationStatus,

    /// Reviewer note, set on rejection
    pub note: Option<String>,

    /// When an admin reviewed the record
    pub reviewed_at: Option<DateTime<Utc>>,

    /// Timestamp when the record was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the record was last updated
    pub updated_at: DateTime<Utc>,
}

impl VerificationRecord {
    /// Creates a new pending record
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_id: Uuid,
        kind: RecordKind,
        document_type: DocumentType,
        front_document: String,
        back_document: Option<String>,
        country: Option<String>,
        region: Option<String>,
        address: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            kind,
            document_type,
            front_document,
            back_document,
            country,
            region,
            address,
            status: VerificationStatus::Pending,
            note: None,
            reviewed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Checks whether a user may submit a fresh record while this one exists
    pub fn allows_resubmission(&self) -> bool {
        self.status == VerificationStatus::Reject
    }

    /// Marks the record approved
    pub fn approve(&mut self) {
        let now = Utc::now();
        self.status = VerificationStatus::Verified;
        self.note = None;
        self.reviewed_at = Some(now);
        self.updated_at = now;
    }

    /// Marks the record rejected with a reviewer note
    pub fn reject(&mut self, note: impl Into<String>) {
        let now = Utc::now();
        self.status = VerificationStatus::Reject;
        self.note = Some(note.into());
        self.reviewed_at = Some(now);
        self.updated_at = now;
    }
}
