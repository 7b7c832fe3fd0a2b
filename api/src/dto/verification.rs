//! DTOs for the verification submission and review endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use pt_core::domain::entities::verification_record::{DocumentType, RecordKind, VerificationRecord};
use pt_core::errors::{DomainError, ValidationError};
use pt_core::services::kyc::RecordSubmission;

/// Request body for POST /api/v1/verification/submit
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubmitVerificationRequest {
    /// `address` or `identity`
    #[validate(length(min = 1, max = 16, message = "Kind is required"))]
    pub kind: String,

    /// `passport`, `national_id`, `driver_license`, or `utility_bill`
    #[validate(length(min = 1, max = 32, message = "Document type is required"))]
    pub document_type: String,

    /// Storage reference for the document front side
    #[validate(length(min = 1, max = 512, message = "Front document reference is required"))]
    pub front_document: String,

    /// Storage reference for the back side, if any
    pub back_document: Option<String>,

    /// Country, required for identity submissions
    pub country: Option<String>,

    /// Region or state, required for identity submissions
    pub region: Option<String>,

    /// Street address, required for identity submissions
    pub address: Option<String>,
}

impl SubmitVerificationRequest {
    /// Parses the enumerated fields into a domain submission
    pub fn into_submission(self) -> Result<RecordSubmission, DomainError> {
        let kind = self
            .kind
            .parse::<RecordKind>()
            .map_err(|_| ValidationError::InvalidValue {
                field: "kind".to_string(),
                value: self.kind.clone(),
            })?;

        let document_type =
            self.document_type
                .parse::<DocumentType>()
                .map_err(|_| ValidationError::InvalidValue {
                    field: "document_type".to_string(),
                    value: self.document_type.clone(),
                })?;

        Ok(RecordSubmission {
            kind,
            document_type,
            front_document: self.front_document,
            back_document: self.back_document,
            country: self.country,
            region: self.region,
            address: self.address,
        })
    }
}

/// Request body for POST /api/v1/verification/{id}/review
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReviewRequest {
    /// `verified` to approve, `reject` to decline
    #[validate(length(min = 1, max = 16, message = "Decision is required"))]
    pub decision: String,

    /// Reviewer note shown to the user on rejection
    #[validate(length(max = 500, message = "Note must be at most 500 characters"))]
    pub note: Option<String>,
}

/// Public view of a verification record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationRecordResponse {
    pub id: Uuid,
    pub kind: String,
    pub document_type: String,
    pub status: String,
    pub note: Option<String>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl VerificationRecordResponse {
    pub fn from_record(record: &VerificationRecord) -> Self {
        Self {
            id: record.id,
            kind: record.kind.as_str().to_string(),
            document_type: record.document_type.as_str().to_string(),
            status: record.status.as_str().to_string(),
            note: record.note.clone(),
            reviewed_at: record.reviewed_at,
            created_at: record.created_at,
        }
    }
}
