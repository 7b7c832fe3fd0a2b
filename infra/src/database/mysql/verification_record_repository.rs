//! MySQL implementation of the VerificationRecordRepository trait.
//!
//! Reads only. Writes to `verification_records` go through the unit of
//! work so a review and its account-state effects land atomically.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use pt_core::domain::entities::verification_record::{
    DocumentType, RecordKind, VerificationRecord, VerificationStatus,
};
use pt_core::errors::DomainError;
use pt_core::repositories::VerificationRecordRepository;

/// MySQL implementation of VerificationRecordRepository
pub struct MySqlVerificationRecordRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlVerificationRecordRepository {
    /// Create a new MySQL verification record repository
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to VerificationRecord entity
    fn row_to_record(row: &sqlx::mysql::MySqlRow) -> Result<VerificationRecord, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::internal(format!("Failed to get id: {}", e)))?;
        let user_id: String = row
            .try_get("user_id")
            .map_err(|e| DomainError::internal(format!("Failed to get user_id: {}", e)))?;
        let kind: String = row
            .try_get("kind")
            .map_err(|e| DomainError::internal(format!("Failed to get kind: {}", e)))?;
        let document_type: String = row
            .try_get("document_type")
            .map_err(|e| DomainError::internal(format!("Failed to get document_type: {}", e)))?;
        let status: String = row
            .try_get("status")
            .map_err(|e| DomainError::internal(format!("Failed to get status: {}", e)))?;

        Ok(VerificationRecord {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::internal(format!("Invalid record UUID: {}", e)))?,
            user_id: Uuid::parse_str(&user_id)
                .map_err(|e| DomainError::internal(format!("Invalid user UUID: {}", e)))?,
            kind: RecordKind::from_str(&kind)
                .map_err(|e| DomainError::internal(format!("Stored kind invalid: {}", e)))?,
            document_type: DocumentType::from_str(&document_type).map_err(|e| {
                DomainError::internal(format!("Stored document type invalid: {}", e))
            })?,
            front_document: row
                .try_get("front_document")
                .map_err(|e| {
                    DomainError::internal(format!("Failed to get front_document: {}", e))
                })?,
            back_document: row
                .try_get("back_document")
                .map_err(|e| DomainError::internal(format!("Failed to get back_document: {}", e)))?,
            country: row
                .try_get("country")
                .map_err(|e| DomainError::internal(format!("Failed to get country: {}", e)))?,
            region: row
                .try_get("region")
                .map_err(|e| DomainError::internal(format!("Failed to get region: {}", e)))?,
            address: row
                .try_get("address")
                .map_err(|e| DomainError::internal(format!("Failed to get address: {}", e)))?,
            status: VerificationStatus::from_str(&status)
                .map_err(|e| DomainError::internal(format!("Stored status invalid: {}", e)))?,
            note: row
                .try_get("note")
                .map_err(|e| DomainError::internal(format!("Failed to get note: {}", e)))?,
            reviewed_at: row
                .try_get::<Option<DateTime<Utc>>, _>("reviewed_at")
                .map_err(|e| DomainError::internal(format!("Failed to get reviewed_at: {}", e)))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::internal(format!("Failed to get created_at: {}", e)))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| DomainError::internal(format!("Failed to get updated_at: {}", e)))?,
        })
    }
}

#[async_trait]
impl VerificationRecordRepository for MySqlVerificationRecordRepository {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<VerificationRecord>, DomainError> {
        let query = r#"
            SELECT id, user_id, kind, document_type, front_document, back_document,
                   country, region, address, status, note, reviewed_at,
                   created_at, updated_at
            FROM verification_records
            WHERE user_id = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Database query failed: {}", e)))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_record(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<VerificationRecord>, DomainError> {
        let query = r#"
            SELECT id, user_id, kind, document_type, front_document, back_document,
                   country, region, address, status, note, reviewed_at,
                   created_at, updated_at
            FROM verification_records
            WHERE id = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Database query failed: {}", e)))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_record(&row)?)),
            None => Ok(None),
        }
    }
}
