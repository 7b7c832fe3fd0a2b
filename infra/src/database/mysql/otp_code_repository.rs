//! MySQL implementation of the OtpCodeRepository trait.
//!
//! The `one_time_codes` table carries a unique key on `user_id`, so
//! issuing a new code replaces the previous one atomically via
//! `ON DUPLICATE KEY UPDATE`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use std::str::FromStr;
use uuid::Uuid;

use pt_core::domain::entities::one_time_code::{OneTimeCode, OtpPurpose, TradeSide};
use pt_core::errors::DomainError;
use pt_core::repositories::OtpCodeRepository;

/// MySQL implementation of OtpCodeRepository
pub struct MySqlOtpCodeRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlOtpCodeRepository {
    /// Create a new MySQL one-time code repository
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to OneTimeCode entity
    fn row_to_code(row: &sqlx::mysql::MySqlRow) -> Result<OneTimeCode, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::internal(format!("Failed to get id: {}", e)))?;
        let user_id: String = row
            .try_get("user_id")
            .map_err(|e| DomainError::internal(format!("Failed to get user_id: {}", e)))?;
        let purpose: String = row
            .try_get("purpose")
            .map_err(|e| DomainError::internal(format!("Failed to get purpose: {}", e)))?;
        let trade_side: Option<String> = row
            .try_get("trade_side")
            .map_err(|e| DomainError::internal(format!("Failed to get trade_side: {}", e)))?;

        let trade_side = trade_side
            .map(|s| {
                TradeSide::from_str(&s)
                    .map_err(|e| DomainError::internal(format!("Stored trade_side invalid: {}", e)))
            })
            .transpose()?;

        Ok(OneTimeCode {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::internal(format!("Invalid code UUID: {}", e)))?,
            user_id: Uuid::parse_str(&user_id)
                .map_err(|e| DomainError::internal(format!("Invalid user UUID: {}", e)))?,
            code: row
                .try_get("code")
                .map_err(|e| DomainError::internal(format!("Failed to get code: {}", e)))?,
            purpose: OtpPurpose::from_str(&purpose)
                .map_err(|e| DomainError::internal(format!("Stored purpose invalid: {}", e)))?,
            trade_side,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::internal(format!("Failed to get created_at: {}", e)))?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| DomainError::internal(format!("Failed to get expires_at: {}", e)))?,
        })
    }
}

#[async_trait]
impl OtpCodeRepository for MySqlOtpCodeRepository {
    async fn upsert(&self, code: OneTimeCode) -> Result<OneTimeCode, DomainError> {
        let query = r#"
            INSERT INTO one_time_codes (
                id, user_id, code, purpose, trade_side, created_at, expires_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                id = VALUES(id),
                code = VALUES(code),
                purpose = VALUES(purpose),
                trade_side = VALUES(trade_side),
                created_at = VALUES(created_at),
                expires_at = VALUES(expires_at)
        "#;

        sqlx::query(query)
            .bind(code.id.to_string())
            .bind(code.user_id.to_string())
            .bind(&code.code)
            .bind(code.purpose.as_str())
            .bind(code.trade_side.map(|s| s.as_str()))
            .bind(code.created_at)
            .bind(code.expires_at)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to store code: {}", e)))?;

        Ok(code)
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<OneTimeCode>, DomainError> {
        let query = r#"
            SELECT id, user_id, code, purpose, trade_side, created_at, expires_at
            FROM one_time_codes
            WHERE user_id = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Database query failed: {}", e)))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_code(&row)?)),
            None => Ok(None),
        }
    }
}
