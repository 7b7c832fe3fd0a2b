//! MySQL implementation of the SessionRepository trait.
//!
//! Sessions are looked up by the SHA-256 hash of the bearer token;
//! plaintext tokens never reach this layer.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use pt_core::domain::entities::session::Session;
use pt_core::errors::DomainError;
use pt_core::repositories::SessionRepository;

/// MySQL implementation of SessionRepository
pub struct MySqlSessionRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlSessionRepository {
    /// Create a new MySQL session repository
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to Session entity
    fn row_to_session(row: &sqlx::mysql::MySqlRow) -> Result<Session, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::internal(format!("Failed to get id: {}", e)))?;
        let user_id: String = row
            .try_get("user_id")
            .map_err(|e| DomainError::internal(format!("Failed to get user_id: {}", e)))?;

        Ok(Session {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::internal(format!("Invalid session UUID: {}", e)))?,
            user_id: Uuid::parse_str(&user_id)
                .map_err(|e| DomainError::internal(format!("Invalid user UUID: {}", e)))?,
            token_hash: row
                .try_get("token_hash")
                .map_err(|e| DomainError::internal(format!("Failed to get token_hash: {}", e)))?,
            two_fa_verified: row.try_get("two_fa_verified").map_err(|e| {
                DomainError::internal(format!("Failed to get two_fa_verified: {}", e))
            })?,
            is_revoked: row
                .try_get("is_revoked")
                .map_err(|e| DomainError::internal(format!("Failed to get is_revoked: {}", e)))?,
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
impl SessionRepository for MySqlSessionRepository {
    async fn create(&self, session: Session) -> Result<Session, DomainError> {
        let query = r#"
            INSERT INTO sessions (
                id, user_id, token_hash, two_fa_verified, is_revoked,
                created_at, expires_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(session.id.to_string())
            .bind(session.user_id.to_string())
            .bind(&session.token_hash)
            .bind(session.two_fa_verified)
            .bind(session.is_revoked)
            .bind(session.created_at)
            .bind(session.expires_at)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to create session: {}", e)))?;

        Ok(session)
    }

    async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<Session>, DomainError> {
        let query = r#"
            SELECT id, user_id, token_hash, two_fa_verified, is_revoked,
                   created_at, expires_at
            FROM sessions
            WHERE token_hash = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(token_hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Database query failed: {}", e)))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_session(&row)?)),
            None => Ok(None),
        }
    }

    async fn revoke(&self, token_hash: &str) -> Result<bool, DomainError> {
        let query = r#"
            UPDATE sessions
            SET is_revoked = TRUE
            WHERE token_hash = ? AND is_revoked = FALSE
        "#;

        let result = sqlx::query(query)
            .bind(token_hash)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to revoke session: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }
}
