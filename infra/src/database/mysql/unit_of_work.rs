//! MySQL unit of work backed by a sqlx transaction.
//!
//! Each [`MySqlTxScope`] owns one open transaction. Every operation
//! executes immediately against that transaction, so nothing becomes
//! visible to other connections until `commit`.

use async_trait::async_trait;
use sqlx::{MySql, MySqlPool};
use uuid::Uuid;

use pt_core::domain::entities::notification::Notification;
use pt_core::domain::entities::user::User;
use pt_core::domain::entities::verification_record::VerificationRecord;
use pt_core::errors::{AccountError, DomainError, DomainResult};
use pt_core::repositories::{TxScope, UnitOfWork};

/// MySQL implementation of UnitOfWork
pub struct MySqlUnitOfWork {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUnitOfWork {
    /// Create a new MySQL unit of work
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UnitOfWork for MySqlUnitOfWork {
    async fn begin(&self) -> DomainResult<Box<dyn TxScope>> {
        let tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::internal(format!("Failed to begin transaction: {}", e)))?;

        Ok(Box::new(MySqlTxScope { tx }))
    }
}

/// One open MySQL transaction
pub struct MySqlTxScope {
    tx: sqlx::Transaction<'static, MySql>,
}

#[async_trait]
impl TxScope for MySqlTxScope {
    async fn delete_code(&mut self, user_id: Uuid) -> DomainResult<bool> {
        let query = "DELETE FROM one_time_codes WHERE user_id = ?";

        let result = sqlx::query(query)
            .bind(user_id.to_string())
            .execute(&mut *self.tx)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to delete code: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn save_user(&mut self, user: &User) -> DomainResult<()> {
        let query = r#"
            UPDATE users
            SET email = ?, password_hash = ?, display_name = ?, phone = ?,
                email_verified_at = ?, number_verified_at = ?, id_verified_at = ?,
                trust_level = ?, two_factor_enabled = ?, is_admin = ?, updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.display_name)
            .bind(&user.phone)
            .bind(user.email_verified_at)
            .bind(user.number_verified_at)
            .bind(user.id_verified_at)
            .bind(user.trust_level.as_i32())
            .bind(user.two_factor_enabled)
            .bind(user.is_admin)
            .bind(user.updated_at)
            .bind(user.id.to_string())
            .execute(&mut *self.tx)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to save user: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(AccountError::UserNotFound.into());
        }

        Ok(())
    }

    async fn mark_session_verified(&mut self, session_id: Uuid) -> DomainResult<()> {
        let query = "UPDATE sessions SET two_fa_verified = TRUE WHERE id = ?";

        let result = sqlx::query(query)
            .bind(session_id.to_string())
            .execute(&mut *self.tx)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to mark session: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("session"));
        }

        Ok(())
    }

    async fn insert_notification(&mut self, notification: &Notification) -> DomainResult<()> {
        let query = r#"
            INSERT INTO notifications (
                id, user_id, title, body, read_at, created_at
            ) VALUES (?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(notification.id.to_string())
            .bind(notification.user_id.map(|id| id.to_string()))
            .bind(&notification.title)
            .bind(&notification.body)
            .bind(notification.read_at)
            .bind(notification.created_at)
            .execute(&mut *self.tx)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to insert notification: {}", e)))?;

        Ok(())
    }

    async fn replace_verification_record(
        &mut self,
        record: &VerificationRecord,
    ) -> DomainResult<()> {
        // The unique key on user_id makes REPLACE drop any prior record
        // for the same user before inserting the fresh one.
        let query = r#"
            REPLACE INTO verification_records (
                id, user_id, kind, document_type, front_document, back_document,
                country, region, address, status, note, reviewed_at,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(record.id.to_string())
            .bind(record.user_id.to_string())
            .bind(record.kind.as_str())
            .bind(record.document_type.as_str())
            .bind(&record.front_document)
            .bind(&record.back_document)
            .bind(&record.country)
            .bind(&record.region)
            .bind(&record.address)
            .bind(record.status.as_str())
            .bind(&record.note)
            .bind(record.reviewed_at)
            .bind(record.created_at)
            .bind(record.updated_at)
            .execute(&mut *self.tx)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to replace record: {}", e)))?;

        Ok(())
    }

    async fn update_verification_record(
        &mut self,
        record: &VerificationRecord,
    ) -> DomainResult<()> {
        let query = r#"
            UPDATE verification_records
            SET kind = ?, document_type = ?, front_document = ?, back_document = ?,
                country = ?, region = ?, address = ?, status = ?, note = ?,
                reviewed_at = ?, updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(record.kind.as_str())
            .bind(record.document_type.as_str())
            .bind(&record.front_document)
            .bind(&record.back_document)
            .bind(&record.country)
            .bind(&record.region)
            .bind(&record.address)
            .bind(record.status.as_str())
            .bind(&record.note)
            .bind(record.reviewed_at)
            .bind(record.updated_at)
            .bind(record.id.to_string())
            .execute(&mut *self.tx)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to update record: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("verification record"));
        }

        Ok(())
    }

    async fn commit(self: Box<Self>) -> DomainResult<()> {
        self.tx
            .commit()
            .await
            .map_err(|e| DomainError::internal(format!("Failed to commit transaction: {}", e)))
    }

    async fn rollback(self: Box<Self>) -> DomainResult<()> {
        self.tx
            .rollback()
            .await
            .map_err(|e| DomainError::internal(format!("Failed to roll back transaction: {}", e)))
    }
}
