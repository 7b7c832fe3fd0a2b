//! MySQL implementation of the NotificationRepository trait.
//!
//! Global announcements are rows with a NULL `user_id`. Their per-user
//! read state lives in the `notification_reads` marker table, which has
//! a unique key on (notification_id, user_id) so marker inserts stay
//! idempotent.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use pt_core::domain::entities::notification::{Notification, NotificationRead};
use pt_core::errors::DomainError;
use pt_core::repositories::NotificationRepository;

/// MySQL implementation of NotificationRepository
pub struct MySqlNotificationRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlNotificationRepository {
    /// Create a new MySQL notification repository
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to Notification entity
    fn row_to_notification(row: &sqlx::mysql::MySqlRow) -> Result<Notification, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::internal(format!("Failed to get id: {}", e)))?;
        let user_id: Option<String> = row
            .try_get("user_id")
            .map_err(|e| DomainError::internal(format!("Failed to get user_id: {}", e)))?;

        let user_id = user_id
            .map(|s| {
                Uuid::parse_str(&s)
                    .map_err(|e| DomainError::internal(format!("Invalid user UUID: {}", e)))
            })
            .transpose()?;

        Ok(Notification {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::internal(format!("Invalid notification UUID: {}", e)))?,
            user_id,
            title: row
                .try_get("title")
                .map_err(|e| DomainError::internal(format!("Failed to get title: {}", e)))?,
            body: row
                .try_get("body")
                .map_err(|e| DomainError::internal(format!("Failed to get body: {}", e)))?,
            read_at: row
                .try_get::<Option<DateTime<Utc>>, _>("read_at")
                .map_err(|e| DomainError::internal(format!("Failed to get read_at: {}", e)))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::internal(format!("Failed to get created_at: {}", e)))?,
        })
    }
}

#[async_trait]
impl NotificationRepository for MySqlNotificationRepository {
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Notification>, DomainError> {
        let query = r#"
            SELECT id, user_id, title, body, read_at, created_at
            FROM notifications
            WHERE user_id = ? OR user_id IS NULL
            ORDER BY created_at DESC
        "#;

        let rows = sqlx::query(query)
            .bind(user_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to list notifications: {}", e)))?;

        let mut notifications = Vec::with_capacity(rows.len());
        for row in rows {
            notifications.push(Self::row_to_notification(&row)?);
        }

        Ok(notifications)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Notification>, DomainError> {
        let query = r#"
            SELECT id, user_id, title, body, read_at, created_at
            FROM notifications
            WHERE id = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Database query failed: {}", e)))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_notification(&row)?)),
            None => Ok(None),
        }
    }

    async fn insert(&self, notification: Notification) -> Result<Notification, DomainError> {
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
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to insert notification: {}", e)))?;

        Ok(notification)
    }

    async fn mark_read(&self, id: Uuid) -> Result<bool, DomainError> {
        let query = r#"
            UPDATE notifications
            SET read_at = ?
            WHERE id = ? AND read_at IS NULL
        "#;

        let result = sqlx::query(query)
            .bind(Utc::now())
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to mark notification: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn insert_read_marker(&self, marker: NotificationRead) -> Result<(), DomainError> {
        let query = r#"
            INSERT IGNORE INTO notification_reads (
                id, notification_id, user_id, read_at
            ) VALUES (?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(marker.id.to_string())
            .bind(marker.notification_id.to_string())
            .bind(marker.user_id.to_string())
            .bind(marker.read_at)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to insert read marker: {}", e)))?;

        Ok(())
    }

    async fn list_read_marker_ids(&self, user_id: Uuid) -> Result<Vec<Uuid>, DomainError> {
        let query = r#"
            SELECT notification_id
            FROM notification_reads
            WHERE user_id = ?
        "#;

        let rows = sqlx::query(query)
            .bind(user_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to list read markers: {}", e)))?;

        let mut ids = Vec::with_capacity(rows.len());
        for row in rows {
            let id: String = row
                .try_get("notification_id")
                .map_err(|e| {
                    DomainError::internal(format!("Failed to get notification_id: {}", e))
                })?;
            ids.push(
                Uuid::parse_str(&id).map_err(|e| {
                    DomainError::internal(format!("Invalid notification UUID: {}", e))
                })?,
            );
        }

        Ok(ids)
    }
}
