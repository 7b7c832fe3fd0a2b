//! MySQL implementation of the UserRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use pt_core::domain::entities::user::{TrustLevel, User};
use pt_core::errors::{AccountError, DomainError};
use pt_core::repositories::UserRepository;

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to User entity
    pub(crate) fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::internal(format!("Failed to get id: {}", e)))?;
        let trust_level: i32 = row
            .try_get("trust_level")
            .map_err(|e| DomainError::internal(format!("Failed to get trust_level: {}", e)))?;

        Ok(User {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::internal(format!("Invalid user UUID: {}", e)))?,
            email: row
                .try_get("email")
                .map_err(|e| DomainError::internal(format!("Failed to get email: {}", e)))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| DomainError::internal(format!("Failed to get password_hash: {}", e)))?,
            display_name: row
                .try_get("display_name")
                .map_err(|e| DomainError::internal(format!("Failed to get display_name: {}", e)))?,
            phone: row
                .try_get("phone")
                .map_err(|e| DomainError::internal(format!("Failed to get phone: {}", e)))?,
            email_verified_at: row
                .try_get::<Option<DateTime<Utc>>, _>("email_verified_at")
                .map_err(|e| {
                    DomainError::internal(format!("Failed to get email_verified_at: {}", e))
                })?,
            number_verified_at: row
                .try_get::<Option<DateTime<Utc>>, _>("number_verified_at")
                .map_err(|e| {
                    DomainError::internal(format!("Failed to get number_verified_at: {}", e))
                })?,
            id_verified_at: row
                .try_get::<Option<DateTime<Utc>>, _>("id_verified_at")
                .map_err(|e| {
                    DomainError::internal(format!("Failed to get id_verified_at: {}", e))
                })?,
            trust_level: TrustLevel::from_i32(trust_level),
            two_factor_enabled: row.try_get("two_factor_enabled").map_err(|e| {
                DomainError::internal(format!("Failed to get two_factor_enabled: {}", e))
            })?,
            is_admin: row
                .try_get("is_admin")
                .map_err(|e| DomainError::internal(format!("Failed to get is_admin: {}", e)))?,
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
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT id, email, password_hash, display_name, phone,
                   email_verified_at, number_verified_at, id_verified_at,
                   trust_level, two_factor_enabled, is_admin,
                   created_at, updated_at
            FROM users
            WHERE id = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Database query failed: {}", e)))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT id, email, password_hash, display_name, phone,
                   email_verified_at, number_verified_at, id_verified_at,
                   trust_level, two_factor_enabled, is_admin,
                   created_at, updated_at
            FROM users
            WHERE email = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Database query failed: {}", e)))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        if self.exists_by_email(&user.email).await? {
            return Err(AccountError::EmailAlreadyRegistered.into());
        }

        let query = r#"
            INSERT INTO users (
                id, email, password_hash, display_name, phone,
                email_verified_at, number_verified_at, id_verified_at,
                trust_level, two_factor_enabled, is_admin,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(user.id.to_string())
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
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to create user: {}", e)))?;

        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            UPDATE users SET
                email = ?,
                password_hash = ?,
                display_name = ?,
                phone = ?,
                email_verified_at = ?,
                number_verified_at = ?,
                id_verified_at = ?,
                trust_level = ?,
                two_factor_enabled = ?,
                is_admin = ?,
                updated_at = ?
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
            .bind(Utc::now())
            .bind(user.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to update user: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(AccountError::UserNotFound.into());
        }

        let mut updated_user = user;
        updated_user.updated_at = Utc::now();
        Ok(updated_user)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let query = r#"
            SELECT EXISTS(
                SELECT 1 FROM users WHERE email = ?
            ) as user_exists
        "#;

        let result = sqlx::query(query)
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to check user existence: {}", e)))?;

        let exists: i8 = result
            .try_get("user_exists")
            .map_err(|e| DomainError::internal(format!("Failed to get existence result: {}", e)))?;

        Ok(exists == 1)
    }
}
