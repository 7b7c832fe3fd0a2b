//! Main account service implementation

use rand::RngCore;
use sha2::{Digest, Sha256};
use std::sync::Arc;

use pt_shared::utils::validation::{is_valid_email, is_valid_password, MIN_PASSWORD_LENGTH};

use crate::domain::entities::session::Session;
use crate::domain::entities::user::User;
use crate::domain::value_objects::LoginSession;
use crate::errors::{AccountError, DomainError, DomainResult, ValidationError};
use crate::repositories::{SessionRepository, UserRepository};

use super::config::AccountServiceConfig;
use super::hasher::PasswordHasherTrait;

/// Account service for registration, login, and session authentication
///
/// Sessions are opaque bearer tokens: the token is generated once at
/// login and only its SHA-256 hash is stored.
pub struct AccountService<U, S, P>
where
    U: UserRepository,
    S: SessionRepository,
    P: PasswordHasherTrait,
{
    /// User repository for account persistence
    user_repository: Arc<U>,
    /// Session repository for bearer-token sessions
    session_repository: Arc<S>,
    /// Password hashing collaborator
    password_hasher: Arc<P>,
    /// Service configuration
    config: AccountServiceConfig,
}

impl<U, S, P> AccountService<U, S, P>
where
    U: UserRepository,
    S: SessionRepository,
    P: PasswordHasherTrait,
{
    /// Create a new account service
    ///
    /// # Arguments
    ///
    /// * `user_repository` - Repository for user persistence
    /// * `session_repository` - Repository for sessions
    /// * `password_hasher` - Password hashing collaborator
    /// * `config` - Service configuration
    pub fn new(
        user_repository: Arc<U>,
        session_repository: Arc<S>,
        password_hasher: Arc<P>,
        config: AccountServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            session_repository,
            password_hasher,
            config,
        }
    }

    /// Register a new account
    ///
    /// This method:
    /// 1. Validates the email shape and password length
    /// 2. Rejects already-registered emails
    /// 3. Hashes the password and creates the user with no verifications
    ///
    /// # Arguments
    ///
    /// * `email` - The account email address
    /// * `password` - The plaintext password
    /// * `display_name` - Public display name
    ///
    /// # Returns
    ///
    /// * `Ok(User)` - The created user
    /// * `Err(DomainError)` - Validation failure or duplicate email
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> DomainResult<User> {
        if !self.config.allow_registration {
            return Err(DomainError::Forbidden {
                message: "Registration is currently disabled".to_string(),
            });
        }

        if !is_valid_email(email) {
            return Err(ValidationError::InvalidEmail.into());
        }
        if !is_valid_password(password) {
            return Err(ValidationError::PasswordTooShort {
                min: MIN_PASSWORD_LENGTH,
            }
            .into());
        }
        let display_name = display_name.trim();
        if display_name.is_empty() {
            return Err(ValidationError::RequiredField {
                field: "display_name".to_string(),
            }
            .into());
        }

        if self.user_repository.exists_by_email(email).await? {
            tracing::warn!(
                event = "register_duplicate_email",
                "Registration attempted with an already registered email"
            );
            return Err(AccountError::EmailAlreadyRegistered.into());
        }

        let password_hash = self
            .password_hasher
            .hash(password)
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to hash password: {}", e),
            })?;

        let user = User::new(
            email.to_string(),
            password_hash,
            display_name.to_string(),
        );
        let user = self.user_repository.create(user).await?;

        tracing::info!(
            user_id = %user.id,
            event = "account_registered",
            "New account registered"
        );

        Ok(user)
    }

    /// Log a user in, creating a new session
    ///
    /// The plaintext bearer token is returned exactly once; storage
    /// keeps its SHA-256 hash. Credential failures never reveal which
    /// field was wrong.
    ///
    /// # Arguments
    ///
    /// * `email` - The account email address
    /// * `password` - The plaintext password
    ///
    /// # Returns
    ///
    /// * `Ok((User, LoginSession))` - The user and their new session
    /// * `Err(DomainError)` - Invalid credentials or storage failure
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<(User, LoginSession)> {
        let user = self
            .user_repository
            .find_by_email(email)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        let matches = self
            .password_hasher
            .verify(password, &user.password_hash)
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to verify password: {}", e),
            })?;
        if !matches {
            tracing::warn!(
                user_id = %user.id,
                event = "login_failed",
                "Login attempt with wrong password"
            );
            return Err(AccountError::InvalidCredentials.into());
        }

        let token = Self::generate_token();
        let session = Session::new(user.id, Self::hash_token(&token), self.config.session_ttl_days);
        let session = self.session_repository.create(session).await?;

        tracing::info!(
            user_id = %user.id,
            session_id = %session.id,
            two_factor_required = user.two_factor_enabled,
            event = "session_created",
            "User logged in"
        );

        let login = LoginSession::new(
            session.id,
            token,
            session.expires_at,
            user.two_factor_enabled,
        );
        Ok((user, login))
    }

    /// Revoke the session behind a bearer token
    ///
    /// Idempotent: revoking an unknown or already revoked token
    /// succeeds.
    ///
    /// # Arguments
    ///
    /// * `token` - The plaintext bearer token
    pub async fn logout(&self, token: &str) -> DomainResult<()> {
        let revoked = self
            .session_repository
            .revoke(&Self::hash_token(token))
            .await?;

        if revoked {
            tracing::info!(event = "session_revoked", "Session revoked by logout");
        }
        Ok(())
    }

    /// Resolve a bearer token to its user and session
    ///
    /// # Arguments
    ///
    /// * `token` - The plaintext bearer token from the Authorization header
    ///
    /// # Returns
    ///
    /// * `Ok((User, Session))` - The authenticated user and live session
    /// * `Err(DomainError)` - Unknown, revoked, or expired session
    pub async fn authenticate(&self, token: &str) -> DomainResult<(User, Session)> {
        let session = self
            .session_repository
            .find_by_token_hash(&Self::hash_token(token))
            .await?
            .ok_or(AccountError::InvalidSession)?;

        if session.is_revoked {
            return Err(AccountError::InvalidSession.into());
        }
        if session.is_expired() {
            return Err(AccountError::SessionExpired.into());
        }

        let user = self
            .user_repository
            .find_by_id(session.user_id)
            .await?
            .ok_or(AccountError::InvalidSession)?;

        Ok((user, session))
    }

    /// Generate a 256-bit opaque bearer token, hex-encoded
    fn generate_token() -> String {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        hex::encode(bytes)
    }

    /// SHA-256 hex digest of a bearer token
    fn hash_token(token: &str) -> String {
        hex::encode(Sha256::digest(token.as_bytes()))
    }
}
