//! DTOs for registration, login, and logout endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use pt_core::domain::entities::user::{TrustLevel, User};
use pt_core::domain::value_objects::LoginSession;

/// Request body for POST /api/v1/auth/register
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address used for login and code delivery
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    /// Plaintext password, hashed server-side before storage
    #[validate(length(min = 8, max = 128, message = "Password must be 8 to 128 characters"))]
    pub password: String,

    /// Name shown to trading partners
    #[validate(length(min = 1, max = 64, message = "Display name must be 1 to 64 characters"))]
    pub display_name: String,
}

/// Request body for POST /api/v1/auth/login
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Public view of a user account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub email_verified: bool,
    pub trust_level: TrustLevel,
    pub two_factor_enabled: bool,
    pub created_at: DateTime<Utc>,
}

impl UserResponse {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            display_name: user.display_name.clone(),
            email_verified: user.is_email_verified(),
            trust_level: user.trust_level,
            two_factor_enabled: user.two_factor_enabled,
            created_at: user.created_at,
        }
    }
}

/// Response payload for a successful login
///
/// The plaintext session token appears here exactly once; only its hash
/// is stored server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub session_id: Uuid,
    pub expires_at: DateTime<Utc>,
    /// Whether a two-factor code must still be verified on this session
    pub two_factor_required: bool,
    pub user: UserResponse,
}

impl LoginResponse {
    pub fn new(user: &User, login: LoginSession) -> Self {
        Self {
            token: login.token,
            session_id: login.session_id,
            expires_at: login.expires_at,
            two_factor_required: login.two_factor_required,
            user: UserResponse::from_user(user),
        }
    }
}
