//! User entity representing a registered account on the PeerTrade platform.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Trust tier derived from identity verification checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrustLevel {
    /// Default tier for new accounts
    Basic,
    /// Unlocked once email, phone, and ID are all verified
    Trusted,
}

impl TrustLevel {
    /// Numeric representation used for storage
    pub fn as_i32(&self) -> i32 {
        match self {
            TrustLevel::Basic => 0,
            TrustLevel::Trusted => 1,
        }
    }

    /// Build from the stored numeric representation
    pub fn from_i32(value: i32) -> Self {
        if value >= 1 {
            TrustLevel::Trusted
        } else {
            TrustLevel::Basic
        }
    }
}

/// User entity representing a registered account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Email address used for login and OTP delivery
    pub email: String,

    /// Bcrypt hash of the account password
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Name shown to trading partners
    pub display_name: String,

    /// Optional phone number (E.164 format)
    pub phone: Option<String>,

    /// When the email address was verified
    pub email_verified_at: Option<DateTime<Utc>>,

    /// When the phone number was verified
    pub number_verified_at: Option<DateTime<Utc>>,

    /// When the identity document was verified
    pub id_verified_at: Option<DateTime<Utc>>,

    /// Derived trust tier
    pub trust_level: TrustLevel,

    /// Whether trades and logins require a second factor
    pub two_factor_enabled: bool,

    /// Whether the user can review verification submissions
    pub is_admin: bool,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new User with all verification flags unset
    pub fn new(email: String, password_hash: String, display_name: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            password_hash,
            display_name,
            phone: None,
            email_verified_at: None,
            number_verified_at: None,
            id_verified_at: None,
            trust_level: TrustLevel::Basic,
            two_factor_enabled: false,
            is_admin: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the phone number
    pub fn set_phone(&mut self, phone: String) {
        self.phone = Some(phone);
        self.updated_at = Utc::now();
    }

    /// Marks the email address as verified
    pub fn verify_email(&mut self) {
        if self.email_verified_at.is_none() {
            self.email_verified_at = Some(Utc::now());
            self.updated_at = Utc::now();
        }
    }

    /// Marks the phone number as verified
    pub fn verify_number(&mut self) {
        if self.number_verified_at.is_none() {
            self.number_verified_at = Some(Utc::now());
            self.updated_at = Utc::now();
        }
    }

    /// Marks the identity document as verified
    pub fn verify_id(&mut self) {
        if self.id_verified_at.is_none() {
            self.id_verified_at = Some(Utc::now());
            self.updated_at = Utc::now();
        }
    }

    /// Enables two-factor gating for logins and trades
    pub fn enable_two_factor(&mut self) {
        self.two_factor_enabled = true;
        self.updated_at = Utc::now();
    }

    /// Disables two-factor gating
    pub fn disable_two_factor(&mut self) {
        self.two_factor_enabled = false;
        self.updated_at = Utc::now();
    }

    /// Checks whether the email address has been verified
    pub fn is_email_verified(&self) -> bool {
        self.email_verified_at.is_some()
    }

    /// Checks whether all three identity checks have passed
    pub fn is_fully_verified(&self) -> bool {
        self.email_verified_at.is_some()
            && self.number_verified_at.is_some()
            && self.id_verified_at.is_some()
    }

    /// Promotes the trust level if every identity check has passed
    ///
    /// Promotion is monotonic: an already-trusted user is left unchanged.
    ///
    /// # Returns
    ///
    /// `true` if the trust level was raised by this call
    pub fn promote_trust_if_fully_verified(&mut self) -> bool {
        if self.is_fully_verified() && self.trust_level < TrustLevel::Trusted {
            self.trust_level = TrustLevel::Trusted;
            self.updated_at = Utc::now();
            true
        } else {
            false
        }
    }
}
