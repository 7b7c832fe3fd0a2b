//! Configuration for the account service

use crate::domain::entities::session::DEFAULT_SESSION_TTL_DAYS;

/// Configuration for the account service
#[derive(Debug, Clone)]
pub struct AccountServiceConfig {
    /// Session lifetime in days
    pub session_ttl_days: i64,
    /// Whether to allow registration of new users
    pub allow_registration: bool,
}

impl Default for AccountServiceConfig {
    fn default() -> Self {
        Self {
            session_ttl_days: DEFAULT_SESSION_TTL_DAYS,
            allow_registration: true,
        }
    }
}
