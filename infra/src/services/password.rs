//! Bcrypt-backed password hashing

use pt_core::services::account::PasswordHasherTrait;

/// Password hasher using bcrypt with the library default cost
pub struct BcryptPasswordHasher;

impl BcryptPasswordHasher {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasherTrait for BcryptPasswordHasher {
    fn hash(&self, password: &str) -> Result<String, String> {
        bcrypt::hash(password, bcrypt::DEFAULT_COST)
            .map_err(|e| format!("Failed to hash password: {}", e))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, String> {
        bcrypt::verify(password, hash).map_err(|e| format!("Failed to verify password: {}", e))
    }
}
