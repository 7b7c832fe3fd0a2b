//! Password hashing collaborator trait

/// Trait for password hashing integration
///
/// Hashing is CPU-bound and synchronous; implementations backed by a
/// slow KDF should be called from a blocking-friendly context.
pub trait PasswordHasherTrait: Send + Sync {
    /// Hash a plaintext password
    fn hash(&self, password: &str) -> Result<String, String>;

    /// Check a plaintext password against a stored hash
    fn verify(&self, password: &str, hash: &str) -> Result<bool, String>;
}
