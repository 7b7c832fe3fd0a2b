//! Concrete implementations of core service collaborator traits

pub mod password;
pub mod rate_limiter;

pub use password::BcryptPasswordHasher;
pub use rate_limiter::RedisRateLimiter;
