//! Type definitions module
//!
//! This module organizes types into logical categories:
//! - `response` - API response envelope and health checks

pub mod response;

// Re-export commonly used types at module level
pub use response::{ApiResponse, HealthResponse, HealthStatus};
