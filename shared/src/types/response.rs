//! API response types and wrappers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Standard JSON envelope returned by every endpoint
///
/// Success and failure share the same shape so clients can branch on the
/// `status` flag alone:
///
/// ```json
/// { "status": true, "message": "Code sent", "data": { ... } }
/// { "status": false, "message": "OTP has expired", "errors": { ... } }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful
    pub status: bool,

    /// Human-readable outcome message
    pub message: String,

    /// Response payload (present when the operation yields data)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    /// Diagnostic details (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<serde_json::Value>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response without payload
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: true,
            message: message.into(),
            data: None,
            errors: None,
        }
    }

    /// Create a successful response carrying data
    pub fn success_with_data(message: impl Into<String>, data: T) -> Self {
        Self {
            status: true,
            message: message.into(),
            data: Some(data),
            errors: None,
        }
    }

    /// Create an error response
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: false,
            message: message.into(),
            data: None,
            errors: None,
        }
    }

    /// Create an error response with diagnostic details
    pub fn error_with_details(message: impl Into<String>, errors: serde_json::Value) -> Self {
        Self {
            status: false,
            message: message.into(),
            data: None,
            errors: Some(errors),
        }
    }

    /// Check if the response is successful
    pub fn is_success(&self) -> bool {
        self.status
    }

    /// Extract the data, consuming the response
    pub fn into_data(self) -> Option<T> {
        self.data
    }

    /// Map the data to a different type
    pub fn map<U, F>(self, f: F) -> ApiResponse<U>
    where
        F: FnOnce(T) -> U,
    {
        ApiResponse {
            status: self.status,
            message: self.message,
            data: self.data.map(f),
            errors: self.errors,
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall health status
    pub status: HealthStatus,

    /// Service name
    pub service: String,

    /// Server timestamp
    pub timestamp: DateTime<Utc>,

    /// Server version
    pub version: String,
}

/// Health status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}
