//! Control plane error types
//!
//! ProviderError keeps the failing API operation next to the message and
//! converts into `ecssh_foundation::Error::ControlPlane`.

use ecssh_foundation::Error as FoundationError;
use thiserror::Error;

/// Errors that can occur during control plane calls
#[derive(Error, Debug, Clone)]
pub enum ProviderError {
    /// Transport or service error returned by an API call
    #[error("{operation} failed: {message}")]
    Api {
        operation: &'static str,
        message: String,
    },

    /// Call succeeded but the response lacks a required field
    #[error("{operation} returned an invalid response: {message}")]
    InvalidResponse {
        operation: &'static str,
        message: String,
    },

    /// Client could not be configured (no region, ...)
    #[error("Control plane not configured: {0}")]
    NotConfigured(String),
}

impl ProviderError {
    pub fn api(operation: &'static str, message: impl Into<String>) -> Self {
        ProviderError::Api {
            operation,
            message: message.into(),
        }
    }

    pub fn invalid_response(operation: &'static str, message: impl Into<String>) -> Self {
        ProviderError::InvalidResponse {
            operation,
            message: message.into(),
        }
    }
}

// ============================================================================
// ecssh_foundation::Error conversion
// ============================================================================

impl From<ProviderError> for FoundationError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Api { operation, message } => {
                FoundationError::ControlPlane { operation, message }
            }
            ProviderError::InvalidResponse { operation, message } => FoundationError::ControlPlane {
                operation,
                message: format!("invalid response: {}", message),
            },
            ProviderError::NotConfigured(msg) => FoundationError::Config(msg),
        }
    }
}
