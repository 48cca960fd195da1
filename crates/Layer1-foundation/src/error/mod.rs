//! Error types for ecssh
//!
//! Every failure of the resolve-and-connect pipeline maps to exactly one
//! variant here. Identifiers involved in the failure are kept as fields so
//! callers and tests can match on them instead of parsing messages.

use std::process::ExitStatus;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// ecssh error type
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Configuration / input
    // ========================================================================
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // ========================================================================
    // Control plane (transport / API)
    // ========================================================================
    #[error("{operation} failed: {message}")]
    ControlPlane {
        operation: &'static str,
        message: String,
    },

    #[error("could not open exec session in container {container} of task {task} (cluster {cluster}): {message}")]
    SessionRequest {
        cluster: String,
        task: String,
        container: String,
        message: String,
    },

    // ========================================================================
    // Not found
    // ========================================================================
    #[error("no ECS clusters found")]
    NoClusters,

    #[error("no running tasks in cluster {cluster}")]
    NoRunningTasks { cluster: String },

    #[error("no tasks matching '{pattern}'")]
    NoMatchingTasks { pattern: String },

    #[error("no {what} available")]
    NoChoices { what: String },

    #[error("task {task} not found in cluster {cluster}")]
    TaskNotFound { cluster: String, task: String },

    #[error("runtime ID not found for container {container}")]
    RuntimeIdNotFound { container: String },

    // ========================================================================
    // Serialization
    // ========================================================================
    #[error("failed to serialize payload: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid channel target: {0}")]
    InvalidTarget(String),

    // ========================================================================
    // Interactive input
    // ========================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("input closed before a selection was made")]
    InputClosed,

    // ========================================================================
    // Channel client subprocess
    // ========================================================================
    #[error("failed to start {binary}")]
    PluginLaunch {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{status}")]
    PluginExited { status: ExitStatus },
}

impl Error {
    /// Control plane error helper
    pub fn control_plane(operation: &'static str, message: impl Into<String>) -> Self {
        Error::ControlPlane {
            operation,
            message: message.into(),
        }
    }

    /// Process exit code to report for this error.
    ///
    /// A channel client that exited with a code passes it through unchanged.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::PluginExited { status } => status.code().unwrap_or(1),
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_messages_carry_identifiers() {
        let err = Error::NoMatchingTasks {
            pattern: "web-app".to_string(),
        };
        assert_eq!(err.to_string(), "no tasks matching 'web-app'");

        let err = Error::RuntimeIdNotFound {
            container: "sidecar".to_string(),
        };
        assert_eq!(err.to_string(), "runtime ID not found for container sidecar");
    }

    #[test]
    fn test_control_plane_helper() {
        let err = Error::control_plane("ListClusters", "access denied");
        assert_eq!(err.to_string(), "ListClusters failed: access denied");
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_no_choices_message() {
        let err = Error::NoChoices {
            what: "containers".to_string(),
        };
        assert_eq!(err.to_string(), "no containers available");
    }
}
