//! Static string constants shared across the workspace
//!
//! Names that appear on the wire, in the environment, or in the plugin
//! invocation live here so every crate spells them the same way.

// ============================================================================
// ECS
// ============================================================================

/// Container/task status that marks a running workload
pub const STATUS_RUNNING: &str = "RUNNING";
/// Prefix of every SSM target that points into an ECS container
pub const TARGET_KIND_ECS: &str = "ecs";
/// Service name used to build the plugin endpoint URL
pub const ECS_SERVICE: &str = "ecs";
/// Maximum identifiers accepted by a single Describe* call
pub const DESCRIBE_BATCH_SIZE: usize = 100;

// ============================================================================
// Session Manager Plugin
// ============================================================================

/// Canonical plugin executable name
pub const PLUGIN_BINARY: &str = "session-manager-plugin";
/// Plugin executable name on Windows when the canonical one is not on PATH
pub const PLUGIN_BINARY_WINDOWS: &str = "session-manager-plugin.exe";
/// Operation name passed as the plugin's third argument
pub const OPERATION_START_SESSION: &str = "StartSession";
/// Notice the plugin prints on stderr when a session opens
pub const SESSION_START_MARKER: &str = "Starting session with SessionId:";
/// Shell started inside the container
pub const DEFAULT_SHELL_COMMAND: &str = "/bin/bash";

// ============================================================================
// Environment Constants
// ============================================================================

/// Cluster name or ARN
pub const ENV_CLUSTER_ID: &str = "ECSSH_CLUSTER_ID";
/// Task definition name pattern
pub const ENV_TASK_NAME: &str = "ECSSH_TASK_NAME";
/// Plugin executable override
pub const ENV_PLUGIN: &str = "ECSSH_PLUGIN";
/// Shell command override
pub const ENV_SHELL: &str = "ECSSH_SHELL";
/// Log filter directive
pub const ENV_LOG: &str = "ECSSH_LOG";
/// AWS region (primary)
pub const ENV_AWS_REGION: &str = "AWS_REGION";
/// AWS region (fallback)
pub const ENV_AWS_DEFAULT_REGION: &str = "AWS_DEFAULT_REGION";
/// AWS named profile
pub const ENV_AWS_PROFILE: &str = "AWS_PROFILE";
