//! Session broker - turns (cluster, task, container) into a plugin invocation
//!
//! Steps, each one fatal on failure:
//! 1. ExecuteCommand for the container (interactive shell)
//! 2. serialize the returned session
//! 3. describe the task again to find the container's runtime id
//! 4. build and serialize the `ecs:<cluster>_<task>_<runtime>` target

use crate::container::find_runtime_id;
use crate::identifier::short_id;
use ecssh_foundation::strings::{
    DEFAULT_SHELL_COMMAND, ECS_SERVICE, OPERATION_START_SESSION, TARGET_KIND_ECS,
};
use ecssh_foundation::{Error, Result};
use ecssh_provider::{ControlPlane, ExecRequest};
use serde::Serialize;
use std::fmt;
use tracing::debug;

// ============================================================================
// Channel target
// ============================================================================

/// SSM target of an ECS container: `ecs:<cluster>_<taskId>_<runtimeId>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelTarget {
    cluster: String,
    task_id: String,
    runtime_id: String,
}

/// Wire form handed to the plugin
#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct StartSessionTarget<'a> {
    target: &'a str,
}

impl ChannelTarget {
    /// All three components must be non-empty
    pub fn new(
        cluster: impl Into<String>,
        task_id: impl Into<String>,
        runtime_id: impl Into<String>,
    ) -> Result<Self> {
        let target = Self {
            cluster: cluster.into(),
            task_id: task_id.into(),
            runtime_id: runtime_id.into(),
        };
        for (field, value) in [
            ("cluster", &target.cluster),
            ("task id", &target.task_id),
            ("runtime id", &target.runtime_id),
        ] {
            if value.is_empty() {
                return Err(Error::InvalidTarget(format!("empty {}", field)));
            }
        }
        Ok(target)
    }

    /// `{"Target":"ecs:..."}`
    pub fn to_wire(&self) -> Result<String> {
        let target = self.to_string();
        Ok(serde_json::to_string(&StartSessionTarget { target: &target })?)
    }
}

impl fmt::Display for ChannelTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}_{}_{}",
            TARGET_KIND_ECS, self.cluster, self.task_id, self.runtime_id
        )
    }
}

// ============================================================================
// Plugin invocation
// ============================================================================

/// Everything the Session Manager plugin needs on its command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginInvocation {
    /// Serialized session descriptor
    pub session_json: String,
    pub region: String,
    /// Serialized channel target
    pub target_json: String,
}

impl PluginInvocation {
    /// `https://ecs.<region>.amazonaws.com`
    pub fn endpoint_url(&self) -> String {
        format!("https://{}.{}.amazonaws.com", ECS_SERVICE, self.region)
    }

    /// Positional arguments in plugin order
    pub fn args(&self) -> Vec<String> {
        vec![
            self.session_json.clone(),
            self.region.clone(),
            OPERATION_START_SESSION.to_string(),
            // profile slot; credentials are already baked into the session
            String::new(),
            self.target_json.clone(),
            self.endpoint_url(),
        ]
    }
}

// ============================================================================
// Broker
// ============================================================================

/// Brokers exec sessions through a control plane handle
pub struct SessionBroker<'a, P: ControlPlane + ?Sized> {
    plane: &'a P,
    shell_command: String,
}

impl<'a, P: ControlPlane + ?Sized> SessionBroker<'a, P> {
    pub fn new(plane: &'a P) -> Self {
        Self {
            plane,
            shell_command: DEFAULT_SHELL_COMMAND.to_string(),
        }
    }

    pub fn with_shell_command(mut self, command: impl Into<String>) -> Self {
        self.shell_command = command.into();
        self
    }

    /// Run the four broker steps for one container
    pub async fn broker(&self, cluster: &str, task_arn: &str, container: &str) -> Result<PluginInvocation> {
        let session = self
            .plane
            .request_exec_session(ExecRequest {
                cluster,
                task: task_arn,
                container,
                command: &self.shell_command,
                interactive: true,
            })
            .await
            .map_err(|e| Error::SessionRequest {
                cluster: cluster.to_string(),
                task: task_arn.to_string(),
                container: container.to_string(),
                message: e.to_string(),
            })?;
        let session_json = serde_json::to_string(&session)?;
        debug!(session_id = ?session.session_id, "exec session granted");

        let runtime_id = self.runtime_id(cluster, task_arn, container).await?;
        let target = ChannelTarget::new(cluster, short_id(task_arn), runtime_id)?;
        debug!(target = %target, "built channel target");

        Ok(PluginInvocation {
            session_json,
            region: self.plane.region().to_string(),
            target_json: target.to_wire()?,
        })
    }

    /// Runtime id of `container` in a freshly described task
    pub async fn runtime_id(&self, cluster: &str, task_arn: &str, container: &str) -> Result<String> {
        let tasks = self
            .plane
            .describe_tasks(cluster, &[task_arn.to_string()])
            .await?;
        let task = tasks.first().ok_or_else(|| Error::TaskNotFound {
            cluster: cluster.to_string(),
            task: task_arn.to_string(),
        })?;
        find_runtime_id(task, container)
    }
}
