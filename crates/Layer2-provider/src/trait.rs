//! ControlPlane trait and the records it returns
//!
//! Records are plain owned data copied out of the SDK response so nothing
//! above this layer depends on SDK types.

use crate::error::ProviderError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Cluster summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterRecord {
    /// Cluster name
    pub name: String,

    /// Status label (ACTIVE, INACTIVE...), if reported
    pub status: Option<String>,

    /// Tasks currently in RUNNING state
    pub running_tasks_count: i32,
}

impl ClusterRecord {
    pub fn new(name: impl Into<String>, running_tasks_count: i32) -> Self {
        Self {
            name: name.into(),
            status: None,
            running_tasks_count,
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

/// One container of a described task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerDetail {
    pub name: String,

    /// Last reported lifecycle status
    pub last_status: Option<String>,

    /// Container runtime (docker) id
    pub runtime_id: Option<String>,
}

impl ContainerDetail {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            last_status: None,
            runtime_id: None,
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.last_status = Some(status.into());
        self
    }

    pub fn with_runtime_id(mut self, runtime_id: impl Into<String>) -> Self {
        self.runtime_id = Some(runtime_id.into());
        self
    }
}

/// A described task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDetail {
    pub task_arn: String,
    pub task_definition_arn: String,
    pub containers: Vec<ContainerDetail>,
}

impl TaskDetail {
    pub fn new(task_arn: impl Into<String>, task_definition_arn: impl Into<String>) -> Self {
        Self {
            task_arn: task_arn.into(),
            task_definition_arn: task_definition_arn.into(),
            containers: Vec::new(),
        }
    }

    pub fn with_container(mut self, container: ContainerDetail) -> Self {
        self.containers.push(container);
        self
    }
}

/// Session returned by ExecuteCommand.
///
/// Serialized with the field names the Session Manager plugin reads; absent
/// values serialize as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SessionDescriptor {
    pub session_id: Option<String>,
    pub stream_url: Option<String>,
    pub token_value: Option<String>,
}

/// ExecuteCommand parameters
#[derive(Debug, Clone, Copy)]
pub struct ExecRequest<'a> {
    pub cluster: &'a str,
    pub task: &'a str,
    pub container: &'a str,
    pub command: &'a str,
    pub interactive: bool,
}

/// Cluster/task data source and session broker endpoint.
///
/// Every call is a single request/response; implementations do not retry.
#[async_trait]
pub trait ControlPlane: Send + Sync {
    /// Region the client talks to
    fn region(&self) -> &str;

    /// All clusters visible to the caller
    async fn list_clusters(&self) -> Result<Vec<ClusterRecord>, ProviderError>;

    /// ARNs of tasks whose desired status is RUNNING
    async fn list_task_arns(&self, cluster: &str) -> Result<Vec<String>, ProviderError>;

    /// Task details, in the order the service returns them
    async fn describe_tasks(
        &self,
        cluster: &str,
        task_arns: &[String],
    ) -> Result<Vec<TaskDetail>, ProviderError>;

    /// Open an exec session into a container
    async fn request_exec_session(
        &self,
        request: ExecRequest<'_>,
    ) -> Result<SessionDescriptor, ProviderError>;
}
