//! Task record - a running task reduced to what connection needs

use crate::container::running_containers;
use crate::identifier::{definition_name, short_id};
use ecssh_provider::TaskDetail;

/// Running task with its derived definition name and running containers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRecord {
    /// Full task ARN
    pub task_arn: String,

    /// Task definition family (no revision)
    pub definition_name: String,

    /// Containers observed RUNNING at query time; may be empty
    pub container_names: Vec<String>,
}

impl TaskRecord {
    pub fn new(
        task_arn: impl Into<String>,
        definition_name: impl Into<String>,
        container_names: Vec<String>,
    ) -> Self {
        Self {
            task_arn: task_arn.into(),
            definition_name: definition_name.into(),
            container_names,
        }
    }

    pub fn from_detail(detail: &TaskDetail) -> Self {
        Self {
            task_arn: detail.task_arn.clone(),
            definition_name: definition_name(&detail.task_definition_arn).to_string(),
            container_names: running_containers(&detail.containers),
        }
    }

    /// Task id (last ARN segment)
    pub fn task_id(&self) -> &str {
        short_id(&self.task_arn)
    }

    pub fn has_running_containers(&self) -> bool {
        !self.container_names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecssh_provider::ContainerDetail;

    #[test]
    fn test_from_detail() {
        let detail = TaskDetail::new(
            "arn:aws:ecs:us-east-1:1:task/prod/9a8b7c",
            "arn:aws:ecs:us-east-1:1:task-definition/web-app:3",
        )
        .with_container(ContainerDetail::new("web").with_status("RUNNING"))
        .with_container(ContainerDetail::new("migrate").with_status("STOPPED"));

        let record = TaskRecord::from_detail(&detail);
        assert_eq!(record.definition_name, "web-app");
        assert_eq!(record.task_id(), "9a8b7c");
        assert_eq!(record.container_names, vec!["web"]);
        assert!(record.has_running_containers());
    }
}
