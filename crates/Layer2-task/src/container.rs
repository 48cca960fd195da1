//! Container filtering and runtime id lookup

use ecssh_foundation::strings::STATUS_RUNNING;
use ecssh_foundation::{Error, Result};
use ecssh_provider::{ContainerDetail, TaskDetail};

/// Names of containers whose last status is exactly `RUNNING`, in source order
pub fn running_containers(containers: &[ContainerDetail]) -> Vec<String> {
    containers
        .iter()
        .filter(|c| c.last_status.as_deref() == Some(STATUS_RUNNING))
        .map(|c| c.name.clone())
        .collect()
}

/// Runtime id of the first container named `container_name`.
///
/// A missing container and a missing/empty runtime id are both
/// `RuntimeIdNotFound`; an empty id is never returned.
pub fn find_runtime_id(task: &TaskDetail, container_name: &str) -> Result<String> {
    task.containers
        .iter()
        .find(|c| c.name == container_name)
        .and_then(|c| c.runtime_id.as_deref())
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .ok_or_else(|| Error::RuntimeIdNotFound {
            container: container_name.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn container(name: &str, status: Option<&str>) -> ContainerDetail {
        let c = ContainerDetail::new(name);
        match status {
            Some(s) => c.with_status(s),
            None => c,
        }
    }

    #[test]
    fn test_running_containers_preserves_order() {
        let containers = vec![
            container("web", Some("RUNNING")),
            container("init", Some("STOPPED")),
            container("sidecar", Some("RUNNING")),
            container("pending", None),
        ];
        assert_eq!(running_containers(&containers), vec!["web", "sidecar"]);
    }

    #[test]
    fn test_running_is_case_sensitive() {
        let containers = vec![container("web", Some("running")), container("api", Some("Running"))];
        assert!(running_containers(&containers).is_empty());
    }

    #[test]
    fn test_running_containers_empty_input() {
        assert!(running_containers(&[]).is_empty());
    }

    #[test]
    fn test_find_runtime_id() {
        let task = TaskDetail::new("arn/task/prod/abc", "arn/def/web:1")
            .with_container(ContainerDetail::new("web").with_runtime_id("abc-123"))
            .with_container(ContainerDetail::new("sidecar"))
            .with_container(ContainerDetail::new("empty").with_runtime_id(""));

        assert_eq!(find_runtime_id(&task, "web").unwrap(), "abc-123");
        assert!(matches!(
            find_runtime_id(&task, "sidecar"),
            Err(Error::RuntimeIdNotFound { container }) if container == "sidecar"
        ));
        assert!(matches!(
            find_runtime_id(&task, "empty"),
            Err(Error::RuntimeIdNotFound { .. })
        ));
        assert!(matches!(
            find_runtime_id(&task, "missing"),
            Err(Error::RuntimeIdNotFound { container }) if container == "missing"
        ));
    }
}
