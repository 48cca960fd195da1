//! Running task inventory queries

use crate::matcher::find_matching;
use crate::task::TaskRecord;
use ecssh_foundation::Result;
use ecssh_provider::ControlPlane;
use tracing::debug;

/// Running tasks of `cluster`; empty when the cluster runs nothing
pub async fn list_tasks_in_cluster<P>(plane: &P, cluster: &str) -> Result<Vec<TaskRecord>>
where
    P: ControlPlane + ?Sized,
{
    let arns = plane.list_task_arns(cluster).await?;
    if arns.is_empty() {
        debug!(cluster, "no running tasks");
        return Ok(Vec::new());
    }

    let details = plane.describe_tasks(cluster, &arns).await?;
    Ok(details.iter().map(TaskRecord::from_detail).collect())
}

/// Running tasks of `cluster` whose definition name contains `pattern`
pub async fn find_tasks<P>(plane: &P, cluster: &str, pattern: &str) -> Result<Vec<TaskRecord>>
where
    P: ControlPlane + ?Sized,
{
    let tasks = list_tasks_in_cluster(plane, cluster).await?;
    let matching = find_matching(&tasks, pattern);
    debug!(cluster, pattern, total = tasks.len(), matching = matching.len(), "matched tasks");
    Ok(matching)
}
