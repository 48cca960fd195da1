//! `ecssh list [clusters]` and `ecssh list tasks CLUSTER`

use anyhow::Context;
use ecssh_foundation::Result;
use ecssh_provider::{ClusterRecord, ControlPlane};
use ecssh_task::{list_tasks_in_cluster, TaskRecord};
use std::io::Write;

/// Task ids longer than this are shortened in the cluster overview
const SHORT_TASK_ID_LEN: usize = 12;

pub async fn clusters<P>(plane: &P) -> anyhow::Result<()>
where
    P: ControlPlane + ?Sized,
{
    let clusters = plane
        .list_clusters()
        .await
        .context("failed to list clusters")?;
    write_clusters(plane, &clusters, &mut std::io::stdout().lock()).await?;
    Ok(())
}

pub async fn tasks<P>(plane: &P, cluster: &str) -> anyhow::Result<()>
where
    P: ControlPlane + ?Sized,
{
    let tasks = list_tasks_in_cluster(plane, cluster)
        .await
        .context("failed to list tasks")?;
    write_tasks(cluster, &tasks, &mut std::io::stdout().lock())?;
    Ok(())
}

/// Cluster overview; a failing task listing is reported inline
pub async fn write_clusters<P, W>(plane: &P, clusters: &[ClusterRecord], out: &mut W) -> Result<()>
where
    P: ControlPlane + ?Sized,
    W: Write,
{
    writeln!(out, "Available clusters:")?;
    for cluster in clusters {
        writeln!(
            out,
            "  - {} (status: {}, running tasks: {})",
            cluster.name,
            cluster.status.as_deref().unwrap_or("UNKNOWN"),
            cluster.running_tasks_count
        )?;

        if cluster.running_tasks_count > 0 {
            writeln!(out, "    Tasks:")?;
            match list_tasks_in_cluster(plane, &cluster.name).await {
                Ok(tasks) => {
                    for task in &tasks {
                        writeln!(
                            out,
                            "      • {} ({}) - {}",
                            abbreviate(task.task_id()),
                            task.definition_name,
                            container_list(task)
                        )?;
                    }
                }
                Err(e) => writeln!(out, "      Error listing tasks: {}", e)?,
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Running tasks of one cluster
pub fn write_tasks<W: Write>(cluster: &str, tasks: &[TaskRecord], out: &mut W) -> Result<()> {
    writeln!(out, "Running tasks in cluster: {}\n", cluster)?;
    for task in tasks {
        writeln!(out, "  - {}", task.task_id())?;
        writeln!(out, "    Definition: {}", task.definition_name)?;
        writeln!(out, "    Containers: {}\n", task.container_names.join(", "))?;
    }
    Ok(())
}

fn abbreviate(task_id: &str) -> String {
    if task_id.chars().count() > SHORT_TASK_ID_LEN {
        let head: String = task_id.chars().take(SHORT_TASK_ID_LEN).collect();
        format!("{}...", head)
    } else {
        task_id.to_string()
    }
}

fn container_list(task: &TaskRecord) -> String {
    if task.container_names.is_empty() {
        "none".to_string()
    } else {
        task.container_names.join(", ")
    }
}
