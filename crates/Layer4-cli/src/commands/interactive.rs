//! Interactive mode: pick cluster, task definition, task and container

use super::{connect, prompt};
use ecssh_foundation::{EcsshConfig, Error, Result};
use ecssh_provider::{ClusterRecord, ControlPlane};
use ecssh_task::{
    choose, group_by_definition, list_tasks_in_cluster, resolve, select_container, Choice,
    Chooser, PromptChooser, TaskGroup, TaskRecord,
};

/// What the operator picked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub cluster: String,
    pub task: TaskRecord,
    pub container: String,
}

pub async fn run<P>(plane: &P, config: &EcsshConfig) -> anyhow::Result<()>
where
    P: ControlPlane + ?Sized,
{
    let selection = {
        let mut chooser = PromptChooser::stdio();
        pick(plane, &mut chooser).await?
    };

    println!(
        "\nConnecting to {} in task {}...",
        selection.container,
        selection.task.task_id()
    );

    connect::launch(
        plane,
        config,
        &selection.cluster,
        &selection.task.task_arn,
        &selection.container,
    )
    .await?;
    Ok(())
}

/// Walk the operator through every selection step
pub async fn pick<P, C>(plane: &P, chooser: &mut C) -> Result<Selection>
where
    P: ControlPlane + ?Sized,
    C: Chooser,
{
    let clusters = plane.list_clusters().await?;
    if clusters.is_empty() {
        return Err(Error::NoClusters);
    }
    let choices = clusters.into_iter().map(cluster_choice).collect();
    let cluster = prompt(|| choose("Select cluster:", "clusters", choices, &mut *chooser))?;

    let tasks = list_tasks_in_cluster(plane, &cluster).await?;
    if tasks.is_empty() {
        return Err(Error::NoRunningTasks { cluster });
    }

    let choices = group_by_definition(tasks).into_iter().map(group_choice).collect();
    let group = prompt(|| choose("Select task definition:", "task definitions", choices, &mut *chooser))?;

    let choices = group.tasks.into_iter().map(task_choice).collect();
    let task = prompt(|| resolve("Select task:", "tasks", choices, false, &mut *chooser))?;

    let container = prompt(|| select_container(&task.container_names, false, &mut *chooser))?;

    Ok(Selection {
        cluster,
        task,
        container,
    })
}

fn cluster_choice(record: ClusterRecord) -> Choice<String> {
    let label = if record.running_tasks_count > 0 {
        format!("{} ({} running tasks)", record.name, record.running_tasks_count)
    } else {
        format!("{} (no running tasks)", record.name)
    };
    Choice::new(label, record.name)
}

fn group_choice(group: TaskGroup) -> Choice<TaskGroup> {
    Choice::new(
        format!("{} ({} tasks)", group.definition_name, group.tasks.len()),
        group,
    )
}

fn task_choice(task: TaskRecord) -> Choice<TaskRecord> {
    Choice::new(
        format!("{} - Containers: {}", task.task_id(), task.container_names.join(", ")),
        task,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fake::{task, FakePlane, Script};

    fn plane() -> FakePlane {
        FakePlane::default()
            .with_cluster(ClusterRecord::new("idle", 0), Vec::new())
            .with_cluster(
                ClusterRecord::new("prod", 3),
                vec![
                    task("aaa111", "web-app:3", &[("web", "RUNNING"), ("sidecar", "RUNNING")]),
                    task("bbb222", "worker:7", &[("worker", "RUNNING")]),
                    task("ccc333", "web-app:3", &[("web", "RUNNING")]),
                ],
            )
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_full_walkthrough() {
        // cluster "prod", group "web-app", second task, its only container
        let mut chooser = Script::answering(&[1, 0, 1]);
        let selection = pick(&plane(), &mut chooser).await.unwrap();

        assert_eq!(selection.cluster, "prod");
        assert_eq!(selection.task.task_id(), "ccc333");
        assert_eq!(selection.container, "web");

        let prompts: Vec<_> = chooser.prompts.iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(prompts, vec!["Select cluster:", "Select task definition:", "Select task:"]);
        assert_eq!(
            chooser.prompts[0].1,
            vec!["idle (no running tasks)", "prod (3 running tasks)"]
        );
        assert_eq!(chooser.prompts[1].1, vec!["web-app (2 tasks)", "worker (1 tasks)"]);
        assert_eq!(
            chooser.prompts[2].1,
            vec!["aaa111 - Containers: web, sidecar", "ccc333 - Containers: web"]
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_single_task_group_asks_for_container() {
        let plane = FakePlane::default().with_cluster(
            ClusterRecord::new("prod", 1),
            vec![task("aaa111", "web-app:3", &[("web", "RUNNING"), ("sidecar", "RUNNING")])],
        );
        let mut chooser = Script::answering(&[0, 0, 1]);
        let selection = pick(&plane, &mut chooser).await.unwrap();

        assert_eq!(selection.container, "sidecar");
        let prompts: Vec<_> = chooser.prompts.iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(prompts, vec!["Select cluster:", "Select task definition:", "Select container:"]);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_no_clusters() {
        let err = pick(&FakePlane::default(), &mut Script::default()).await.unwrap_err();
        assert!(matches!(err, Error::NoClusters));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_cluster_without_tasks() {
        let mut chooser = Script::answering(&[0]);
        let err = pick(&plane(), &mut chooser).await.unwrap_err();
        assert!(matches!(err, Error::NoRunningTasks { ref cluster } if cluster == "idle"));
    }
}
