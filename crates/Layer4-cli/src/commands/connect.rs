//! Direct connection: `ecssh [-f] [-v] CLUSTER TASK`

use super::prompt;
use anyhow::Context;
use ecssh_foundation::{EcsshConfig, Error, Result};
use ecssh_provider::ControlPlane;
use ecssh_task::{
    find_tasks, select_container, Chooser, PluginSupervisor, PromptChooser, SessionBroker,
    TaskRecord,
};
use std::io::Write;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default)]
pub struct ConnectOptions {
    /// Take the first container without asking
    pub force: bool,
    /// Print progress lines
    pub verbose: bool,
}

/// Resolve the target and hand the terminal to the plugin
pub async fn run<P>(
    plane: &P,
    config: &EcsshConfig,
    cluster: &str,
    pattern: &str,
    options: ConnectOptions,
) -> anyhow::Result<()>
where
    P: ControlPlane + ?Sized,
{
    // The stdin lock is released before the plugin takes over the terminal.
    let (task, container) = {
        let mut chooser = PromptChooser::stdio();
        let mut out = std::io::stdout();
        resolve_target(plane, cluster, pattern, options, &mut chooser, &mut out)
            .await
            .context("connection failed")?
    };

    launch(plane, config, cluster, &task.task_arn, &container)
        .await
        .context("connection failed")
}

/// First matching task and the container to open
pub async fn resolve_target<P, C, W>(
    plane: &P,
    cluster: &str,
    pattern: &str,
    options: ConnectOptions,
    chooser: &mut C,
    out: &mut W,
) -> Result<(TaskRecord, String)>
where
    P: ControlPlane + ?Sized,
    C: Chooser,
    W: Write,
{
    if options.verbose {
        writeln!(out, "Searching for tasks in cluster: {}", cluster)?;
        writeln!(out, "Task name pattern: {}", pattern)?;
    }

    let task = find_tasks(plane, cluster, pattern)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| Error::NoMatchingTasks {
            pattern: pattern.to_string(),
        })?;

    if options.verbose {
        writeln!(out, "Found matching task: {}", task.task_id())?;
        writeln!(out, "Found {} running container(s)", task.container_names.len())?;
    }

    let container = prompt(|| select_container(&task.container_names, options.force, chooser))?;

    if options.verbose {
        writeln!(out, "Selected container: {}", container)?;
    }
    debug!(cluster, task = %task.task_id(), container = %container, "resolved target");

    Ok((task, container))
}

/// Broker a session for the container and run the plugin to completion
pub async fn launch<P>(
    plane: &P,
    config: &EcsshConfig,
    cluster: &str,
    task_arn: &str,
    container: &str,
) -> Result<()>
where
    P: ControlPlane + ?Sized,
{
    let invocation = SessionBroker::new(plane)
        .with_shell_command(config.shell_command())
        .broker(cluster, task_arn, container)
        .await?;

    PluginSupervisor::new(config.plugin_binary())
        .run(&invocation)
        .await
}
