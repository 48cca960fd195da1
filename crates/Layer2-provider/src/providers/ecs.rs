//! Amazon ECS control plane backed by aws-sdk-ecs

use crate::{
    error::ProviderError,
    r#trait::{ClusterRecord, ContainerDetail, ControlPlane, ExecRequest, SessionDescriptor, TaskDetail},
};
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_ecs::error::DisplayErrorContext;
use aws_sdk_ecs::types::{Cluster, Container, DesiredStatus, Task};
use aws_sdk_ecs::Client;
use ecssh_foundation::strings::DESCRIBE_BATCH_SIZE;
use ecssh_foundation::EcsshConfig;
use tracing::debug;

/// ECS control plane client.
///
/// Built once per invocation and passed by reference to every component that
/// needs cluster or task data.
#[derive(Debug, Clone)]
pub struct EcsControlPlane {
    client: Client,
    region: String,
}

impl EcsControlPlane {
    /// Load AWS configuration (default credential chain) honoring the region
    /// and profile overrides from `config`
    pub async fn from_config(config: &EcsshConfig) -> Result<Self, ProviderError> {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = &config.region {
            loader = loader.region(Region::new(region.clone()));
        }
        if let Some(profile) = &config.profile {
            loader = loader.profile_name(profile);
        }
        let sdk_config = loader.load().await;

        let region = sdk_config
            .region()
            .map(|r| r.as_ref().to_string())
            .ok_or_else(|| {
                ProviderError::NotConfigured(
                    "no AWS region configured (set AWS_REGION or a profile region)".to_string(),
                )
            })?;

        debug!(region = %region, "initialized ECS client");
        Ok(Self {
            client: Client::new(&sdk_config),
            region,
        })
    }

    async fn list_cluster_arns(&self) -> Result<Vec<String>, ProviderError> {
        let mut arns = Vec::new();
        let mut next_token: Option<String> = None;
        loop {
            let page = self
                .client
                .list_clusters()
                .set_next_token(next_token.take())
                .send()
                .await
                .map_err(|e| api_error("ListClusters", e))?;

            arns.extend(page.cluster_arns().iter().cloned());
            match page.next_token() {
                Some(token) => next_token = Some(token.to_string()),
                None => break,
            }
        }
        Ok(arns)
    }
}

#[async_trait]
impl ControlPlane for EcsControlPlane {
    fn region(&self) -> &str {
        &self.region
    }

    async fn list_clusters(&self) -> Result<Vec<ClusterRecord>, ProviderError> {
        let arns = self.list_cluster_arns().await?;
        debug!(count = arns.len(), "listed cluster ARNs");
        if arns.is_empty() {
            return Ok(Vec::new());
        }

        let mut clusters = Vec::with_capacity(arns.len());
        for chunk in arns.chunks(DESCRIBE_BATCH_SIZE) {
            let output = self
                .client
                .describe_clusters()
                .set_clusters(Some(chunk.to_vec()))
                .send()
                .await
                .map_err(|e| api_error("DescribeClusters", e))?;
            clusters.extend(output.clusters().iter().map(cluster_record));
        }
        Ok(clusters)
    }

    async fn list_task_arns(&self, cluster: &str) -> Result<Vec<String>, ProviderError> {
        let mut arns = Vec::new();
        let mut next_token: Option<String> = None;
        loop {
            let page = self
                .client
                .list_tasks()
                .cluster(cluster)
                .desired_status(DesiredStatus::Running)
                .set_next_token(next_token.take())
                .send()
                .await
                .map_err(|e| api_error("ListTasks", e))?;

            arns.extend(page.task_arns().iter().cloned());
            match page.next_token() {
                Some(token) => next_token = Some(token.to_string()),
                None => break,
            }
        }
        debug!(cluster, count = arns.len(), "listed running task ARNs");
        Ok(arns)
    }

    async fn describe_tasks(
        &self,
        cluster: &str,
        task_arns: &[String],
    ) -> Result<Vec<TaskDetail>, ProviderError> {
        let mut tasks = Vec::with_capacity(task_arns.len());
        for chunk in task_arns.chunks(DESCRIBE_BATCH_SIZE) {
            let output = self
                .client
                .describe_tasks()
                .cluster(cluster)
                .set_tasks(Some(chunk.to_vec()))
                .send()
                .await
                .map_err(|e| api_error("DescribeTasks", e))?;
            tasks.extend(output.tasks().iter().map(task_detail));
        }
        debug!(cluster, requested = task_arns.len(), described = tasks.len(), "described tasks");
        Ok(tasks)
    }

    async fn request_exec_session(
        &self,
        request: ExecRequest<'_>,
    ) -> Result<SessionDescriptor, ProviderError> {
        debug!(
            cluster = request.cluster,
            task = request.task,
            container = request.container,
            command = request.command,
            "requesting exec session"
        );

        let output = self
            .client
            .execute_command()
            .cluster(request.cluster)
            .task(request.task)
            .container(request.container)
            .interactive(request.interactive)
            .command(request.command)
            .send()
            .await
            .map_err(|e| api_error("ExecuteCommand", e))?;

        let session = output
            .session()
            .ok_or_else(|| ProviderError::invalid_response("ExecuteCommand", "no session in response"))?;

        Ok(SessionDescriptor {
            session_id: session.session_id().map(str::to_string),
            stream_url: session.stream_url().map(str::to_string),
            token_value: session.token_value().map(str::to_string),
        })
    }
}

fn api_error<E>(operation: &'static str, err: E) -> ProviderError
where
    E: std::error::Error,
{
    ProviderError::api(operation, DisplayErrorContext(err).to_string())
}

fn cluster_record(cluster: &Cluster) -> ClusterRecord {
    ClusterRecord {
        name: cluster.cluster_name().unwrap_or_default().to_string(),
        status: cluster.status().map(str::to_string),
        running_tasks_count: cluster.running_tasks_count(),
    }
}

fn task_detail(task: &Task) -> TaskDetail {
    TaskDetail {
        task_arn: task.task_arn().unwrap_or_default().to_string(),
        task_definition_arn: task.task_definition_arn().unwrap_or_default().to_string(),
        containers: task.containers().iter().map(container_detail).collect(),
    }
}

fn container_detail(container: &Container) -> ContainerDetail {
    ContainerDetail {
        name: container.name().unwrap_or_default().to_string(),
        last_status: container.last_status().map(str::to_string),
        runtime_id: container.runtime_id().map(str::to_string),
    }
}
