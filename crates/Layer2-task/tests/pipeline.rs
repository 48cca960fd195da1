//! Resolve-and-broker pipeline against an in-memory control plane

use async_trait::async_trait;
use ecssh_foundation::{Error, Result};
use ecssh_provider::{
    ClusterRecord, ContainerDetail, ControlPlane, ExecRequest, ProviderError, SessionDescriptor,
    TaskDetail,
};
use ecssh_task::{
    find_tasks, group_by_definition, list_tasks_in_cluster, select_container, Chooser,
    SessionBroker,
};
use std::sync::Mutex;

const TASK_ARN: &str = "arn:aws:ecs:us-east-1:123456789012:task/prod/0f3c9a7d";
const WORKER_ARN: &str = "arn:aws:ecs:us-east-1:123456789012:task/prod/77aa00bb";

#[derive(Debug, Clone)]
struct ExecCall {
    cluster: String,
    task: String,
    container: String,
    command: String,
    interactive: bool,
}

#[derive(Default)]
struct FakePlane {
    tasks: Vec<TaskDetail>,
    /// Describe returns nothing when set
    forget_tasks: bool,
    exec_error: Option<ProviderError>,
    exec_calls: Mutex<Vec<ExecCall>>,
}

impl FakePlane {
    fn prod() -> Self {
        Self {
            tasks: vec![
                TaskDetail::new(TASK_ARN, "arn:aws:ecs:us-east-1:123456789012:task-definition/web-app:3")
                    .with_container(
                        ContainerDetail::new("web")
                            .with_status("RUNNING")
                            .with_runtime_id("0f3c9a7d-1111111111"),
                    )
                    .with_container(
                        ContainerDetail::new("sidecar")
                            .with_status("RUNNING")
                            .with_runtime_id("0f3c9a7d-2222222222"),
                    ),
                TaskDetail::new(WORKER_ARN, "arn:aws:ecs:us-east-1:123456789012:task-definition/worker:12")
                    .with_container(ContainerDetail::new("worker").with_status("PENDING")),
            ],
            ..Self::default()
        }
    }
}

#[async_trait]
impl ControlPlane for FakePlane {
    fn region(&self) -> &str {
        "us-east-1"
    }

    async fn list_clusters(&self) -> std::result::Result<Vec<ClusterRecord>, ProviderError> {
        Ok(vec![ClusterRecord::new("prod", self.tasks.len() as i32)])
    }

    async fn list_task_arns(&self, _cluster: &str) -> std::result::Result<Vec<String>, ProviderError> {
        Ok(self.tasks.iter().map(|t| t.task_arn.clone()).collect())
    }

    async fn describe_tasks(
        &self,
        _cluster: &str,
        task_arns: &[String],
    ) -> std::result::Result<Vec<TaskDetail>, ProviderError> {
        if self.forget_tasks {
            return Ok(Vec::new());
        }
        Ok(self
            .tasks
            .iter()
            .filter(|t| task_arns.contains(&t.task_arn))
            .cloned()
            .collect())
    }

    async fn request_exec_session(
        &self,
        request: ExecRequest<'_>,
    ) -> std::result::Result<SessionDescriptor, ProviderError> {
        self.exec_calls.lock().unwrap().push(ExecCall {
            cluster: request.cluster.to_string(),
            task: request.task.to_string(),
            container: request.container.to_string(),
            command: request.command.to_string(),
            interactive: request.interactive,
        });
        if let Some(err) = &self.exec_error {
            return Err(err.clone());
        }
        Ok(SessionDescriptor {
            session_id: Some("ecs-execute-command-abc".to_string()),
            stream_url: Some("wss://ssmmessages.us-east-1.amazonaws.com/v1/data-channel/abc".to_string()),
            token_value: Some("tok".to_string()),
        })
    }
}

/// Answers with a fixed index, counting how often it was asked
struct CountingChooser {
    answer: usize,
    asked: usize,
}

impl Chooser for CountingChooser {
    fn choose(&mut self, _prompt: &str, _labels: &[String]) -> Result<usize> {
        self.asked += 1;
        Ok(self.answer)
    }
}

#[tokio::test]
async fn test_match_then_ask_for_container() {
    let plane = FakePlane::prod();

    let matching = find_tasks(&plane, "prod", "web-app").await.unwrap();
    assert_eq!(matching.len(), 1);
    assert_eq!(matching[0].task_id(), "0f3c9a7d");
    assert_eq!(matching[0].container_names, vec!["web", "sidecar"]);

    let mut chooser = CountingChooser { answer: 1, asked: 0 };
    let container = select_container(&matching[0].container_names, false, &mut chooser).unwrap();
    assert_eq!(container, "sidecar");
    assert_eq!(chooser.asked, 1);

    let mut chooser = CountingChooser { answer: 1, asked: 0 };
    let container = select_container(&matching[0].container_names, true, &mut chooser).unwrap();
    assert_eq!(container, "web");
    assert_eq!(chooser.asked, 0);
}

#[tokio::test]
async fn test_pattern_matches_nothing() {
    let plane = FakePlane::prod();
    assert!(find_tasks(&plane, "prod", "Web").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_inventory_groups_and_keeps_idle_tasks() {
    let plane = FakePlane::prod();
    let tasks = list_tasks_in_cluster(&plane, "prod").await.unwrap();
    assert_eq!(tasks.len(), 2);
    assert!(!tasks[1].has_running_containers());

    let groups = group_by_definition(tasks);
    let names: Vec<_> = groups.iter().map(|g| g.definition_name.as_str()).collect();
    assert_eq!(names, vec!["web-app", "worker"]);
}

#[tokio::test]
async fn test_inventory_empty_cluster() {
    let plane = FakePlane::default();
    assert!(list_tasks_in_cluster(&plane, "empty").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_broker_builds_plugin_invocation() {
    let plane = FakePlane::prod();
    let invocation = SessionBroker::new(&plane)
        .broker("prod", TASK_ARN, "web")
        .await
        .unwrap();

    let calls = plane.exec_calls.lock().unwrap().clone();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].cluster, "prod");
    assert_eq!(calls[0].task, TASK_ARN);
    assert_eq!(calls[0].container, "web");
    assert_eq!(calls[0].command, "/bin/bash");
    assert!(calls[0].interactive);

    let session: serde_json::Value = serde_json::from_str(&invocation.session_json).unwrap();
    assert_eq!(session["SessionId"], "ecs-execute-command-abc");
    assert_eq!(session["TokenValue"], "tok");

    let args = invocation.args();
    assert_eq!(args[1], "us-east-1");
    assert_eq!(args[2], "StartSession");
    assert_eq!(args[3], "");
    assert_eq!(args[4], r#"{"Target":"ecs:prod_0f3c9a7d_0f3c9a7d-1111111111"}"#);
    assert_eq!(args[5], "https://ecs.us-east-1.amazonaws.com");
}

#[tokio::test]
async fn test_broker_custom_shell() {
    let plane = FakePlane::prod();
    SessionBroker::new(&plane)
        .with_shell_command("/bin/sh")
        .broker("prod", TASK_ARN, "sidecar")
        .await
        .unwrap();
    assert_eq!(plane.exec_calls.lock().unwrap()[0].command, "/bin/sh");
}

#[tokio::test]
async fn test_broker_container_without_runtime_id() {
    let plane = FakePlane::prod();
    let err = SessionBroker::new(&plane)
        .broker("prod", TASK_ARN, "missing")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::RuntimeIdNotFound { ref container } if container == "missing"));
}

#[tokio::test]
async fn test_broker_task_gone_after_exec() {
    let plane = FakePlane {
        forget_tasks: true,
        ..FakePlane::prod()
    };
    let err = SessionBroker::new(&plane)
        .broker("prod", TASK_ARN, "web")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::TaskNotFound { ref cluster, ref task } if cluster == "prod" && task == TASK_ARN));
}

#[tokio::test]
async fn test_broker_exec_refused() {
    let plane = FakePlane {
        exec_error: Some(ProviderError::api("ExecuteCommand", "TargetNotConnectedException")),
        ..FakePlane::prod()
    };
    let err = SessionBroker::new(&plane)
        .broker("prod", TASK_ARN, "web")
        .await
        .unwrap_err();

    match err {
        Error::SessionRequest {
            cluster,
            task,
            container,
            message,
        } => {
            assert_eq!(cluster, "prod");
            assert_eq!(task, TASK_ARN);
            assert_eq!(container, "web");
            assert!(message.contains("TargetNotConnectedException"));
        }
        other => panic!("unexpected error: {other}"),
    }
}
