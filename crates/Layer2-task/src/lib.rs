//! # ecssh-task
//!
//! Target resolution and session launch for ecssh.
//! Turns a cluster and a task name pattern into a running shell inside one
//! container of a matching ECS task.
//!
//! ## Features
//!
//! - Identifier helpers (short ids, task definition names)
//! - Running task inventory and pattern matching
//! - Deterministic or interactive selection
//! - Session brokering (exec session + SSM channel target)
//! - Session Manager plugin supervision with stderr filtering

pub mod container;
pub mod executor;
pub mod identifier;
pub mod inventory;
pub mod matcher;
pub mod select;
pub mod session;
pub mod task;

// Resolution
pub use container::{find_runtime_id, running_containers};
pub use identifier::{definition_name, short_id};
pub use inventory::{find_tasks, list_tasks_in_cluster};
pub use matcher::{find_matching, group_by_definition, TaskGroup};
pub use task::TaskRecord;

// Selection
pub use select::{choose, resolve, select_container, Choice, Chooser, PromptChooser};

// Session
pub use session::{ChannelTarget, PluginInvocation, SessionBroker};

// Plugin
pub use executor::{
    relay_lines, resolve_plugin_binary, FilterChain, LineFilter, PluginSupervisor, RelayStats,
    SessionNoticeFilter,
};
