//! ecssh Config - merged settings
//!
//! Sources, lowest to highest priority:
//! 1. `<config_dir>/ecssh/config.json`
//! 2. environment variables
//! 3. command-line arguments (applied by the CLI)

use crate::storage::JsonStore;
use crate::strings::{
    DEFAULT_SHELL_COMMAND, ENV_AWS_DEFAULT_REGION, ENV_AWS_PROFILE, ENV_AWS_REGION,
    ENV_CLUSTER_ID, ENV_PLUGIN, ENV_SHELL, ENV_TASK_NAME, PLUGIN_BINARY,
};
use crate::Result;
use serde::Deserialize;

/// Settings file name
pub const ECSSH_CONFIG_FILE: &str = "config.json";

/// ecssh settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EcsshConfig {
    /// Default cluster name or ARN
    pub cluster: Option<String>,

    /// Default task definition name pattern
    pub task_name: Option<String>,

    /// AWS region; the SDK default chain decides when unset
    pub region: Option<String>,

    /// AWS named profile
    pub profile: Option<String>,

    /// Session Manager plugin executable
    pub plugin_binary: Option<String>,

    /// Command run inside the container
    pub shell_command: Option<String>,
}

impl EcsshConfig {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Load
    // ========================================================================

    /// Settings file merged with the process environment
    pub fn load() -> Result<Self> {
        let mut config = Self::new();

        if let Ok(global) = JsonStore::global() {
            config.merge_file(&global)?;
        }

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Merge the settings file of `store`, if present
    pub fn merge_file(&mut self, store: &JsonStore) -> Result<()> {
        if let Some(file_config) = store.load_optional::<EcsshConfig>(ECSSH_CONFIG_FILE)? {
            tracing::debug!(path = %store.file_path(ECSSH_CONFIG_FILE).display(), "loaded settings file");
            self.merge(file_config);
        }
        Ok(())
    }

    /// Overlay values from an environment lookup. Empty values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let env = EcsshConfig {
            cluster: get(ENV_CLUSTER_ID),
            task_name: get(ENV_TASK_NAME),
            region: get(ENV_AWS_REGION).or_else(|| get(ENV_AWS_DEFAULT_REGION)),
            profile: get(ENV_AWS_PROFILE),
            plugin_binary: get(ENV_PLUGIN),
            shell_command: get(ENV_SHELL),
        };
        self.merge(env);
    }

    // ========================================================================
    // Merge
    // ========================================================================

    /// Merge another config into this one (`other` wins)
    pub fn merge(&mut self, other: EcsshConfig) {
        if other.cluster.is_some() {
            self.cluster = other.cluster;
        }
        if other.task_name.is_some() {
            self.task_name = other.task_name;
        }
        if other.region.is_some() {
            self.region = other.region;
        }
        if other.profile.is_some() {
            self.profile = other.profile;
        }
        if other.plugin_binary.is_some() {
            self.plugin_binary = other.plugin_binary;
        }
        if other.shell_command.is_some() {
            self.shell_command = other.shell_command;
        }
    }

    // ========================================================================
    // Effective values
    // ========================================================================

    pub fn plugin_binary(&self) -> &str {
        self.plugin_binary.as_deref().unwrap_or(PLUGIN_BINARY)
    }

    pub fn shell_command(&self) -> &str {
        self.shell_command.as_deref().unwrap_or(DEFAULT_SHELL_COMMAND)
    }

    /// Cluster and task pattern, only when both are known
    pub fn connect_target(&self) -> Option<(&str, &str)> {
        match (self.cluster.as_deref(), self.task_name.as_deref()) {
            (Some(cluster), Some(task)) => Some((cluster, task)),
            _ => None,
        }
    }
}
