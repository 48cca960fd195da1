//! Command implementations

pub mod connect;
pub mod interactive;
pub mod list;

use anyhow::Context;
use ecssh_foundation::{EcsshConfig, Result};
use ecssh_provider::EcsControlPlane;

/// ECS client for the merged configuration
pub async fn client(config: &EcsshConfig) -> anyhow::Result<EcsControlPlane> {
    EcsControlPlane::from_config(config)
        .await
        .context("failed to initialize AWS client")
}

/// Run a blocking terminal prompt without stalling the runtime
pub fn prompt<T>(f: impl FnOnce() -> Result<T>) -> Result<T> {
    tokio::task::block_in_place(f)
}
