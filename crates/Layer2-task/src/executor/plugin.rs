//! Session Manager plugin supervisor
//!
//! The plugin owns the terminal: stdin and stdout are inherited, only stderr
//! is piped so the relay can drop the plugin's own session notice.

use crate::executor::relay::{relay_lines, FilterChain, LineFilter, RelayStats};
use crate::session::PluginInvocation;
use ecssh_foundation::strings::{PLUGIN_BINARY, PLUGIN_BINARY_WINDOWS};
use ecssh_foundation::{on_path, Error, OsType, Result};
use std::process::Stdio;
use std::sync::Arc;
use tokio::io::AsyncWrite;
use tokio::process::Command;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Executable name to launch for `name`
///
/// Never fails: a missing binary surfaces as `PluginLaunch` at spawn time.
pub fn resolve_plugin_binary(name: &str) -> String {
    resolve_for(OsType::detect(), name, on_path)
}

fn resolve_for(os: OsType, name: &str, lookup: impl Fn(&str) -> bool) -> String {
    if os.is_windows() && name == PLUGIN_BINARY && !lookup(name) {
        return PLUGIN_BINARY_WINDOWS.to_string();
    }
    name.to_string()
}

/// Runs the plugin and relays its stderr
pub struct PluginSupervisor {
    binary: String,
    filter: Arc<dyn LineFilter>,
}

impl PluginSupervisor {
    /// Supervisor for `binary` with the default stderr filters
    pub fn new(binary: impl AsRef<str>) -> Self {
        Self {
            binary: resolve_plugin_binary(binary.as_ref()),
            filter: Arc::new(FilterChain::plugin_default()),
        }
    }

    /// Command line for `invocation`
    pub fn command(&self, invocation: &PluginInvocation) -> Command {
        let mut command = Command::new(&self.binary);
        command.args(invocation.args());
        command
    }

    /// Launch the plugin and block until it exits
    pub async fn run(&self, invocation: &PluginInvocation) -> Result<()> {
        info!(binary = %self.binary, region = %invocation.region, "launching plugin");
        supervise(
            self.command(invocation),
            &self.binary,
            self.filter.clone(),
            tokio::io::stderr(),
        )
        .await
    }
}

/// Spawn `command`, relay its stderr into `sink` and wait for both
async fn supervise<W>(
    mut command: Command,
    binary: &str,
    filter: Arc<dyn LineFilter>,
    sink: W,
) -> Result<()>
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    command
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::piped());

    let mut child = command.spawn().map_err(|source| Error::PluginLaunch {
        binary: binary.to_string(),
        source,
    })?;

    let relay = child.stderr.take().map(|stderr| {
        tokio::spawn(async move { relay_lines(stderr, sink, filter.as_ref()).await })
    });

    let status = match child.wait().await {
        Ok(status) => status,
        Err(e) => {
            if let Some(relay) = relay {
                relay.abort();
                join_relay(relay).await;
            }
            return Err(e.into());
        }
    };

    if let Some(relay) = relay {
        join_relay(relay).await;
    }

    if !status.success() {
        return Err(Error::PluginExited { status });
    }
    Ok(())
}

/// Wait for the relay task; its failures are logged, never returned
async fn join_relay(relay: JoinHandle<std::io::Result<RelayStats>>) {
    match relay.await {
        Ok(Ok(stats)) => debug!(
            forwarded = stats.forwarded,
            suppressed = stats.suppressed,
            discarded = stats.discarded,
            "stderr relay finished"
        ),
        Ok(Err(e)) => warn!(error = %e, "stderr relay failed"),
        Err(e) if e.is_cancelled() => debug!("stderr relay cancelled"),
        Err(e) => warn!(error = %e, "stderr relay task panicked"),
    }
}
