//! Executor - plugin subprocess and its stderr relay

pub mod plugin;
pub mod relay;

pub use plugin::{resolve_plugin_binary, PluginSupervisor};
pub use relay::{relay_lines, FilterChain, LineFilter, RelayStats, SessionNoticeFilter};
