//! Config - settings management
//!
//! - `ecssh.rs` - EcsshConfig (file + environment)

mod ecssh;

pub use ecssh::{EcsshConfig, ECSSH_CONFIG_FILE};
