//! # ecssh-foundation
//!
//! Foundation layer for ecssh:
//! - Error: the closed error taxonomy shared by every crate
//! - Config: settings file + environment (EcsshConfig)
//! - Storage: read-only JSON settings store
//! - Strings: wire/env constants
//! - Env detection: OS family and PATH lookup

pub mod config;
pub mod env_detect;
pub mod error;
pub mod storage;
pub mod strings;

// ============================================================================
// Error
// ============================================================================
pub use error::{Error, Result};

// ============================================================================
// Config
// ============================================================================
pub use config::{EcsshConfig, ECSSH_CONFIG_FILE};

// ============================================================================
// Storage
// ============================================================================
pub use storage::JsonStore;

// ============================================================================
// Environment Detection
// ============================================================================
pub use env_detect::{on_path, OsType};
