//! # ecssh-provider
//!
//! Control plane abstraction for ecssh.
//!
//! ## Features
//! - `ControlPlane` trait: clusters, running tasks, task details, exec sessions
//! - Plain record types decoupled from the AWS SDK
//! - `EcsControlPlane`: aws-sdk-ecs implementation with pagination

pub mod error;
pub mod providers;
pub mod r#trait;

// Core traits and types
pub use r#trait::{
    ClusterRecord, ContainerDetail, ControlPlane, ExecRequest, SessionDescriptor, TaskDetail,
};

// Error
pub use error::ProviderError;

// Implementations
pub use providers::ecs::EcsControlPlane;
