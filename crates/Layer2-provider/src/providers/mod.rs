//! Control plane implementations

pub mod ecs;
