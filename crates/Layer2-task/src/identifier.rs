//! Resource identifier helpers
//!
//! ECS identifiers arrive as ARNs such as
//! `arn:aws:ecs:us-east-1:123456789012:task/prod/0f3c...` or
//! `arn:aws:ecs:us-east-1:123456789012:task-definition/web-app:3`.

/// Final `/`-delimited segment, or the whole input when it has no `/`
pub fn short_id(identifier: &str) -> &str {
    match identifier.rfind('/') {
        Some(idx) => &identifier[idx + 1..],
        None => identifier,
    }
}

/// Task definition family: final `/` segment with the `:revision` suffix removed
pub fn definition_name(definition_arn: &str) -> &str {
    let segment = short_id(definition_arn);
    match segment.rfind(':') {
        Some(idx) => &segment[..idx],
        None => segment,
    }
}
