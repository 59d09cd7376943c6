//! Tollgate Core - Domain model for the Tollgate admission-control core
//!
//! This crate provides:
//! - Task, executor and port binding descriptions
//! - Node snapshots and node lifecycle states
//! - Error types with miette diagnostics
//! - Serialization helpers

pub mod error;
pub mod node;
pub mod resources;
pub mod task;

// Re-export commonly used types
pub use error::{Result, TollgateError};
pub use node::{Node, NodeState};
pub use resources::Resources;
pub use task::{Executor, PortBinding, Task};

/// Serialize a value to JSON
pub fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|e| {
        TollgateError::serialization_error(
            format!("Failed to serialize to JSON: {}", e),
            Some(Box::new(e)),
        )
    })
}

/// Serialize a value to pretty JSON
pub fn to_json_pretty<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| {
        TollgateError::serialization_error(
            format!("Failed to serialize to JSON: {}", e),
            Some(Box::new(e)),
        )
    })
}

/// Deserialize a value from JSON
pub fn from_json<T: for<'de> serde::Deserialize<'de>>(data: &str) -> Result<T> {
    serde_json::from_str(data).map_err(|e| {
        TollgateError::serialization_error(
            format!("Failed to deserialize from JSON: {}", e),
            Some(Box::new(e)),
        )
    })
}

/// Serialize a value to YAML
pub fn to_yaml<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_yaml::to_string(value).map_err(|e| {
        TollgateError::serialization_error(
            format!("Failed to serialize to YAML: {}", e),
            Some(Box::new(e)),
        )
    })
}

/// Deserialize a value from YAML
pub fn from_yaml<T: for<'de> serde::Deserialize<'de>>(data: &str) -> Result<T> {
    serde_yaml::from_str(data).map_err(|e| {
        TollgateError::serialization_error(
            format!("Failed to deserialize from YAML: {}", e),
            Some(Box::new(e)),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_serialization() {
        let node = Node::new("node-1")
            .with_zone("us-west")
            .with_available(Resources::new(4, 8.0, 20.0));

        let json = to_json(&node).unwrap();
        assert!(json.contains("us-west"));

        let deserialized: Node = from_json(&json).unwrap();
        assert_eq!(deserialized, node);
    }

    #[test]
    fn test_yaml_serialization() {
        let task = Task::new("task-1")
            .with_resources(Resources::new(2, 4.0, 10.0).with_zone("us-west"));

        let yaml = to_yaml(&task).unwrap();
        assert!(yaml.contains("us-west"));

        let deserialized: Task = from_yaml(&yaml).unwrap();
        assert_eq!(deserialized, task);
    }

    #[test]
    fn test_deserialize_error() {
        let result: Result<Node> = from_json("{not json");
        assert!(matches!(
            result,
            Err(TollgateError::SerializationError { .. })
        ));
    }
}
