use crate::resources::Resources;
use crate::{Result, TollgateError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Lifecycle state of a worker node, as reported by the node-state repository
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeState {
    /// Registered but never reported
    #[default]
    Uninitialized,
    /// Starting up
    Initializing,
    /// Heartbeating normally
    Alive,
    /// Finishing current work, may still be usable
    Draining,
    /// Missed its heartbeat deadline
    Dead,
    /// Removed from the pool
    Gone,
}

impl NodeState {
    /// Whether the node is permanently unusable
    pub fn is_terminal(&self) -> bool {
        matches!(self, NodeState::Dead | NodeState::Gone)
    }

    /// Lowercase label used in messages and documents
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeState::Uninitialized => "uninitialized",
            NodeState::Initializing => "initializing",
            NodeState::Alive => "alive",
            NodeState::Draining => "draining",
            NodeState::Dead => "dead",
            NodeState::Gone => "gone",
        }
    }
}

impl fmt::Display for NodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of a worker node
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Node {
    /// Node identifier
    pub id: String,
    /// Host name
    pub hostname: String,
    /// Total capacity
    pub resources: Resources,
    /// Currently free capacity
    pub available: Resources,
    /// Node only offers preemptible capacity
    pub preemptible: bool,
    /// Host ports already reserved on the node
    pub active_ports: Vec<u16>,
    /// Zone; empty means unconstrained
    pub zone: String,
    /// Tags; only key presence is significant
    pub metadata: HashMap<String, String>,
    /// Lifecycle state
    pub state: NodeState,
}

impl Node {
    /// Create an alive node with the given id and nothing available
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            state: NodeState::Alive,
            ..Default::default()
        }
    }

    /// Set the free capacity (and the total, if none was set yet)
    pub fn with_available(mut self, available: Resources) -> Self {
        if self.resources == Resources::default() {
            self.resources = available.clone();
        }
        self.available = available;
        self
    }

    /// Set the zone
    pub fn with_zone(mut self, zone: impl Into<String>) -> Self {
        self.zone = zone.into();
        self
    }

    /// Add a tag
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Set the state
    pub fn with_state(mut self, state: NodeState) -> Self {
        self.state = state;
        self
    }

    /// Mark the node as preemptible-only
    pub fn with_preemptible(mut self, preemptible: bool) -> Self {
        self.preemptible = preemptible;
        self
    }

    /// Mark host ports as already reserved
    pub fn with_active_ports(mut self, ports: impl IntoIterator<Item = u16>) -> Self {
        self.active_ports.extend(ports);
        self
    }

    /// Whether the node carries the given tag, whatever its value
    pub fn has_tag(&self, key: &str) -> bool {
        self.metadata.contains_key(key)
    }

    /// Check the node against the data model invariants
    pub fn validate(&self) -> Result<()> {
        let mut problems = Vec::new();
        if self.id.is_empty() {
            problems.push("id is empty".to_string());
        }
        problems.extend(self.resources.problems("resources"));
        problems.extend(self.available.problems("available"));

        if problems.is_empty() {
            Ok(())
        } else {
            Err(TollgateError::validation_failed(
                format!("Node {}", self.id),
                problems.join("; "),
                "Report capacity as non-negative gigabytes and give every node an id",
            ))
        }
    }
}
