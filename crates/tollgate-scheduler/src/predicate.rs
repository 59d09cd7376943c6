use crate::types::Outcome;
use std::collections::HashSet;
use tollgate_core::{Node, Task};
use tracing::debug;

/// Eligibility rule evaluated against a (task, node) pair
///
/// Implementations must be pure: no I/O, no interior state that affects the
/// verdict, and a definite [`Outcome`] for every well-formed input.
pub trait Predicate: Send + Sync {
    /// Decide whether `node` may run `task`
    fn check(&self, task: &Task, node: &Node) -> Outcome;

    /// Name of the predicate
    fn name(&self) -> &str;
}

/// Fits the task's resource request into the node's free capacity
pub struct ResourcesFit;

impl Predicate for ResourcesFit {
    fn check(&self, task: &Task, node: &Node) -> Outcome {
        let requested = task.requested();
        let available = &node.available;

        debug!(
            "Node {} has CPU: {}, RAM: {} GB, disk: {} GB",
            node.id, available.cpu_cores, available.ram_gb, available.disk_gb
        );
        debug!(
            "Task {} requests CPU: {}, RAM: {} GB, disk: {} GB",
            task.display_name(),
            requested.cpu_cores,
            requested.ram_gb,
            requested.disk_gb
        );

        // Only one direction is rejected: a non-preemptible node still
        // accepts tasks that allow preemption.
        if node.preemptible && !requested.preemptible {
            return Outcome::rejected(
                "Node is preemptible but the task does not allow preemptible execution",
            );
        }

        // Zero or negative free capacity is a hard stop whatever the request.
        if available.cpu_cores == 0 {
            return Outcome::rejected("Zero CPUs available");
        }
        if non_positive(available.ram_gb) {
            return Outcome::rejected(format!(
                "Zero RAM available: node reports {} GB",
                available.ram_gb
            ));
        }
        if non_positive(available.disk_gb) {
            return Outcome::rejected(format!(
                "Zero disk available: node reports {} GB",
                available.disk_gb
            ));
        }

        if available.cpu_cores < requested.cpu_cores {
            return Outcome::rejected(format!(
                "Insufficient CPU: requested {}, available {}",
                requested.cpu_cores, available.cpu_cores
            ));
        }
        if available.ram_gb < requested.ram_gb {
            return Outcome::rejected(format!(
                "Insufficient RAM: requested {} GB, available {} GB",
                requested.ram_gb, available.ram_gb
            ));
        }
        if available.disk_gb < requested.disk_gb {
            return Outcome::rejected(format!(
                "Insufficient disk: requested {} GB, available {} GB",
                requested.disk_gb, available.disk_gb
            ));
        }

        Outcome::Eligible
    }

    fn name(&self) -> &str {
        "ResourcesFit"
    }
}

/// NaN counts as non-positive
fn non_positive(value: f64) -> bool {
    value.is_nan() || value <= 0.0
}

/// Rejects nodes where a requested host port is already active
pub struct PortsFit;

impl Predicate for PortsFit {
    fn check(&self, task: &Task, node: &Node) -> Outcome {
        let active: HashSet<u16> = node.active_ports.iter().copied().collect();

        for binding in task.port_bindings() {
            if binding.is_dynamic() {
                continue;
            }
            if active.contains(&binding.host) {
                return Outcome::rejected(format!(
                    "Host port {} is already active on node {}",
                    binding.host, node.id
                ));
            }
        }

        Outcome::Eligible
    }

    fn name(&self) -> &str {
        "PortsFit"
    }
}

/// Matches the node's zone against the task's accepted zones
///
/// A node without a zone, or a task without zones, is never rejected.
pub struct ZonesFit;

impl Predicate for ZonesFit {
    fn check(&self, task: &Task, node: &Node) -> Outcome {
        if node.zone.is_empty() {
            return Outcome::Eligible;
        }

        let zones = &task.requested().zones;
        if zones.is_empty() || zones.iter().any(|z| *z == node.zone) {
            return Outcome::Eligible;
        }

        Outcome::rejected(format!(
            "Node zone {} is not one of the requested zones [{}]",
            node.zone,
            zones.join(", ")
        ))
    }

    fn name(&self) -> &str {
        "ZonesFit"
    }
}

/// Rejects nodes that are dead or gone
pub struct NotDead;

impl Predicate for NotDead {
    fn check(&self, _task: &Task, node: &Node) -> Outcome {
        if node.state.is_terminal() {
            return Outcome::rejected(format!("Node state is {}", node.state));
        }
        Outcome::Eligible
    }

    fn name(&self) -> &str {
        "NotDead"
    }
}

/// Requires the node to carry a tag key; the tag value is not inspected
#[derive(Debug, Clone)]
pub struct NodeHasTag {
    tag: String,
    name: String,
}

impl NodeHasTag {
    /// Create a predicate requiring `tag`
    pub fn new(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        let name = format!("NodeHasTag({})", tag);
        Self { tag, name }
    }

    /// The required tag key
    pub fn tag(&self) -> &str {
        &self.tag
    }
}

impl Predicate for NodeHasTag {
    fn check(&self, _task: &Task, node: &Node) -> Outcome {
        if node.has_tag(&self.tag) {
            return Outcome::Eligible;
        }
        Outcome::rejected(format!("Node is missing tag: {}", self.tag))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Build a predicate that passes only nodes tagged with `tag`
pub fn node_has_tag(tag: impl Into<String>) -> NodeHasTag {
    NodeHasTag::new(tag)
}

/// Named predicate backed by a closure
pub struct PredicateFn<F> {
    name: String,
    f: F,
}

impl<F> PredicateFn<F>
where
    F: Fn(&Task, &Node) -> Outcome + Send + Sync,
{
    /// Wrap a closure as a predicate
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

impl<F> Predicate for PredicateFn<F>
where
    F: Fn(&Task, &Node) -> Outcome + Send + Sync,
{
    fn check(&self, task: &Task, node: &Node) -> Outcome {
        (self.f)(task, node)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
