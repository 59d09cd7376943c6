//! Shared fixtures for scheduler tests

use crate::predicate::Predicate;
use crate::types::Outcome;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tollgate_core::{Executor, Node, NodeState, PortBinding, Resources, Task};

/// An alive node in us-west with 4 CPUs, 8 GB RAM and 20 GB disk free
pub(crate) fn create_test_node(name: &str) -> Node {
    Node::new(name)
        .with_available(Resources::new(4, 8.0, 20.0))
        .with_zone("us-west")
        .with_state(NodeState::Alive)
}

/// A task asking for the given CPU, RAM and disk in us-west
pub(crate) fn create_test_task(cpu: u32, ram_gb: f64, disk_gb: f64) -> Task {
    Task::new("test-task").with_resources(Resources::new(cpu, ram_gb, disk_gb).with_zone("us-west"))
}

/// A task with a single executor binding the given host ports
pub(crate) fn create_port_task(hosts: &[u16]) -> Task {
    let executor = hosts
        .iter()
        .fold(Executor::new("alpine"), |executor, &host| {
            executor.with_port(PortBinding::new(host, 80))
        });
    create_test_task(1, 1.0, 1.0).with_executor(executor)
}

/// Predicate that returns a fixed outcome and counts how often it ran
pub(crate) struct CountingPredicate {
    name: String,
    outcome: Outcome,
    calls: AtomicUsize,
}

impl CountingPredicate {
    pub(crate) fn new(name: &str, outcome: Outcome) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            outcome,
            calls: AtomicUsize::new(0),
        })
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Predicate for CountingPredicate {
    fn check(&self, _task: &Task, _node: &Node) -> Outcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }

    fn name(&self) -> &str {
        &self.name
    }
}
