//! Combining a predicate set into a single admit/reject decision

use crate::set::PredicateSet;
use crate::types::{FilterResult, Outcome, PredicateReport};
use crate::{Result, SchedulerError};
use tollgate_core::{Node, Task};
use tracing::{debug, info};

/// Whether `node` passes every predicate in `predicates` for `task`
///
/// Predicates run in set order and evaluation stops at the first rejection,
/// so later predicates are never invoked once one has failed. An empty set
/// admits every node.
pub fn matches(node: &Node, task: &Task, predicates: &PredicateSet) -> bool {
    first_rejection(node, task, predicates).is_none()
}

/// Same short-circuit evaluation as [`matches`], keeping the failing predicate's name and reason
pub fn explain(node: &Node, task: &Task, predicates: &PredicateSet) -> FilterResult {
    match first_rejection(node, task, predicates) {
        Some((predicate, reason)) => FilterResult::fail(node.id.clone(), predicate, reason),
        None => FilterResult::pass(node.id.clone()),
    }
}

/// Run every predicate, without stopping at the first rejection
pub fn evaluate_all(node: &Node, task: &Task, predicates: &PredicateSet) -> Vec<PredicateReport> {
    predicates
        .iter()
        .map(|predicate| PredicateReport {
            predicate: predicate.name().to_string(),
            outcome: predicate.check(task, node),
        })
        .collect()
}

/// Explain every candidate node, in input order
pub fn filter_nodes(task: &Task, nodes: &[Node], predicates: &PredicateSet) -> Vec<FilterResult> {
    nodes
        .iter()
        .map(|node| explain(node, task, predicates))
        .collect()
}

/// Candidate nodes that match, in input order
pub fn eligible_nodes<'a>(
    task: &Task,
    nodes: &'a [Node],
    predicates: &PredicateSet,
) -> Vec<&'a Node> {
    let eligible: Vec<&Node> = nodes
        .iter()
        .filter(|node| matches(node, task, predicates))
        .collect();

    log_eligible(task, eligible.len(), nodes.len());
    eligible
}

/// Like [`eligible_nodes`], but an empty result is an error listing why each node failed
///
/// Each node is evaluated once; the rejection summary reuses those results.
pub fn require_eligible<'a>(
    task: &Task,
    nodes: &'a [Node],
    predicates: &PredicateSet,
) -> Result<Vec<&'a Node>> {
    let results = filter_nodes(task, nodes, predicates);
    let eligible: Vec<&Node> = nodes
        .iter()
        .zip(&results)
        .filter(|(_, result)| result.passed)
        .map(|(node, _)| node)
        .collect();

    log_eligible(task, eligible.len(), nodes.len());
    if eligible.is_empty() {
        return Err(no_suitable_nodes(task, &results));
    }
    Ok(eligible)
}

/// Build the error reported when none of `results` passed
pub fn no_suitable_nodes(task: &Task, results: &[FilterResult]) -> SchedulerError {
    let reason = if results.is_empty() {
        "No candidate nodes were supplied".to_string()
    } else {
        results
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    };

    SchedulerError::no_suitable_nodes(task.display_name(), reason)
}

fn log_eligible(task: &Task, eligible: usize, total: usize) {
    info!(
        "Task {} has {} eligible nodes out of {}",
        task.display_name(),
        eligible,
        total
    );
}

fn first_rejection(
    node: &Node,
    task: &Task,
    predicates: &PredicateSet,
) -> Option<(String, String)> {
    for predicate in predicates {
        if let Outcome::Rejected { reason } = predicate.check(task, node) {
            debug!(
                "Node {} filtered out by {}: {}",
                node.id,
                predicate.name(),
                reason
            );
            return Some((predicate.name().to_string(), reason));
        }
    }
    None
}
