//! Tollgate Scheduler - Task to node admission control
//!
//! This crate provides:
//! - Eligibility predicates (resources, ports, zones, liveness, node tags)
//! - Ordered predicate sets forming an admission policy
//! - The short-circuit matcher and its diagnostic variants
//! - Policy configuration loading

pub mod error;
pub mod matcher;
pub mod policy;
pub mod predicate;
pub mod set;
pub mod types;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export commonly used types
pub use error::{Result, SchedulerError};
pub use matcher::{
    eligible_nodes, evaluate_all, explain, filter_nodes, matches, no_suitable_nodes,
    require_eligible,
};
pub use policy::{PolicyConfig, PredicateKind};
pub use predicate::{
    node_has_tag, NodeHasTag, NotDead, PortsFit, Predicate, PredicateFn, ResourcesFit, ZonesFit,
};
pub use set::{default_predicates, PredicateSet};
pub use types::{FilterResult, Outcome, PredicateReport};
