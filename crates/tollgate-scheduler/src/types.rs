use serde::{Deserialize, Serialize};
use std::fmt;

/// Verdict of a single predicate for a (task, node) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// The node may run the task
    Eligible,
    /// The node may not run the task
    Rejected {
        /// Human-readable explanation, for logs only
        reason: String,
    },
}

impl Outcome {
    /// Create a rejection
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected {
            reason: reason.into(),
        }
    }

    /// Whether the node passed
    pub fn is_eligible(&self) -> bool {
        matches!(self, Outcome::Eligible)
    }

    /// Rejection reason, if any
    pub fn reason(&self) -> Option<&str> {
        match self {
            Outcome::Eligible => None,
            Outcome::Rejected { reason } => Some(reason),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Eligible => f.write_str("eligible"),
            Outcome::Rejected { reason } => write!(f, "rejected: {}", reason),
        }
    }
}

/// Result of filtering a node against a whole predicate set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterResult {
    /// Node id
    pub node_name: String,
    /// Whether the node passed every predicate
    pub passed: bool,
    /// Name of the first predicate that rejected the node
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predicate: Option<String>,
    /// Reason given by that predicate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl FilterResult {
    /// Create a passing filter result
    pub fn pass(node_name: String) -> Self {
        Self {
            node_name,
            passed: true,
            predicate: None,
            reason: None,
        }
    }

    /// Create a failing filter result
    pub fn fail(node_name: String, predicate: String, reason: String) -> Self {
        Self {
            node_name,
            passed: false,
            predicate: Some(predicate),
            reason: Some(reason),
        }
    }
}

impl fmt::Display for FilterResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.predicate, &self.reason) {
            (Some(predicate), Some(reason)) => {
                write!(f, "{}: rejected by {}: {}", self.node_name, predicate, reason)
            }
            _ => write!(f, "{}: eligible", self.node_name),
        }
    }
}

/// Outcome of one predicate, as reported by a full (non short-circuit) evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredicateReport {
    /// Predicate name
    pub predicate: String,
    /// What it decided
    #[serde(flatten)]
    pub outcome: Outcome,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome() {
        assert!(Outcome::Eligible.is_eligible());
        assert_eq!(Outcome::Eligible.reason(), None);

        let rejected = Outcome::rejected("Zero CPUs available");
        assert!(!rejected.is_eligible());
        assert_eq!(rejected.reason(), Some("Zero CPUs available"));
        assert_eq!(rejected.to_string(), "rejected: Zero CPUs available");
    }

    #[test]
    fn test_filter_result() {
        let pass = FilterResult::pass("node1".to_string());
        assert!(pass.passed);
        assert!(pass.reason.is_none());
        assert_eq!(pass.to_string(), "node1: eligible");

        let fail = FilterResult::fail(
            "node2".to_string(),
            "NotDead".to_string(),
            "Node state is dead".to_string(),
        );
        assert!(!fail.passed);
        assert_eq!(fail.reason, Some("Node state is dead".to_string()));
        assert_eq!(fail.to_string(), "node2: rejected by NotDead: Node state is dead");
    }

    #[test]
    fn test_report_serializes_flat() {
        let report = PredicateReport {
            predicate: "PortsFit".to_string(),
            outcome: Outcome::rejected("Host port 8080 already in use"),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["predicate"], "PortsFit");
        assert_eq!(json["outcome"], "rejected");
        assert_eq!(json["reason"], "Host port 8080 already in use");
    }
}
