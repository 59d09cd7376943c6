//! Admission policy loaded from configuration
//!
//! A policy document names the built-in predicates to run, in order, plus
//! the tags a node must carry for this deployment:
//!
//! ```yaml
//! predicates:
//!   - resources_fit
//!   - not_dead
//! required_tags:
//!   - gpu
//! ```

use crate::predicate::{node_has_tag, NotDead, PortsFit, Predicate, ResourcesFit, ZonesFit};
use crate::set::PredicateSet;
use crate::{Result, SchedulerError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// One entry of a policy's predicate list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredicateKind {
    ResourcesFit,
    PortsFit,
    ZonesFit,
    NotDead,
}

impl PredicateKind {
    fn build(&self) -> Arc<dyn Predicate> {
        match self {
            PredicateKind::ResourcesFit => Arc::new(ResourcesFit),
            PredicateKind::PortsFit => Arc::new(PortsFit),
            PredicateKind::ZonesFit => Arc::new(ZonesFit),
            PredicateKind::NotDead => Arc::new(NotDead),
        }
    }
}

/// Configuration for the admission policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PolicyConfig {
    /// Predicates to evaluate, in order
    pub predicates: Vec<PredicateKind>,
    /// Tags every eligible node must carry, checked after `predicates`
    pub required_tags: Vec<String>,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            predicates: vec![
                PredicateKind::ResourcesFit,
                PredicateKind::PortsFit,
                PredicateKind::ZonesFit,
                PredicateKind::NotDead,
            ],
            required_tags: Vec::new(),
        }
    }
}

impl PolicyConfig {
    /// Parse a YAML policy document
    pub fn from_yaml(data: &str) -> Result<Self> {
        Ok(tollgate_core::from_yaml(data)?)
    }

    /// Parse a JSON policy document
    pub fn from_json(data: &str) -> Result<Self> {
        Ok(tollgate_core::from_json(data)?)
    }

    /// Load a policy file; `.json` files are parsed as JSON, anything else as YAML
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)
            .map_err(|e| SchedulerError::policy_io(path.display().to_string(), e))?;

        debug!("Loading policy from {}", path.display());

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json(&data),
            _ => Self::from_yaml(&data),
        }
    }

    /// Add a required tag
    pub fn require_tag(mut self, tag: impl Into<String>) -> Self {
        self.required_tags.push(tag.into());
        self
    }

    /// Build the predicate set: listed predicates in order, then one tag check per required tag
    pub fn build(&self) -> Result<PredicateSet> {
        let mut set = PredicateSet::new();
        for kind in &self.predicates {
            set.push(kind.build());
        }
        for tag in &self.required_tags {
            set.push(Arc::new(node_has_tag(checked_tag(tag)?)));
        }

        debug!("Built predicate set {:?}", set);
        Ok(set)
    }
}

fn checked_tag(tag: &str) -> Result<&str> {
    if tag.trim().is_empty() {
        return Err(SchedulerError::invalid_policy(
            "tag requirement with an empty key",
            "Remove the entry or name the node tag it should require",
        ));
    }
    Ok(tag)
}
