use crate::predicate::{node_has_tag, NotDead, PortsFit, Predicate, ResourcesFit, ZonesFit};
use std::fmt;
use std::sync::Arc;

/// Ordered list of predicates forming an admission policy
///
/// Cloning is cheap: predicates are shared behind `Arc`, so one set can be
/// handed to many concurrent evaluations.
#[derive(Clone, Default)]
pub struct PredicateSet {
    predicates: Vec<Arc<dyn Predicate>>,
}

impl PredicateSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a predicate
    pub fn push(&mut self, predicate: Arc<dyn Predicate>) {
        self.predicates.push(predicate);
    }

    /// Append a predicate, builder style
    pub fn with(mut self, predicate: impl Predicate + 'static) -> Self {
        self.push(Arc::new(predicate));
        self
    }

    /// Insert a predicate at `index`, shifting later ones back
    ///
    /// An index past the end appends.
    pub fn insert(&mut self, index: usize, predicate: Arc<dyn Predicate>) {
        let index = index.min(self.predicates.len());
        self.predicates.insert(index, predicate);
    }

    /// Remove every predicate with the given name, returning whether any was removed
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.predicates.len();
        self.predicates.retain(|p| p.name() != name);
        self.predicates.len() != before
    }

    /// Append a tag-affinity predicate for `tag`
    pub fn require_tag(mut self, tag: impl Into<String>) -> Self {
        self.push(Arc::new(node_has_tag(tag)));
        self
    }

    /// Predicates in evaluation order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Predicate>> {
        self.predicates.iter()
    }

    /// Predicate names in evaluation order
    pub fn names(&self) -> Vec<&str> {
        self.predicates.iter().map(|p| p.name()).collect()
    }

    /// Number of predicates
    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    /// Whether the set has no predicates
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}

impl fmt::Debug for PredicateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

impl FromIterator<Arc<dyn Predicate>> for PredicateSet {
    fn from_iter<I: IntoIterator<Item = Arc<dyn Predicate>>>(iter: I) -> Self {
        Self {
            predicates: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a PredicateSet {
    type Item = &'a Arc<dyn Predicate>;
    type IntoIter = std::slice::Iter<'a, Arc<dyn Predicate>>;

    fn into_iter(self) -> Self::IntoIter {
        self.predicates.iter()
    }
}

/// Get default predicates: resources, ports, zones, liveness
pub fn default_predicates() -> PredicateSet {
    PredicateSet::new()
        .with(ResourcesFit)
        .with(PortsFit)
        .with(ZonesFit)
        .with(NotDead)
}
