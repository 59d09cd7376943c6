use serde::{Deserialize, Serialize};

/// A bundle of compute resources.
///
/// On a task this is the request; on a node it is either the total capacity
/// or the currently free amount. Absent fields deserialize as zero, empty or
/// false so a partially filled document is still a usable value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resources {
    /// Number of CPU cores
    pub cpu_cores: u32,
    /// RAM in gigabytes
    pub ram_gb: f64,
    /// Disk size in gigabytes
    pub disk_gb: f64,
    /// Zone identifiers; empty means no zone preference
    pub zones: Vec<String>,
    /// Preemptible capacity flag
    pub preemptible: bool,
}

/// The request used when a task carries no resources at all.
pub(crate) static NO_RESOURCES: Resources = Resources {
    cpu_cores: 0,
    ram_gb: 0.0,
    disk_gb: 0.0,
    zones: Vec::new(),
    preemptible: false,
};

impl Resources {
    /// Create a resource bundle with the given CPU, RAM and disk amounts
    pub fn new(cpu_cores: u32, ram_gb: f64, disk_gb: f64) -> Self {
        Self {
            cpu_cores,
            ram_gb,
            disk_gb,
            ..Default::default()
        }
    }

    /// Add an accepted zone
    pub fn with_zone(mut self, zone: impl Into<String>) -> Self {
        self.zones.push(zone.into());
        self
    }

    /// Set the preemptible flag
    pub fn with_preemptible(mut self, preemptible: bool) -> Self {
        self.preemptible = preemptible;
        self
    }

    /// Whether any zone is requested
    pub fn has_zones(&self) -> bool {
        !self.zones.is_empty()
    }

    /// Describe every field that breaks the non-negative invariant.
    ///
    /// `field` prefixes each message, e.g. `available` yields `available.ram_gb ...`.
    pub(crate) fn problems(&self, field: &str) -> Vec<String> {
        let mut problems = Vec::new();
        for (name, value) in [("ram_gb", self.ram_gb), ("disk_gb", self.disk_gb)] {
            if !value.is_finite() {
                problems.push(format!("{}.{} is not a finite number", field, name));
            } else if value < 0.0 {
                problems.push(format!("{}.{} is negative ({})", field, name, value));
            }
        }
        problems
    }
}
