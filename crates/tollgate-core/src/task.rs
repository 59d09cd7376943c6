use crate::resources::{Resources, NO_RESOURCES};
use crate::{Result, TollgateError};
use serde::{Deserialize, Serialize};

/// Host/container port pair requested by an executor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct PortBinding {
    /// Host port; 0 asks for a dynamically assigned port
    pub host: u16,
    /// Port inside the executor
    pub container: u16,
}

impl PortBinding {
    /// Create a new port binding
    pub fn new(host: u16, container: u16) -> Self {
        Self { host, container }
    }

    /// Create a binding whose host port is assigned at launch time
    pub fn dynamic(container: u16) -> Self {
        Self { host: 0, container }
    }

    /// Whether the host port is assigned at launch time
    pub fn is_dynamic(&self) -> bool {
        self.host == 0
    }
}

/// A single executor of a task
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Executor {
    /// Container image
    pub image: String,
    /// Command line
    pub command: Vec<String>,
    /// Requested port bindings
    pub ports: Vec<PortBinding>,
}

impl Executor {
    /// Create an executor for the given image
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            ..Default::default()
        }
    }

    /// Add a port binding
    pub fn with_port(mut self, port: PortBinding) -> Self {
        self.ports.push(port);
        self
    }
}

/// A pending task as submitted upstream
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Task {
    /// Task identifier
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Executors, run in order
    pub executors: Vec<Executor>,
    /// Resource request
    pub resources: Option<Resources>,
}

impl Task {
    /// Create a task with the given id and no executors or resources
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Set the resource request
    pub fn with_resources(mut self, resources: Resources) -> Self {
        self.resources = Some(resources);
        self
    }

    /// Add an executor
    pub fn with_executor(mut self, executor: Executor) -> Self {
        self.executors.push(executor);
        self
    }

    /// The resource request, or an all-zero request if none was given
    pub fn requested(&self) -> &Resources {
        self.resources.as_ref().unwrap_or(&NO_RESOURCES)
    }

    /// Iterate over the port bindings of every executor
    pub fn port_bindings(&self) -> impl Iterator<Item = &PortBinding> {
        self.executors.iter().flat_map(|e| e.ports.iter())
    }

    /// Name used in log lines: the name if set, the id otherwise
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }

    /// Check the task against the data model invariants
    pub fn validate(&self) -> Result<()> {
        let mut problems = Vec::new();
        if self.id.is_empty() {
            problems.push("id is empty".to_string());
        }
        if let Some(resources) = &self.resources {
            problems.extend(resources.problems("resources"));
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(TollgateError::validation_failed(
                "Task",
                problems.join("; "),
                "Give the task an id and request RAM and disk as non-negative gigabytes",
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requested_defaults_when_absent() {
        let task = Task::new("task-1");
        let requested = task.requested();
        assert_eq!(requested.cpu_cores, 0);
        assert_eq!(requested.ram_gb, 0.0);
        assert!(requested.zones.is_empty());
        assert!(!requested.preemptible);
    }

    #[test]
    fn test_port_bindings_span_executors() {
        let task = Task::new("task-1")
            .with_executor(Executor::new("alpine").with_port(PortBinding::new(8080, 80)))
            .with_executor(
                Executor::new("busybox")
                    .with_port(PortBinding::dynamic(9000))
                    .with_port(PortBinding::new(9090, 9090)),
            );

        let hosts: Vec<u16> = task.port_bindings().map(|p| p.host).collect();
        assert_eq!(hosts, vec![8080, 0, 9090]);
        assert!(task.executors[1].ports[0].is_dynamic());
    }

    #[test]
    fn test_deserialize_sparse_task() {
        let task: Task = serde_yaml::from_str(
            r#"
id: task-1
executors:
  - image: alpine
    ports:
      - host: 8080
"#,
        )
        .unwrap();

        assert!(task.resources.is_none());
        assert_eq!(task.executors[0].ports[0], PortBinding::new(8080, 0));
    }

    #[test]
    fn test_validate() {
        assert!(Task::new("task-1").validate().is_ok());
        assert!(Task::new("").validate().is_err());

        let task = Task::new("task-1").with_resources(Resources::new(1, -2.0, 1.0));
        let err = task.validate().unwrap_err();
        assert!(err.to_string().contains("resources.ram_gb is negative"));
    }

    #[test]
    fn test_display_name() {
        let mut task = Task::new("task-1");
        assert_eq!(task.display_name(), "task-1");
        task.name = "align-reads".to_string();
        assert_eq!(task.display_name(), "align-reads");
    }
}
