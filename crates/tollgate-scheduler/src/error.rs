// Allow unused assignments for diagnostic fields - they're used by the macros
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;

/// Scheduler error type
#[derive(Error, Debug, Diagnostic)]
pub enum SchedulerError {
    /// No eligible nodes found
    #[error("No suitable nodes found for task {task_name}")]
    #[diagnostic(
        code(scheduler::no_suitable_nodes),
        help("{reason}")
    )]
    NoSuitableNodes {
        task_name: String,
        reason: String,
    },

    /// Policy configuration is invalid
    #[error("Invalid policy: {message}")]
    #[diagnostic(
        code(scheduler::invalid_policy),
        help("{suggestion}")
    )]
    InvalidPolicy {
        message: String,
        suggestion: String,
    },

    /// Policy file could not be read
    #[error("Failed to read policy file {path}")]
    #[diagnostic(
        code(scheduler::policy_io),
        help("Check that the file exists and is readable")
    )]
    PolicyIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Core error
    #[error("Core error: {0}")]
    #[diagnostic(
        code(scheduler::core_error),
        help("Check the policy document syntax")
    )]
    CoreError(#[from] tollgate_core::TollgateError),
}

/// Result type for scheduler operations
pub type Result<T> = std::result::Result<T, SchedulerError>;

impl SchedulerError {
    /// Create a NoSuitableNodes error
    pub fn no_suitable_nodes(task_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::NoSuitableNodes {
            task_name: task_name.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidPolicy error
    pub fn invalid_policy(message: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self::InvalidPolicy {
            message: message.into(),
            suggestion: suggestion.into(),
        }
    }

    /// Create a PolicyIo error
    pub fn policy_io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::PolicyIo {
            path: path.into(),
            source,
        }
    }
}
