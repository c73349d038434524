//! Error types for migration runs.
//!
//! A run either completes with a summary or stops with exactly one
//! [`MigrateError`]. Failures of individual messages inside a batch are not
//! errors; they are logged and counted in the summary.

use queue_migrator_runtime::{QueueError, ValidationError};

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;

/// Invalid run configuration, detected before any queue call
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Source queue is required")]
    MissingSource,

    #[error("Destination queue is required when executing")]
    MissingDestination,

    #[error("Source and destination must be different queues: {queue}")]
    SameQueue { queue: String },

    #[error("Visibility timeout must be at least one second, got {seconds}s")]
    InvalidVisibilityTimeout { seconds: i64 },

    #[error("Invalid queue name '{name}': {source}")]
    InvalidQueueName {
        name: String,
        #[source]
        source: ValidationError,
    },
}

/// Errors that end a migration run
#[derive(Debug, thiserror::Error)]
pub enum MigrateError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("Failed to resolve queue '{queue}': {source}")]
    Resolve {
        queue: String,
        #[source]
        source: QueueError,
    },

    #[error("Failed to receive messages from source queue: {source}")]
    Receive {
        #[source]
        source: QueueError,
    },

    #[error("Failed to send message batch to destination queue: {source}")]
    Send {
        #[source]
        source: QueueError,
    },

    #[error("Failed to delete message batch from source queue: {source}")]
    Delete {
        #[source]
        source: QueueError,
    },
}

impl MigrateError {
    /// Check if the run was rejected before touching any queue
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    /// The underlying queue error, if the run stopped on a queue call
    pub fn queue_error(&self) -> Option<&QueueError> {
        match self {
            Self::Configuration(_) => None,
            Self::Resolve { source, .. }
            | Self::Receive { source }
            | Self::Send { source }
            | Self::Delete { source } => Some(source),
        }
    }
}
