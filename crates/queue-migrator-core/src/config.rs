//! Run configuration for the migrator.

use crate::batch::MAX_BATCH_SIZE;
use crate::error::ConfigError;
use chrono::Duration;
use queue_migrator_runtime::QueueName;

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Settings for one migration run
#[derive(Debug, Clone)]
pub struct MigrationConfig {
    /// Queue messages are taken from
    pub source: String,

    /// Queue messages are moved to; only required when executing
    pub dest: Option<String>,

    /// Send and delete for real; when false the run only reports
    pub execute: bool,

    /// Messages at least this old are left on the source
    pub max_age: Duration,

    /// Maximum number of messages to attempt
    pub limit: u32,

    /// Substring a body must contain; empty matches every message
    pub filter: String,

    /// Log the full body of every eligible message
    pub verbose: bool,

    /// How long received messages stay hidden on the source
    pub visibility_timeout: Duration,

    /// Long-poll wait per receive; zero performs a short poll
    pub wait_time: Duration,
}

/// Queue names that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedQueues {
    pub source: QueueName,
    pub dest: Option<QueueName>,
}

impl MigrationConfig {
    /// Default maximum message age
    pub const DEFAULT_MAX_AGE_HOURS: i64 = 12;

    /// Default number of messages to attempt
    pub const DEFAULT_LIMIT: u32 = MAX_BATCH_SIZE;

    /// Default visibility timeout applied to each receive
    pub const DEFAULT_VISIBILITY_TIMEOUT_SECONDS: i64 = 60;

    /// Create a dry-run configuration for a source queue with default settings
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            dest: None,
            execute: false,
            max_age: Duration::hours(Self::DEFAULT_MAX_AGE_HOURS),
            limit: Self::DEFAULT_LIMIT,
            filter: String::new(),
            verbose: false,
            visibility_timeout: Duration::seconds(Self::DEFAULT_VISIBILITY_TIMEOUT_SECONDS),
            wait_time: Duration::zero(),
        }
    }

    pub fn with_destination(mut self, dest: impl Into<String>) -> Self {
        self.dest = Some(dest.into());
        self
    }

    pub fn with_execute(mut self, execute: bool) -> Self {
        self.execute = execute;
        self
    }

    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_visibility_timeout(mut self, timeout: Duration) -> Self {
        self.visibility_timeout = timeout;
        self
    }

    pub fn with_wait_time(mut self, wait: Duration) -> Self {
        self.wait_time = wait;
        self
    }

    /// Check the configuration without contacting any queue.
    ///
    /// # Errors
    ///
    /// - `MissingSource` if the source is empty
    /// - `MissingDestination` if executing without a destination
    /// - `InvalidQueueName` if either name is not a valid queue name
    /// - `SameQueue` if executing with identical source and destination
    /// - `InvalidVisibilityTimeout` if the timeout is under one second; skipped
    ///   messages would reappear at once and the run would never end
    pub fn validate(&self) -> Result<ValidatedQueues, ConfigError> {
        if self.source.trim().is_empty() {
            return Err(ConfigError::MissingSource);
        }

        if self.visibility_timeout < Duration::seconds(1) {
            return Err(ConfigError::InvalidVisibilityTimeout {
                seconds: self.visibility_timeout.num_seconds(),
            });
        }

        let dest = self.dest.as_deref().filter(|d| !d.trim().is_empty());
        if self.execute && dest.is_none() {
            return Err(ConfigError::MissingDestination);
        }

        let source = parse_queue_name(&self.source)?;
        let dest = dest.map(parse_queue_name).transpose()?;

        if self.execute && dest.as_ref() == Some(&source) {
            return Err(ConfigError::SameQueue {
                queue: source.to_string(),
            });
        }

        Ok(ValidatedQueues { source, dest })
    }
}

fn parse_queue_name(name: &str) -> Result<QueueName, ConfigError> {
    QueueName::new(name.trim().to_string()).map_err(|source| ConfigError::InvalidQueueName {
        name: name.to_string(),
        source,
    })
}
