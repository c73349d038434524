//! # Queue Migrator Core
//!
//! Moves messages from one queue to another in bounded batches.
//!
//! Each iteration receives up to ten messages from the source, keeps the ones
//! that are young enough and contain the body filter, forwards them to the
//! destination and finally deletes from the source only the messages the
//! destination confirmed. In dry-run mode nothing is sent or deleted.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use queue_migrator_core::{MigrationConfig, Migrator, RunContext};
//! use queue_migrator_runtime::InMemoryProvider;
//!
//! # async fn example() -> Result<(), queue_migrator_core::MigrateError> {
//! let provider = InMemoryProvider::default();
//! let config = MigrationConfig::new("orders-dlq")
//!     .with_destination("orders")
//!     .with_execute(true);
//!
//! let summary = Migrator::new(&provider)
//!     .run(&config, &RunContext::new())
//!     .await?;
//! println!("moved {} messages", summary.sent);
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod config;
pub mod context;
pub mod error;
pub mod filter;
pub mod migrator;
pub mod summary;

pub use batch::{next_batch_size, MAX_BATCH_SIZE};
pub use config::{MigrationConfig, ValidatedQueues};
pub use context::RunContext;
pub use error::{ConfigError, MigrateError};
pub use filter::{Eligibility, MessageFilter};
pub use migrator::Migrator;
pub use summary::MigrationSummary;
