//! # Queue Migrator Runtime
//!
//! Queue client runtime for moving messages between SQS queues, with an
//! HTTP-based AWS SQS provider and an in-memory provider for tests.
//!
//! This library provides:
//! - Validated queue identifiers and message types
//! - A provider-agnostic `QueueProvider` trait covering queue URL resolution,
//!   receive, batch send and batch delete
//! - Per-entry batch results, separate from request-level errors
//!
//! ## Module Organization
//!
//! - [error] - Error types for all queue operations
//! - [message] - Message structures, receipt handles and batch entries
//! - [provider] - Provider types and configuration
//! - [client] - The provider trait and batch result types
//! - [providers] - AWS SQS and in-memory implementations

// Module declarations
pub mod client;
pub mod error;
pub mod message;
pub mod provider;
pub mod providers;

// Re-export commonly used types at crate root for convenience
pub use client::{BatchEntryError, BatchResult, DeletedEntry, QueueProvider, SentEntry};
pub use error::{ConfigurationError, QueueError, SerializationError, ValidationError};
pub use message::{
    DeleteBatchEntry, MessageId, QueueName, QueueUrl, ReceiptHandle, ReceiveOptions,
    ReceivedMessage, SendBatchEntry, Timestamp,
};
pub use provider::{AwsSqsConfig, InMemoryConfig, ProviderType};
pub use providers::{AwsError, AwsSqsProvider, InMemoryProvider};
