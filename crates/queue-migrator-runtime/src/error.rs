//! Error types for queue operations.
//!
//! [`QueueError`] covers failures of a whole request: the call could not be
//! made, was rejected, or its response could not be understood. Failures of
//! individual entries inside an otherwise successful batch call are not
//! errors; they are reported through [`crate::client::BatchResult::failed`].

use thiserror::Error;

/// Request-level error for all queue operations
#[derive(Debug, Error)]
pub enum QueueError {
    #[error("Queue not found: {queue_name}")]
    QueueNotFound { queue_name: String },

    #[error("Connection failed: {message}")]
    ConnectionFailed { message: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Batch request contains no entries")]
    EmptyBatch,

    #[error("Batch size {size} exceeds maximum {max_size}")]
    BatchTooLarge { size: usize, max_size: usize },

    #[error("Batch entry id '{id}' is used more than once")]
    DuplicateBatchEntryId { id: String },

    #[error("Provider error ({provider}): {code} - {message}")]
    ProviderError {
        provider: String,
        code: String,
        message: String,
    },

    #[error("Serialization failed: {0}")]
    SerializationError(#[from] SerializationError),

    #[error("Configuration error: {0}")]
    ConfigurationError(#[from] ConfigurationError),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationError),
}

/// Errors while decoding provider responses
#[derive(Debug, Error)]
pub enum SerializationError {
    #[error("Malformed XML response: {message}")]
    Xml { message: String },

    #[error("Element <{element}> missing from response")]
    MissingElement { element: String },
}

/// Provider configuration rejected at construction
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Invalid configuration: {message}")]
    Invalid { message: String },
}

/// Validation errors
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required field missing: {field}")]
    Required { field: String },

    #[error("Invalid format for {field}: {message}")]
    InvalidFormat { field: String, message: String },

    #[error("Value out of range for {field}: {message}")]
    OutOfRange { field: String, message: String },
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
