//! Client trait and batch result types for queue operations.

use crate::error::QueueError;
use crate::message::{
    DeleteBatchEntry, MessageId, QueueName, QueueUrl, ReceiveOptions, ReceivedMessage,
    SendBatchEntry,
};
use crate::provider::ProviderType;
use async_trait::async_trait;
use std::collections::HashSet;

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;

/// Interface implemented by specific queue providers (AWS SQS, in-memory)
///
/// Methods return `Err` only when the request as a whole failed. Batch calls
/// that were accepted report the outcome of every entry in a [`BatchResult`].
#[async_trait]
pub trait QueueProvider: Send + Sync {
    /// Resolve a queue name to the URL all other operations address
    async fn resolve_queue_url(&self, queue: &QueueName) -> Result<QueueUrl, QueueError>;

    /// Receive up to `options.max_messages` messages, including their enqueue time
    async fn receive_messages(
        &self,
        queue_url: &QueueUrl,
        options: &ReceiveOptions,
    ) -> Result<Vec<ReceivedMessage>, QueueError>;

    /// Enqueue a batch of messages
    async fn send_message_batch(
        &self,
        queue_url: &QueueUrl,
        entries: &[SendBatchEntry],
    ) -> Result<BatchResult<SentEntry>, QueueError>;

    /// Delete a batch of received messages by receipt handle
    async fn delete_message_batch(
        &self,
        queue_url: &QueueUrl,
        entries: &[DeleteBatchEntry],
    ) -> Result<BatchResult<DeletedEntry>, QueueError>;

    /// Get provider type
    fn provider_type(&self) -> ProviderType;

    /// Get maximum batch size
    fn max_batch_size(&self) -> u32 {
        self.provider_type().max_batch_size()
    }
}

// ============================================================================
// Batch Results
// ============================================================================

/// Per-entry outcome of a batch call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchResult<T> {
    pub successful: Vec<T>,
    pub failed: Vec<BatchEntryError>,
}

impl<T> BatchResult<T> {
    pub fn new() -> Self {
        Self {
            successful: Vec::new(),
            failed: Vec::new(),
        }
    }
}

impl<T> Default for BatchResult<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Entry accepted by a send-batch call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEntry {
    /// Id of the request entry
    pub id: String,
    /// Identifier the destination queue assigned to the new message
    pub message_id: MessageId,
}

/// Entry accepted by a delete-batch call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedEntry {
    pub id: String,
}

/// Entry rejected inside an otherwise successful batch call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEntryError {
    pub id: String,
    pub code: String,
    pub message: String,
    /// Whether the caller (rather than the service) caused the failure
    pub sender_fault: bool,
}

impl std::fmt::Display for BatchEntryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// Check the request-level constraints every batch call shares
///
/// A batch must hold between one and `max_batch_size` entries and no entry id
/// may repeat.
pub fn validate_batch_ids<'a>(
    ids: impl ExactSizeIterator<Item = &'a str>,
    max_batch_size: u32,
) -> Result<(), QueueError> {
    let size = ids.len();
    if size == 0 {
        return Err(QueueError::EmptyBatch);
    }
    if size > max_batch_size as usize {
        return Err(QueueError::BatchTooLarge {
            size,
            max_size: max_batch_size as usize,
        });
    }

    let mut seen = HashSet::with_capacity(size);
    for id in ids {
        if !seen.insert(id) {
            return Err(QueueError::DuplicateBatchEntryId { id: id.to_string() });
        }
    }

    Ok(())
}
