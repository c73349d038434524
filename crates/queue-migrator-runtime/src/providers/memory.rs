//! In-memory queue provider implementation for testing and development.
//!
//! This module provides an in-memory queue that behaves like SQS where it
//! matters to callers:
//! - Queues must exist before they can be resolved
//! - Received messages are hidden for the visibility timeout
//! - Every delivery gets a fresh receipt handle; stale handles cannot delete
//! - Batch calls enforce SQS request limits and report per-entry failures
//!
//! This provider is intended for:
//! - Unit testing of queue-migrator consumers
//! - Reference behavior for the AWS provider

use crate::client::{
    validate_batch_ids, BatchEntryError, BatchResult, DeletedEntry, QueueProvider, SentEntry,
};
use crate::error::{QueueError, ValidationError};
use crate::message::{
    DeleteBatchEntry, MessageId, QueueName, QueueUrl, ReceiptHandle, ReceiveOptions,
    ReceivedMessage, SendBatchEntry, Timestamp,
};
use crate::provider::{InMemoryConfig, ProviderType};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;

/// URL scheme of in-memory queue URLs
const URL_PREFIX: &str = "memory://";

// ============================================================================
// Internal Storage Structures
// ============================================================================

/// Thread-safe storage for all queues
struct QueueStorage {
    queues: HashMap<QueueName, InMemoryQueue>,
    config: InMemoryConfig,
}

impl QueueStorage {
    fn new(config: InMemoryConfig) -> Self {
        Self {
            queues: HashMap::new(),
            config,
        }
    }

    /// Find the queue a URL points at
    fn queue_mut(&mut self, queue_url: &QueueUrl) -> Result<&mut InMemoryQueue, QueueError> {
        let name = queue_url
            .as_str()
            .strip_prefix(URL_PREFIX)
            .and_then(|name| QueueName::new(name.to_string()).ok());

        match name {
            Some(name) => self
                .queues
                .get_mut(&name)
                .ok_or_else(|| QueueError::QueueNotFound {
                    queue_name: name.to_string(),
                }),
            None => Err(QueueError::QueueNotFound {
                queue_name: queue_url.to_string(),
            }),
        }
    }
}

/// Internal queue state for a single queue, oldest message first
#[derive(Default)]
struct InMemoryQueue {
    messages: Vec<StoredMessage>,
}

/// A message stored in the queue with delivery metadata
#[derive(Clone)]
struct StoredMessage {
    message_id: MessageId,
    body: String,
    sent_at: Timestamp,
    /// Receipt of the most recent delivery
    receipt_handle: Option<String>,
    /// Hidden from receivers until this instant
    invisible_until: Option<Timestamp>,
}

impl StoredMessage {
    fn new(body: String, sent_at: Timestamp) -> Self {
        Self {
            message_id: MessageId::new(),
            body,
            sent_at,
            receipt_handle: None,
            invisible_until: None,
        }
    }

    /// Check if message is available for receiving
    fn is_visible(&self, now: Timestamp) -> bool {
        match self.invisible_until {
            Some(until) => now >= until,
            None => true,
        }
    }
}

/// Characters SQS accepts in a message body
fn is_allowed_body_char(c: char) -> bool {
    matches!(c,
        '\u{9}' | '\u{A}' | '\u{D}'
        | '\u{20}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}

fn storage_poisoned() -> QueueError {
    QueueError::ProviderError {
        provider: ProviderType::InMemory.to_string(),
        code: "StoragePoisoned".to_string(),
        message: "in-memory storage lock was poisoned".to_string(),
    }
}

// ============================================================================
// InMemoryProvider
// ============================================================================

/// In-memory queue provider implementation
pub struct InMemoryProvider {
    storage: Arc<RwLock<QueueStorage>>,
}

impl InMemoryProvider {
    /// Create new in-memory provider with configuration
    pub fn new(config: InMemoryConfig) -> Self {
        Self {
            storage: Arc::new(RwLock::new(QueueStorage::new(config))),
        }
    }

    /// Create an empty queue; creating an existing queue keeps its contents
    pub fn create_queue(&self, queue: &QueueName) -> Result<QueueUrl, QueueError> {
        let mut storage = self.write_storage()?;
        storage.queues.entry(queue.clone()).or_default();
        Ok(Self::url_for(queue))
    }

    /// Add a message as if it had been enqueued at `sent_at`
    pub fn seed_message(
        &self,
        queue: &QueueName,
        body: impl Into<String>,
        sent_at: Timestamp,
    ) -> Result<MessageId, QueueError> {
        let mut storage = self.write_storage()?;
        let stored = StoredMessage::new(body.into(), sent_at);
        let message_id = stored.message_id.clone();
        storage
            .queues
            .get_mut(queue)
            .ok_or_else(|| QueueError::QueueNotFound {
                queue_name: queue.to_string(),
            })?
            .messages
            .push(stored);
        Ok(message_id)
    }

    /// Number of messages in a queue, visible or not
    pub fn message_count(&self, queue: &QueueName) -> usize {
        self.storage
            .read()
            .ok()
            .and_then(|storage| storage.queues.get(queue).map(|q| q.messages.len()))
            .unwrap_or(0)
    }

    /// Bodies of all messages in a queue, oldest first
    pub fn bodies(&self, queue: &QueueName) -> Vec<String> {
        self.storage
            .read()
            .ok()
            .and_then(|storage| {
                storage
                    .queues
                    .get(queue)
                    .map(|q| q.messages.iter().map(|m| m.body.clone()).collect())
            })
            .unwrap_or_default()
    }

    fn url_for(queue: &QueueName) -> QueueUrl {
        QueueUrl::new(format!("{}{}", URL_PREFIX, queue))
    }

    fn write_storage(&self) -> Result<std::sync::RwLockWriteGuard<'_, QueueStorage>, QueueError> {
        self.storage.write().map_err(|_| storage_poisoned())
    }
}

impl Default for InMemoryProvider {
    fn default() -> Self {
        Self::new(InMemoryConfig::default())
    }
}

#[async_trait]
impl QueueProvider for InMemoryProvider {
    async fn resolve_queue_url(&self, queue: &QueueName) -> Result<QueueUrl, QueueError> {
        let storage = self.storage.read().map_err(|_| storage_poisoned())?;

        if storage.queues.contains_key(queue) {
            Ok(Self::url_for(queue))
        } else {
            Err(QueueError::QueueNotFound {
                queue_name: queue.to_string(),
            })
        }
    }

    async fn receive_messages(
        &self,
        queue_url: &QueueUrl,
        options: &ReceiveOptions,
    ) -> Result<Vec<ReceivedMessage>, QueueError> {
        if options.max_messages == 0 || options.max_messages > self.max_batch_size() {
            return Err(QueueError::ValidationError(ValidationError::OutOfRange {
                field: "max_messages".to_string(),
                message: format!("must be 1-{}", self.max_batch_size()),
            }));
        }

        let mut storage = self.write_storage()?;
        let queue = storage.queue_mut(queue_url)?;

        let now = Timestamp::now();
        let invisible_until =
            Timestamp::from_datetime(now.as_datetime() + options.visibility_timeout);

        let received = queue
            .messages
            .iter_mut()
            .filter(|m| m.is_visible(now))
            .take(options.max_messages as usize)
            .map(|m| {
                let receipt = uuid::Uuid::new_v4().to_string();
                m.receipt_handle = Some(receipt.clone());
                m.invisible_until = Some(invisible_until);
                ReceivedMessage {
                    message_id: m.message_id.clone(),
                    body: m.body.clone(),
                    receipt_handle: ReceiptHandle::new(receipt),
                    sent_at: Some(m.sent_at),
                }
            })
            .collect();

        Ok(received)
    }

    async fn send_message_batch(
        &self,
        queue_url: &QueueUrl,
        entries: &[SendBatchEntry],
    ) -> Result<BatchResult<SentEntry>, QueueError> {
        validate_batch_ids(entries.iter().map(|e| e.id.as_str()), self.max_batch_size())?;

        let mut storage = self.write_storage()?;
        let max_message_size = storage.config.max_message_size;
        let queue = storage.queue_mut(queue_url)?;

        let mut result = BatchResult::new();
        for entry in entries {
            if entry.body.is_empty() {
                result.failed.push(BatchEntryError {
                    id: entry.id.clone(),
                    code: "MissingParameter".to_string(),
                    message: "The request must contain the parameter MessageBody.".to_string(),
                    sender_fault: true,
                });
            } else if entry.body.len() > max_message_size {
                result.failed.push(BatchEntryError {
                    id: entry.id.clone(),
                    code: "MessageTooLong".to_string(),
                    message: format!(
                        "Message must be shorter than {} bytes.",
                        max_message_size
                    ),
                    sender_fault: true,
                });
            } else if let Some(bad) = entry.body.chars().find(|c| !is_allowed_body_char(*c)) {
                result.failed.push(BatchEntryError {
                    id: entry.id.clone(),
                    code: "InvalidMessageContents".to_string(),
                    message: format!(
                        "Invalid binary character '#x{:X}' was found in the message body",
                        bad as u32
                    ),
                    sender_fault: true,
                });
            } else {
                let stored = StoredMessage::new(entry.body.clone(), Timestamp::now());
                result.successful.push(SentEntry {
                    id: entry.id.clone(),
                    message_id: stored.message_id.clone(),
                });
                queue.messages.push(stored);
            }
        }

        Ok(result)
    }

    async fn delete_message_batch(
        &self,
        queue_url: &QueueUrl,
        entries: &[DeleteBatchEntry],
    ) -> Result<BatchResult<DeletedEntry>, QueueError> {
        validate_batch_ids(entries.iter().map(|e| e.id.as_str()), self.max_batch_size())?;

        let mut storage = self.write_storage()?;
        let queue = storage.queue_mut(queue_url)?;

        let mut result = BatchResult::new();
        for entry in entries {
            let position = queue.messages.iter().position(|m| {
                m.receipt_handle.as_deref() == Some(entry.receipt_handle.handle())
            });

            match position {
                Some(index) => {
                    queue.messages.remove(index);
                    result.successful.push(DeletedEntry {
                        id: entry.id.clone(),
                    });
                }
                None => result.failed.push(BatchEntryError {
                    id: entry.id.clone(),
                    code: "ReceiptHandleIsInvalid".to_string(),
                    message: "The input receipt handle is invalid.".to_string(),
                    sender_fault: true,
                }),
            }
        }

        Ok(result)
    }

    fn provider_type(&self) -> ProviderType {
        ProviderType::InMemory
    }

    fn max_batch_size(&self) -> u32 {
        self.storage
            .read()
            .map(|storage| storage.config.max_batch_size)
            .unwrap_or_else(|_| ProviderType::InMemory.max_batch_size())
    }
}
