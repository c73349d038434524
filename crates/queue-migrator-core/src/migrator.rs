//! # Migration Loop
//!
//! Moves messages from a source queue to a destination queue in batches.
//!
//! Each iteration:
//! 1. Receives up to `min(limit - processed, 10)` messages from the source
//! 2. Keeps the messages the [`MessageFilter`] accepts; the rest are left
//!    untouched and reappear after the visibility timeout
//! 3. In dry-run mode logs what would have been moved and continues
//! 4. Otherwise sends the eligible messages to the destination in one batch
//! 5. Deletes from the source exactly the messages the destination confirmed
//!
//! The loop ends when the attempt budget is spent or a receive returns no
//! messages. Any request-level queue failure ends the run with a
//! [`MigrateError`]; per-message failures are logged and counted.

use crate::batch::next_batch_size;
use crate::config::{MigrationConfig, ValidatedQueues};
use crate::context::RunContext;
use crate::error::{ConfigError, MigrateError};
use crate::filter::{Eligibility, MessageFilter};
use crate::summary::MigrationSummary;
use queue_migrator_runtime::{
    DeleteBatchEntry, QueueName, QueueProvider, QueueUrl, ReceiptHandle, ReceiveOptions,
    ReceivedMessage, SendBatchEntry, Timestamp,
};
use std::collections::HashMap;
use tracing::{debug, info, warn, Instrument};

#[cfg(test)]
#[path = "migrator_tests.rs"]
mod tests;

/// Runs migrations against a queue provider
pub struct Migrator<'a> {
    provider: &'a dyn QueueProvider,
}

impl<'a> Migrator<'a> {
    pub fn new(provider: &'a dyn QueueProvider) -> Self {
        Self { provider }
    }

    /// Run one migration.
    ///
    /// The configuration is validated before any queue is contacted. All log
    /// output is recorded under the span of `context`.
    ///
    /// # Errors
    ///
    /// - `Configuration` if [`MigrationConfig::validate`] fails
    /// - `Resolve` if the source, or a given destination, cannot be resolved
    /// - `Receive`, `Send` or `Delete` if a queue call fails as a whole
    pub async fn run(
        &self,
        config: &MigrationConfig,
        context: &RunContext,
    ) -> Result<MigrationSummary, MigrateError> {
        let queues = config.validate()?;

        self.migrate(config, &queues, context)
            .instrument(context.span().clone())
            .await
    }

    async fn migrate(
        &self,
        config: &MigrationConfig,
        queues: &ValidatedQueues,
        context: &RunContext,
    ) -> Result<MigrationSummary, MigrateError> {
        let source_url = self.resolve(&queues.source).await?;
        let dest_url = match &queues.dest {
            Some(dest) => Some(self.resolve(dest).await?),
            None => None,
        };

        let forward_to = match (config.execute, dest_url.as_ref()) {
            (true, Some(url)) => Some(url),
            (true, None) => return Err(ConfigError::MissingDestination.into()),
            (false, _) => None,
        };

        info!(
            source = %queues.source,
            dest = ?queues.dest.as_ref().map(QueueName::as_str),
            execute = config.execute,
            limit = config.limit,
            max_age_seconds = config.max_age.num_seconds(),
            filter = %config.filter,
            run_time = %context.run_time(),
            "Starting migration"
        );
        if !config.execute {
            info!("Dry run: no messages will be sent or deleted");
        }

        let filter = MessageFilter::new(config.max_age, config.filter.clone());
        let mut summary = MigrationSummary::default();

        while let Some(batch_size) = next_batch_size(config.limit, summary.processed) {
            let options = ReceiveOptions::new()
                .with_max_messages(batch_size)
                .with_visibility_timeout(config.visibility_timeout)
                .with_wait_time(config.wait_time);

            let mut messages = self
                .provider
                .receive_messages(&source_url, &options)
                .await
                .map_err(|source| MigrateError::Receive { source })?;

            if messages.is_empty() {
                info!(queue = %queues.source, "No more messages to process");
                break;
            }

            messages.truncate(batch_size as usize);
            summary.batches += 1;
            debug!(
                batch = summary.batches,
                received = messages.len(),
                "Received message batch"
            );

            let eligible = select_eligible(
                messages,
                &filter,
                context.run_time(),
                config.verbose,
                &mut summary,
            );
            summary.processed += eligible.len() as u32;

            match forward_to {
                _ if eligible.is_empty() => {
                    debug!(batch = summary.batches, "No eligible messages in batch")
                }
                None => info!(
                    batch = summary.batches,
                    "In dry-run mode. This batch would have attempted to process {} messages",
                    eligible.len()
                ),
                Some(dest_url) => {
                    self.forward(&source_url, dest_url, eligible, &mut summary)
                        .await?
                }
            }
        }

        info!(
            processed = summary.processed,
            sent = summary.sent,
            send_failed = summary.send_failed,
            deleted = summary.deleted,
            delete_failed = summary.delete_failed,
            skipped_too_old = summary.skipped_too_old,
            skipped_filtered = summary.skipped_filtered,
            skipped_unknown_age = summary.skipped_unknown_age,
            batches = summary.batches,
            "Processed {} messages in total. Successes: {}, Failed: {}",
            summary.processed,
            summary.sent,
            summary.send_failed
        );

        Ok(summary)
    }

    async fn resolve(&self, queue: &QueueName) -> Result<QueueUrl, MigrateError> {
        let url = self
            .provider
            .resolve_queue_url(queue)
            .await
            .map_err(|source| MigrateError::Resolve {
                queue: queue.to_string(),
                source,
            })?;

        debug!(queue = %queue, url = %url, "Resolved queue URL");
        Ok(url)
    }

    /// Send one batch to the destination, then delete what it confirmed
    async fn forward(
        &self,
        source_url: &QueueUrl,
        dest_url: &QueueUrl,
        eligible: Vec<ReceivedMessage>,
        summary: &mut MigrationSummary,
    ) -> Result<(), MigrateError> {
        let mut receipts: HashMap<String, ReceiptHandle> = HashMap::with_capacity(eligible.len());
        let entries: Vec<SendBatchEntry> = eligible
            .into_iter()
            .map(|message| {
                let id = message.message_id.to_string();
                receipts.insert(id.clone(), message.receipt_handle);
                SendBatchEntry {
                    id,
                    body: message.body,
                }
            })
            .collect();

        let sent = self
            .provider
            .send_message_batch(dest_url, &entries)
            .await
            .map_err(|source| MigrateError::Send { source })?;

        for failure in &sent.failed {
            warn!(
                message_id = %failure.id,
                code = %failure.code,
                sender_fault = failure.sender_fault,
                "Failed to send message: {}",
                failure.message
            );
        }
        summary.sent += sent.successful.len() as u32;
        summary.send_failed += sent.failed.len() as u32;
        info!(
            "Sent batch to destination. Successes: {}, Failed: {}",
            sent.successful.len(),
            sent.failed.len()
        );

        let deletions: Vec<DeleteBatchEntry> = sent
            .successful
            .iter()
            .filter_map(|entry| match receipts.remove(&entry.id) {
                Some(receipt_handle) => {
                    info!(
                        message_id = %entry.id,
                        dest_message_id = %entry.message_id,
                        receipt = receipt_handle.abbreviated(),
                        "Staging message for removal"
                    );
                    Some(DeleteBatchEntry {
                        id: entry.id.clone(),
                        receipt_handle,
                    })
                }
                None => {
                    warn!(
                        message_id = %entry.id,
                        "Destination confirmed a message that was not in the batch"
                    );
                    None
                }
            })
            .collect();

        if deletions.is_empty() {
            debug!("Nothing was sent, skipping delete");
            return Ok(());
        }

        let deleted = self
            .provider
            .delete_message_batch(source_url, &deletions)
            .await
            .map_err(|source| MigrateError::Delete { source })?;

        for failure in &deleted.failed {
            warn!(
                message_id = %failure.id,
                code = %failure.code,
                "Failed to delete message from source after sending it: {}",
                failure.message
            );
        }
        summary.deleted += deleted.successful.len() as u32;
        summary.delete_failed += deleted.failed.len() as u32;
        info!(
            "Deleted batch from source. Successes: {}, Failed: {}",
            deleted.successful.len(),
            deleted.failed.len()
        );

        Ok(())
    }
}

/// Keep the messages the filter accepts, counting the rest
fn select_eligible(
    messages: Vec<ReceivedMessage>,
    filter: &MessageFilter,
    run_time: Timestamp,
    verbose: bool,
    summary: &mut MigrationSummary,
) -> Vec<ReceivedMessage> {
    messages
        .into_iter()
        .filter(|message| match filter.evaluate(message, run_time) {
            Eligibility::Eligible { age } => {
                info!(
                    message_id = %message.message_id,
                    age_seconds = age.num_seconds(),
                    receipt = message.receipt_handle.abbreviated(),
                    "Staging message"
                );
                if verbose {
                    info!(message_id = %message.message_id, "Message body: {}", message.body);
                }
                true
            }
            Eligibility::TooOld { age } => {
                debug!(
                    message_id = %message.message_id,
                    age_seconds = age.num_seconds(),
                    "Skipping message older than maximum age"
                );
                summary.skipped_too_old += 1;
                false
            }
            Eligibility::FilteredOut => {
                debug!(message_id = %message.message_id, "Skipping message not matching filter");
                summary.skipped_filtered += 1;
                false
            }
            Eligibility::UnknownAge => {
                warn!(
                    message_id = %message.message_id,
                    "Skipping message without a sent timestamp"
                );
                summary.skipped_unknown_age += 1;
                false
            }
        })
        .collect()
}
