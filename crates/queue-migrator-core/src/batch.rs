//! Batch sizing for the migration loop.

#[cfg(test)]
#[path = "batch_tests.rs"]
mod tests;

/// Largest number of messages a single receive, send or delete call carries
pub const MAX_BATCH_SIZE: u32 = 10;

/// Size of the next receive given the attempt budget.
///
/// Returns `None` once `processed` has reached `limit`, otherwise
/// `min(limit - processed, MAX_BATCH_SIZE)`.
pub fn next_batch_size(limit: u32, processed: u32) -> Option<u32> {
    match limit.saturating_sub(processed) {
        0 => None,
        remaining => Some(remaining.min(MAX_BATCH_SIZE)),
    }
}
