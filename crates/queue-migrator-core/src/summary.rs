//! Counters reported at the end of a run.

/// Totals for one migration run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MigrationSummary {
    /// Eligible messages found, whether or not they were sent (dry run included)
    pub processed: u32,
    /// Messages the destination confirmed
    pub sent: u32,
    /// Messages the destination rejected; they stay on the source
    pub send_failed: u32,
    /// Messages removed from the source after a confirmed send
    pub deleted: u32,
    /// Sent messages whose source deletion failed; they now exist in both queues
    pub delete_failed: u32,
    pub skipped_too_old: u32,
    pub skipped_filtered: u32,
    /// Messages without a reported send time
    pub skipped_unknown_age: u32,
    /// Receive calls that returned messages
    pub batches: u32,
}
