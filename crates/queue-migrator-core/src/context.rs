//! Per-run context passed explicitly through the migrator.

use queue_migrator_runtime::Timestamp;
use tracing::Span;
use uuid::Uuid;

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;

/// Fixed facts about one migration run.
///
/// `run_time` is captured once and every age comparison of the run uses it,
/// so a long-running migration does not drift its age cut-off. All log output
/// of the run is recorded under `span`.
#[derive(Debug, Clone)]
pub struct RunContext {
    run_time: Timestamp,
    run_id: Uuid,
    span: Span,
}

impl RunContext {
    /// Create a context anchored at the current time
    pub fn new() -> Self {
        Self::at(Timestamp::now())
    }

    /// Create a context anchored at a given instant
    pub fn at(run_time: Timestamp) -> Self {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("migration_run", run_id = %run_id);
        Self {
            run_time,
            run_id,
            span,
        }
    }

    /// Reference instant for message ages
    pub fn run_time(&self) -> Timestamp {
        self.run_time
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn span(&self) -> &Span {
        &self.span
    }
}

impl Default for RunContext {
    fn default() -> Self {
        Self::new()
    }
}
