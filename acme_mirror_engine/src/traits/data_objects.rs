use serde::{Deserialize, Serialize};

use crate::db_types::{Order, OrderLine, ProcessingError, ProcessingRun};

/// Result of the upsert decision for one fetched snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// No mirror existed for the (source_system, external_order_id) pair; a new order and its lines were inserted.
    Inserted,
    /// A mirror existed and differed materially; its scalars were updated and its lines replaced.
    Updated,
    /// A mirror existed and matched the snapshot exactly; nothing was written.
    Unchanged,
}

/// Terminal outcome of processing one webhook event within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemOutcome {
    /// The mirror was inserted or updated.
    Processed,
    /// The snapshot matched the existing mirror; no write was needed.
    Skipped,
    /// Fetching, validation or the upsert failed. The event carries the error.
    Failed,
    /// The event disappeared between discovery and processing. Not counted in run totals.
    Vanished,
}

/// In-memory tally of item outcomes for one run. The authoritative counters live on the run row; this copy is
/// returned to the caller for logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunCounters {
    pub processed: i64,
    pub skipped: i64,
    pub failed: i64,
}

impl RunCounters {
    pub fn record(&mut self, outcome: ItemOutcome) {
        match outcome {
            ItemOutcome::Processed => self.processed += 1,
            ItemOutcome::Skipped => self.skipped += 1,
            ItemOutcome::Failed => self.failed += 1,
            ItemOutcome::Vanished => {},
        }
    }

    pub fn total(&self) -> i64 {
        self.processed + self.skipped + self.failed
    }
}

/// Summary of one completed reconciliation cycle.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub run_id: i64,
    /// Number of webhook events captured in the discovery snapshot at the start of the cycle.
    pub batch_size: usize,
    pub counters: RunCounters,
}

/// A mirrored order together with its line items, as served by the visibility endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderWithLines {
    #[serde(flatten)]
    pub order: Order,
    pub lines: Vec<OrderLine>,
}

/// A processing run together with (a bounded number of) its recorded errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunWithErrors {
    #[serde(flatten)]
    pub run: ProcessingRun,
    pub errors: Vec<ProcessingError>,
}
