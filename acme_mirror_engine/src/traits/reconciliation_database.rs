use thiserror::Error;

use crate::{
    db_types::{OrderSnapshot, ProcessingRun, WebhookEvent},
    traits::{ItemOutcome, UpsertOutcome},
};

/// The write-side contract the reconciliation worker drives.
///
/// Commit isolation is the essential property: each webhook event's reconciliation (upsert + status update) is its
/// own unit of work, so a failure partway through one item never rolls back state already committed for the run or
/// for other items. Run bookkeeping (the run row and its counters) is written separately from item work.
#[allow(async_fn_in_trait)]
pub trait ReconciliationDatabase: Clone {
    /// The URL of the database
    fn url(&self) -> &str;

    /// Returns every webhook event currently in `Pending` status, oldest first. The caller treats the result as a
    /// fixed batch; events arriving afterwards wait for the next cycle.
    async fn fetch_pending_webhooks(&self) -> Result<Vec<WebhookEvent>, ReconciliationError>;

    /// Re-fetches a single webhook event. `None` means it vanished since discovery, which the worker treats as a
    /// benign race and skips silently.
    async fn fetch_webhook(&self, id: i64) -> Result<Option<WebhookEvent>, ReconciliationError>;

    /// Applies the upsert decision for a validated snapshot in a single transaction:
    /// * no mirror for (source_system, external_order_id) → insert the order and its lines;
    /// * mirror exists and matches the snapshot exactly → write nothing;
    /// * mirror exists and differs → update the scalar fields and replace the full line collection.
    async fn upsert_reconciled_order(
        &self,
        source_system: &str,
        snapshot: &OrderSnapshot,
    ) -> Result<UpsertOutcome, ReconciliationError>;

    /// Marks the event terminal `Processed` and increments its attempt counter.
    async fn mark_webhook_processed(&self, id: i64) -> Result<WebhookEvent, ReconciliationError>;

    /// Marks the event terminal `Failed`, increments its attempt counter and records the failure message on the
    /// event itself. Failed events are not requeued; they are only reprocessed if re-submitted.
    async fn mark_webhook_failed(&self, id: i64, message: &str) -> Result<WebhookEvent, ReconciliationError>;

    /// Opens a new processing run with `Running` status and zeroed counters.
    async fn create_run(&self) -> Result<ProcessingRun, ReconciliationError>;

    /// Increments the run counter matching the given outcome. A `Vanished` outcome is a no-op.
    async fn incr_run_counters(&self, run_id: i64, outcome: ItemOutcome) -> Result<(), ReconciliationError>;

    /// Closes the run: sets `Completed` status and the end time. Called regardless of item outcomes.
    async fn close_run(&self, run_id: i64) -> Result<ProcessingRun, ReconciliationError>;

    /// Appends an error to the run's ledger for a failed item.
    async fn record_processing_error(
        &self,
        run_id: i64,
        source_system: &str,
        external_order_id: &str,
        message: &str,
    ) -> Result<(), ReconciliationError>;

    /// Closes the database connection.
    async fn close(&mut self) -> Result<(), ReconciliationError> {
        Ok(())
    }
}

#[derive(Debug, Clone, Error)]
pub enum ReconciliationError {
    #[error("We have an internal database engine error (configuration/uptime etc.): {0}")]
    DatabaseError(String),
    #[error("The webhook event with id {0} does not exist")]
    WebhookNotFound(i64),
    #[error("The processing run with id {0} does not exist")]
    RunNotFound(i64),
}

impl From<sqlx::Error> for ReconciliationError {
    fn from(e: sqlx::Error) -> Self {
        ReconciliationError::DatabaseError(e.to_string())
    }
}
