use std::fmt::Debug;

use log::*;

use crate::{
    db_types::WebhookEvent,
    reconciler::{validate_snapshot, ItemError},
    traits::{
        ItemOutcome,
        OrderSource,
        ReconciliationDatabase,
        ReconciliationError,
        RunCounters,
        RunSummary,
        UpsertOutcome,
    },
};

/// `ReconciliationApi` drives the reconciliation cycle: it ties the notification store, the order source, the
/// validator and the idempotency comparison together, and keeps the run ledger as it goes.
///
/// The API is deliberately single-flight: callers invoke [`Self::run_cycle`] from one scheduler task, so no two
/// cycles ever overlap and run-counter updates need no locking. The `source_system` label identifying the
/// external platform is explicit configuration, so a second instance pointed at a different platform needs no
/// code changes.
pub struct ReconciliationApi<B, S> {
    db: B,
    source: S,
    source_system: String,
}

impl<B, S> Debug for ReconciliationApi<B, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ReconciliationApi ({})", self.source_system)
    }
}

impl<B, S> ReconciliationApi<B, S> {
    pub fn new(db: B, source: S, source_system: impl Into<String>) -> Self {
        Self { db, source, source_system: source_system.into() }
    }

    pub fn source_system(&self) -> &str {
        self.source_system.as_str()
    }

    pub fn db(&self) -> &B {
        &self.db
    }
}

impl<B, S> ReconciliationApi<B, S>
where
    B: ReconciliationDatabase,
    S: OrderSource,
{
    /// Runs one reconciliation cycle.
    ///
    /// Discovers the current batch of pending webhook events and, if there are any, opens a run, processes each
    /// event in isolation, and closes the run `Completed` no matter how many items failed. Returns `None` when
    /// there was nothing to do (no run row is created in that case).
    ///
    /// Only failures of the run bookkeeping itself (open/close) escape this method; per-item failures are
    /// converted into persisted state and counters.
    pub async fn run_cycle(&self) -> Result<Option<RunSummary>, ReconciliationError> {
        let batch = self.db.fetch_pending_webhooks().await?;
        if batch.is_empty() {
            trace!("🔁️ No pending webhook events. Nothing to reconcile.");
            return Ok(None);
        }
        let run = self.db.create_run().await?;
        info!("🔁️ Run #{} opened for a batch of {} webhook event(s)", run.id, batch.len());
        let mut counters = RunCounters::default();
        for event in &batch {
            let outcome = self.process_webhook(run.id, event.id).await;
            counters.record(outcome);
        }
        let run = self.db.close_run(run.id).await?;
        info!(
            "🔁️ Run #{} closed. {} processed, {} skipped, {} failed",
            run.id, counters.processed, counters.skipped, counters.failed
        );
        Ok(Some(RunSummary { run_id: run.id, batch_size: batch.len(), counters }))
    }

    /// Processes a single webhook event within a run. Never returns an error: every failure mode is converted
    /// into an outcome so that one bad event cannot abort the rest of the batch.
    pub async fn process_webhook(&self, run_id: i64, webhook_id: i64) -> ItemOutcome {
        match self.try_process_webhook(run_id, webhook_id).await {
            Ok(outcome) => outcome,
            Err(e) => {
                // Bookkeeping for this item failed; the event may be left Pending and will be retried next cycle.
                error!("🔁️ Bookkeeping failure while processing webhook event {webhook_id}: {e}");
                ItemOutcome::Failed
            },
        }
    }

    async fn try_process_webhook(&self, run_id: i64, webhook_id: i64) -> Result<ItemOutcome, ReconciliationError> {
        let Some(event) = self.db.fetch_webhook(webhook_id).await? else {
            debug!("🔁️ Webhook event {webhook_id} vanished between discovery and processing. Skipping.");
            return Ok(ItemOutcome::Vanished);
        };
        let outcome = match self.reconcile(&event).await {
            Ok(UpsertOutcome::Unchanged) => {
                debug!("🔁️ Order {} unchanged. Mirror left untouched.", event.external_order_id);
                self.db.mark_webhook_processed(event.id).await?;
                ItemOutcome::Skipped
            },
            Ok(outcome) => {
                debug!("🔁️ Order {} reconciled ({outcome:?})", event.external_order_id);
                self.db.mark_webhook_processed(event.id).await?;
                ItemOutcome::Processed
            },
            Err(e) => {
                let reason = e.to_string();
                warn!("🔁️ Webhook event {} ({}) failed reconciliation. {reason}", event.id, event.external_order_id);
                self.db.mark_webhook_failed(event.id, &reason).await?;
                self.db
                    .record_processing_error(run_id, &self.source_system, &event.external_order_id, &reason)
                    .await?;
                ItemOutcome::Failed
            },
        };
        self.db.incr_run_counters(run_id, outcome).await?;
        Ok(outcome)
    }

    /// The reconciliation itself: fetch the authoritative snapshot, validate it, and apply the upsert decision.
    async fn reconcile(&self, event: &WebhookEvent) -> Result<UpsertOutcome, ItemError> {
        let snapshot = self.source.fetch_order(&event.external_order_id).await?;
        validate_snapshot(&snapshot)?;
        let outcome = self.db.upsert_reconciled_order(&self.source_system, &snapshot).await?;
        Ok(outcome)
    }
}
