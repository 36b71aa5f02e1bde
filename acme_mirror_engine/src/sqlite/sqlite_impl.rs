//! `SqliteDatabase` is a concrete implementation of an Acme mirror engine backend.
//!
//! Unsurprisingly, it uses SQLite as the backend and implements all the traits defined in the [`crate::traits`]
//! module.
use std::fmt::Debug;

use log::*;
use sqlx::SqlitePool;

use super::db::{new_pool, orders, runs, webhooks};
use crate::{
    db_types::{
        NewWebhookEvent,
        Order,
        OrderLine,
        OrderSnapshot,
        ProcessingError,
        ProcessingRun,
        WebhookEvent,
        WebhookStatus,
    },
    reconciler::snapshot_matches_order,
    traits::{
        ItemOutcome,
        OrderManagement,
        ReconciliationDatabase,
        ReconciliationError,
        RunManagement,
        UpsertOutcome,
        WebhookManagement,
    },
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl SqliteDatabase {
    /// Creates a new connection pool against the given database URL and returns the database handle.
    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = new_pool(url, max_connections).await?;
        Ok(Self { url: url.to_string(), pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Brings the schema up to date. Run once at startup; safe to call on an already-migrated database.
    pub async fn run_migrations(&self) -> Result<(), ReconciliationError> {
        sqlx::migrate!("./src/sqlite/migrations")
            .run(&self.pool)
            .await
            .map_err(|e| ReconciliationError::DatabaseError(e.to_string()))?;
        info!("🗃️ Database migrations complete");
        Ok(())
    }
}

impl ReconciliationDatabase for SqliteDatabase {
    fn url(&self) -> &str {
        self.url.as_str()
    }

    async fn fetch_pending_webhooks(&self) -> Result<Vec<WebhookEvent>, ReconciliationError> {
        let mut conn = self.pool.acquire().await?;
        let pending = webhooks::fetch_pending_webhooks(&mut conn).await?;
        Ok(pending)
    }

    async fn fetch_webhook(&self, id: i64) -> Result<Option<WebhookEvent>, ReconciliationError> {
        let mut conn = self.pool.acquire().await?;
        let event = webhooks::fetch_webhook_by_id(id, &mut conn).await?;
        Ok(event)
    }

    /// Runs the full upsert decision in a single transaction, so a partial write can never leak into the mirror.
    async fn upsert_reconciled_order(
        &self,
        source_system: &str,
        snapshot: &OrderSnapshot,
    ) -> Result<UpsertOutcome, ReconciliationError> {
        let mut tx = self.pool.begin().await?;
        let existing = orders::fetch_order_by_natural_key(source_system, &snapshot.external_order_id, &mut tx).await?;
        let outcome = match existing {
            None => {
                orders::insert_full_order(source_system, snapshot, &mut tx).await?;
                UpsertOutcome::Inserted
            },
            Some(order) => {
                let lines = orders::fetch_lines_for_order(order.id, &mut tx).await?;
                if snapshot_matches_order(&order, &lines, snapshot) {
                    trace!(
                        "🗃️ Order [{source_system}/{}] matches the incoming snapshot. Nothing to write.",
                        snapshot.external_order_id
                    );
                    UpsertOutcome::Unchanged
                } else {
                    orders::replace_order(order.id, snapshot, &mut tx).await?;
                    UpsertOutcome::Updated
                }
            },
        };
        tx.commit().await?;
        Ok(outcome)
    }

    async fn mark_webhook_processed(&self, id: i64) -> Result<WebhookEvent, ReconciliationError> {
        let mut conn = self.pool.acquire().await?;
        webhooks::mark_webhook_terminal(id, WebhookStatus::Processed, None, &mut conn).await
    }

    async fn mark_webhook_failed(&self, id: i64, message: &str) -> Result<WebhookEvent, ReconciliationError> {
        let mut conn = self.pool.acquire().await?;
        webhooks::mark_webhook_terminal(id, WebhookStatus::Failed, Some(message), &mut conn).await
    }

    async fn create_run(&self) -> Result<ProcessingRun, ReconciliationError> {
        let mut conn = self.pool.acquire().await?;
        runs::create_run(&mut conn).await
    }

    async fn incr_run_counters(&self, run_id: i64, outcome: ItemOutcome) -> Result<(), ReconciliationError> {
        let mut conn = self.pool.acquire().await?;
        runs::incr_run_counter(run_id, outcome, &mut conn).await
    }

    async fn close_run(&self, run_id: i64) -> Result<ProcessingRun, ReconciliationError> {
        let mut conn = self.pool.acquire().await?;
        runs::close_run(run_id, &mut conn).await
    }

    async fn record_processing_error(
        &self,
        run_id: i64,
        source_system: &str,
        external_order_id: &str,
        message: &str,
    ) -> Result<(), ReconciliationError> {
        let mut conn = self.pool.acquire().await?;
        runs::insert_processing_error(run_id, source_system, external_order_id, message, &mut conn).await?;
        Ok(())
    }

    async fn close(&mut self) -> Result<(), ReconciliationError> {
        self.pool.close().await;
        Ok(())
    }
}

impl WebhookManagement for SqliteDatabase {
    async fn insert_webhook(&self, event: NewWebhookEvent) -> Result<WebhookEvent, ReconciliationError> {
        let mut conn = self.pool.acquire().await?;
        webhooks::insert_webhook(event, &mut conn).await
    }
}

impl OrderManagement for SqliteDatabase {
    async fn fetch_order_by_order_number(&self, order_number: &str) -> Result<Option<Order>, ReconciliationError> {
        let mut conn = self.pool.acquire().await?;
        let order = orders::fetch_order_by_order_number(order_number, &mut conn).await?;
        Ok(order)
    }

    async fn fetch_order_by_external_id(
        &self,
        source_system: &str,
        external_order_id: &str,
    ) -> Result<Option<Order>, ReconciliationError> {
        let mut conn = self.pool.acquire().await?;
        let order = orders::fetch_order_by_natural_key(source_system, external_order_id, &mut conn).await?;
        Ok(order)
    }

    async fn fetch_order_lines(&self, order_id: i64) -> Result<Vec<OrderLine>, ReconciliationError> {
        let mut conn = self.pool.acquire().await?;
        let lines = orders::fetch_lines_for_order(order_id, &mut conn).await?;
        Ok(lines)
    }
}

impl RunManagement for SqliteDatabase {
    async fn fetch_recent_runs(&self, limit: i64) -> Result<Vec<ProcessingRun>, ReconciliationError> {
        let mut conn = self.pool.acquire().await?;
        let runs = runs::fetch_recent_runs(limit, &mut conn).await?;
        Ok(runs)
    }

    async fn fetch_run(&self, run_id: i64) -> Result<Option<ProcessingRun>, ReconciliationError> {
        let mut conn = self.pool.acquire().await?;
        let run = runs::fetch_run_by_id(run_id, &mut conn).await?;
        Ok(run)
    }

    async fn fetch_errors_for_run(
        &self,
        run_id: i64,
        limit: i64,
    ) -> Result<Vec<ProcessingError>, ReconciliationError> {
        let mut conn = self.pool.acquire().await?;
        let errors = runs::fetch_errors_for_run(run_id, limit, &mut conn).await?;
        Ok(errors)
    }
}
