//! Interface contracts of the mirror gateway database backends.
//!
//! The reconciliation worker never talks to a database directly; it drives these traits. A backend (SQLite is the
//! only one currently shipped) implements them all.
//!
//! * [`ReconciliationDatabase`] is the write-side contract the worker drives: discovering pending webhook events,
//!   upserting mirrored orders, marking events terminal, and keeping the run ledger.
//! * [`WebhookManagement`] is the ingestion-side contract: persisting a newly received event as `Pending`.
//! * [`OrderManagement`] and [`RunManagement`] are the read-only contracts backing the visibility endpoints.
//! * [`OrderSource`] abstracts the external commerce API that holds the authoritative order state.
mod data_objects;
mod order_management;
mod order_source;
mod reconciliation_database;
mod run_management;
mod webhook_management;

pub use data_objects::{ItemOutcome, OrderWithLines, RunCounters, RunSummary, RunWithErrors, UpsertOutcome};
pub use order_management::OrderManagement;
pub use order_source::{OrderSource, OrderSourceError};
pub use reconciliation_database::{ReconciliationDatabase, ReconciliationError};
pub use run_management::RunManagement;
pub use webhook_management::WebhookManagement;
