//! The reconciliation core.
//!
//! [`ReconciliationApi`] drives the end-to-end cycle: discover pending webhook events, open a run, process each
//! event in isolation (fetch the authoritative snapshot, validate it, apply the upsert decision), and close the
//! run with aggregate counters. [`validate_snapshot`] and [`snapshot_matches_order`] are the two pure decision
//! functions the cycle leans on.
mod api;
mod compare;
mod errors;
mod validate;

pub use api::ReconciliationApi;
pub use compare::snapshot_matches_order;
pub use errors::ItemError;
pub use validate::{validate_snapshot, ValidationError};
