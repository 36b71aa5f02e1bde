//! Acme Mirror Engine
//!
//! The engine is the core of the Acme mirror gateway: it keeps a locally-owned, idempotent mirror of order data
//! held by an external commerce platform, driven by inbound webhook notifications.
//!
//! The library is divided into two main sections:
//! 1. Database management and control ([`mod@traits`], [`SqliteDatabase`]). SQLite is the supported backend. You
//!    should never need to access the database directly; the data types it stores are defined in [`mod@db_types`]
//!    and are public.
//! 2. The reconciliation core ([`mod@reconciler`]). [`ReconciliationApi`] runs the polling cycle that discovers
//!    pending notifications, fetches authoritative order state, validates it, and applies the insert/update/skip
//!    decision, recording per-item and per-run outcomes durably as it goes.
pub mod db_types;
pub mod reconciler;
pub mod traits;

#[cfg(feature = "sqlite")]
mod sqlite;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;

pub use reconciler::ReconciliationApi;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteDatabase;
pub use traits::{
    OrderManagement,
    OrderSource,
    ReconciliationDatabase,
    RunManagement,
    UpsertOutcome,
    WebhookManagement,
};
