use std::{fmt::Display, str::FromStr};

pub use amg_common::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct ConversionError(String);

//--------------------------------------    WebhookStatus     ---------------------------------------------------------
/// Processing status of an inbound webhook event.
///
/// The transition is monotone: an event is created `Pending` and is moved exactly once, by the reconciliation
/// worker, to either `Processed` or `Failed`. Terminal statuses never revert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
pub enum WebhookStatus {
    /// The event has been received and is waiting for the next reconciliation cycle.
    Pending,
    /// Reconciliation completed (including the "nothing changed" case).
    Processed,
    /// Reconciliation failed. The error is recorded on the event and in the run's error ledger.
    Failed,
}

impl Display for WebhookStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WebhookStatus::Pending => write!(f, "Pending"),
            WebhookStatus::Processed => write!(f, "Processed"),
            WebhookStatus::Failed => write!(f, "Failed"),
        }
    }
}

impl FromStr for WebhookStatus {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Processed" => Ok(Self::Processed),
            "Failed" => Ok(Self::Failed),
            s => Err(ConversionError(format!("Invalid webhook status: {s}"))),
        }
    }
}

//--------------------------------------    WebhookEvent      ---------------------------------------------------------
/// One inbound order-change notification, as persisted by the ingestion endpoint.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct WebhookEvent {
    pub id: i64,
    pub event_id: String,
    pub event_type: String,
    /// The commerce platform that emitted the event, as claimed by the sender.
    pub source_system: String,
    pub external_order_id: String,
    pub occurred_at: DateTime<Utc>,
    /// The raw notification body. Opaque to the worker; the authoritative order data is always re-fetched.
    pub payload: Option<String>,
    pub status: WebhookStatus,
    /// Number of reconciliation attempts made for this event.
    pub attempts: i64,
    pub last_error: Option<String>,
    pub created_at: DateTime<Utc>,
}

//--------------------------------------   NewWebhookEvent    ---------------------------------------------------------
/// An inbound notification before it has been persisted. Always stored with `Pending` status and zero attempts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewWebhookEvent {
    pub event_id: String,
    pub event_type: String,
    pub source_system: String,
    pub external_order_id: String,
    pub occurred_at: DateTime<Utc>,
    pub payload: Option<String>,
}

//--------------------------------------    OrderSnapshot     ---------------------------------------------------------
/// The authoritative state of an order as fetched from the order source. Transient: consumed by a single
/// reconciliation attempt and discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSnapshot {
    pub external_order_id: String,
    pub order_number: String,
    pub total: Money,
    pub currency: String,
    pub order_date: DateTime<Utc>,
    pub status: String,
    pub customer_email: Option<String>,
    pub lines: Vec<LineSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineSnapshot {
    pub sku: String,
    pub quantity: i64,
    pub unit_price: Money,
}

//--------------------------------------        Order         ---------------------------------------------------------
/// The locally-owned mirror of an external order. At most one row exists per
/// (source_system, external_order_id) pair.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub source_system: String,
    pub external_order_id: String,
    pub order_number: String,
    pub total: Money,
    pub currency: String,
    pub order_date: DateTime<Utc>,
    pub status: String,
    pub customer_email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A line item owned by a mirrored order. Lines are replaced wholesale on update, never merged.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct OrderLine {
    pub id: i64,
    pub order_id: i64,
    pub sku: String,
    pub quantity: i64,
    pub unit_price: Money,
}

//--------------------------------------      RunStatus       ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
pub enum RunStatus {
    Running,
    Completed,
}

impl Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunStatus::Running => write!(f, "Running"),
            RunStatus::Completed => write!(f, "Completed"),
        }
    }
}

impl FromStr for RunStatus {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Running" => Ok(Self::Running),
            "Completed" => Ok(Self::Completed),
            s => Err(ConversionError(format!("Invalid run status: {s}"))),
        }
    }
}

//--------------------------------------    ProcessingRun     ---------------------------------------------------------
/// One polling cycle's worth of reconciliation work. A run is only opened when the cycle found pending events,
/// and is always closed `Completed` regardless of how many items failed.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ProcessingRun {
    pub id: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub status: RunStatus,
    pub records_processed: i64,
    pub records_failed: i64,
    pub records_skipped: i64,
}

//--------------------------------------   ProcessingError    ---------------------------------------------------------
/// A single item failure within a run. Owned by its run and deleted only with it.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ProcessingError {
    pub id: i64,
    pub processing_run_id: i64,
    pub source_system: String,
    pub external_order_id: String,
    pub error_message: String,
    pub occurred_at: DateTime<Utc>,
}
