use std::fmt::Display;

use acme_mirror_engine::db_types::NewWebhookEvent;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The webhook body the commerce platform posts to `/webhooks/orders`.
///
/// The payload is kept verbatim for audit purposes, but the worker never trusts it: the authoritative order data
/// is always re-fetched from the platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomingWebhook {
    pub event_id: String,
    pub event_type: String,
    pub source_system: String,
    pub external_order_id: String,
    pub occurred_at: DateTime<Utc>,
    pub payload: Option<serde_json::Value>,
}

impl From<IncomingWebhook> for NewWebhookEvent {
    fn from(w: IncomingWebhook) -> Self {
        Self {
            event_id: w.event_id,
            event_type: w.event_type,
            source_system: w.source_system,
            external_order_id: w.external_order_id,
            occurred_at: w.occurred_at,
            payload: w.payload.map(|v| v.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonResponse {
    pub success: bool,
    pub message: String,
}

impl JsonResponse {
    pub fn success<S: Display>(message: S) -> Self {
        Self { success: true, message: message.to_string() }
    }

    pub fn failure<S: Display>(message: S) -> Self {
        Self { success: false, message: message.to_string() }
    }
}
