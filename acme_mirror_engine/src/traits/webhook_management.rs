use crate::{
    db_types::{NewWebhookEvent, WebhookEvent},
    traits::ReconciliationError,
};

/// Ingestion-side contract: the webhook endpoint's only responsibility is to durably persist what it received.
#[allow(async_fn_in_trait)]
pub trait WebhookManagement {
    /// Persists an inbound notification with `Pending` status and zero attempts, returning the stored row.
    async fn insert_webhook(&self, event: NewWebhookEvent) -> Result<WebhookEvent, ReconciliationError>;
}
