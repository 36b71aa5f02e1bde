use log::debug;
use sqlx::SqliteConnection;

use crate::{
    db_types::{NewWebhookEvent, WebhookEvent, WebhookStatus},
    traits::ReconciliationError,
};

/// Inserts a new inbound webhook event. Status is always `Pending` and the attempt counter zero, regardless of
/// what the sender claimed.
pub async fn insert_webhook(
    event: NewWebhookEvent,
    conn: &mut SqliteConnection,
) -> Result<WebhookEvent, ReconciliationError> {
    let event: WebhookEvent = sqlx::query_as(
        r#"
            INSERT INTO webhook_events (
                event_id,
                event_type,
                source_system,
                external_order_id,
                occurred_at,
                payload
            ) VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *;
        "#,
    )
    .bind(event.event_id)
    .bind(event.event_type)
    .bind(event.source_system)
    .bind(event.external_order_id)
    .bind(event.occurred_at)
    .bind(event.payload)
    .fetch_one(conn)
    .await?;
    debug!("📨️ Webhook event [{}] stored with id {}", event.event_id, event.id);
    Ok(event)
}

/// Returns every `Pending` event, oldest first. This is the discovery snapshot for a reconciliation cycle.
pub async fn fetch_pending_webhooks(conn: &mut SqliteConnection) -> Result<Vec<WebhookEvent>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM webhook_events WHERE status = 'Pending' ORDER BY id ASC").fetch_all(conn).await
}

pub async fn fetch_webhook_by_id(id: i64, conn: &mut SqliteConnection) -> Result<Option<WebhookEvent>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM webhook_events WHERE id = $1").bind(id).fetch_optional(conn).await
}

/// Moves an event to a terminal status, bumping its attempt counter. `last_error` is set on failure and cleared
/// on success.
pub(crate) async fn mark_webhook_terminal(
    id: i64,
    status: WebhookStatus,
    last_error: Option<&str>,
    conn: &mut SqliteConnection,
) -> Result<WebhookEvent, ReconciliationError> {
    let result: Option<WebhookEvent> = sqlx::query_as(
        "UPDATE webhook_events SET status = $1, last_error = $2, attempts = attempts + 1 WHERE id = $3 RETURNING *",
    )
    .bind(status.to_string())
    .bind(last_error)
    .bind(id)
    .fetch_optional(conn)
    .await?;
    result.ok_or(ReconciliationError::WebhookNotFound(id))
}
