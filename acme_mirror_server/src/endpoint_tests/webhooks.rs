use actix_web::{http::StatusCode, web, web::ServiceConfig};
use acme_mirror_engine::db_types::{WebhookEvent, WebhookStatus};
use chrono::Utc;
use serde_json::json;

use super::{helpers::post_request, mocks::MockMirrorBackend};
use crate::routes::ReceiveOrderWebhookRoute;

#[actix_web::test]
async fn webhook_is_accepted_and_stored_pending() {
    let _ = env_logger::try_init().ok();
    let body = json!({
        "eventId": "evt-1001",
        "eventType": "orders/updated",
        "sourceSystem": "Acme",
        "externalOrderId": "acme_1001",
        "occurredAt": "2026-02-18T10:00:00Z",
        "payload": { "externalOrderId": "acme_1001" }
    });
    let (status, body) = post_request("/webhooks/orders", body, configure).await.expect("Request failed");
    assert_eq!(status, StatusCode::ACCEPTED);
    let response: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(response["success"], true);
}

#[actix_web::test]
async fn webhook_without_identifiers_is_rejected() {
    let _ = env_logger::try_init().ok();
    let body = json!({
        "eventId": "evt-1002",
        "eventType": "orders/updated",
        "sourceSystem": "",
        "externalOrderId": "acme_1002",
        "occurredAt": "2026-02-18T10:00:00Z",
        "payload": null
    });
    let err = post_request("/webhooks/orders", body, configure).await.expect_err("Expected error");
    assert_eq!(err, "Could not read request body: sourceSystem and externalOrderId must be provided");
}

fn configure(cfg: &mut ServiceConfig) {
    let mut backend = MockMirrorBackend::new();
    backend.expect_insert_webhook().returning(|event| {
        Ok(WebhookEvent {
            id: 1,
            event_id: event.event_id,
            event_type: event.event_type,
            source_system: event.source_system,
            external_order_id: event.external_order_id,
            occurred_at: event.occurred_at,
            payload: event.payload,
            status: WebhookStatus::Pending,
            attempts: 0,
            last_error: None,
            created_at: Utc::now(),
        })
    });
    cfg.app_data(web::Data::new(backend)).service(ReceiveOrderWebhookRoute::<MockMirrorBackend>::new());
}
