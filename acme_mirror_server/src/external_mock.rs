//! A simulated Acme API for local development and end-to-end testing.
//!
//! The route mimics the behaviour of `GET /orders/{id}` on the real platform, including its failure-injection
//! triggers: an id containing "FAIL" produces a server error, and an id containing "INVALID" returns an order
//! whose line quantity is -1 so the validator (not the client) rejects it.
use actix_web::{web, HttpResponse};
use acme_tools::{AcmeCustomer, AcmeOrder, AcmeOrderLine};
use chrono::{TimeZone, Utc};
use log::trace;

use crate::route;

route!(mock_acme_order => Get "/external-api/orders/{external_order_id}");
pub async fn mock_acme_order(path: web::Path<String>) -> HttpResponse {
    let external_order_id = path.into_inner();
    trace!("🎭️ Simulated Acme API request for order {external_order_id}");
    if external_order_id.contains("FAIL") {
        return HttpResponse::InternalServerError().body("Simulated External API Failure");
    }
    let suffix = external_order_id.split('_').nth(1).unwrap_or(external_order_id.as_str()).to_string();
    let qty = if external_order_id.contains("INVALID") { -1 } else { 1 };
    let order = AcmeOrder {
        external_order_id,
        order_number: format!("SO-{suffix}"),
        order_total: "150.00".to_string(),
        currency: "USD".to_string(),
        order_date: Utc.with_ymd_and_hms(2026, 2, 18, 10, 0, 0).unwrap(),
        status: "SHIPPED".to_string(),
        customer: Some(AcmeCustomer { email: "integrated.customer@example.com".to_string() }),
        lines: vec![AcmeOrderLine { sku: "PROD-001".to_string(), qty, unit_price: "150.00".to_string() }],
    };
    HttpResponse::Ok().json(order)
}
