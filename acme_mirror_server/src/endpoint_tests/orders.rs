use actix_web::{http::StatusCode, web, web::ServiceConfig};
use acme_mirror_engine::db_types::{Money, Order, OrderLine};
use chrono::{TimeZone, Utc};

use super::{helpers::get_request, mocks::MockMirrorBackend};
use crate::routes::OrderByNumberRoute;

fn order() -> Order {
    Order {
        id: 7,
        source_system: "Acme".into(),
        external_order_id: "acme_1001".into(),
        order_number: "SO-1001".into(),
        total: Money::from_cents(15_000),
        currency: "USD".into(),
        order_date: Utc.with_ymd_and_hms(2026, 2, 18, 10, 0, 0).unwrap(),
        status: "SHIPPED".into(),
        customer_email: Some("integrated.customer@example.com".into()),
        created_at: Utc.with_ymd_and_hms(2026, 2, 18, 10, 5, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2026, 2, 18, 10, 5, 0).unwrap(),
    }
}

fn lines() -> Vec<OrderLine> {
    vec![OrderLine { id: 1, order_id: 7, sku: "PROD-001".into(), quantity: 1, unit_price: Money::from_cents(15_000) }]
}

#[actix_web::test]
async fn fetch_order_with_lines() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("/api/orders/SO-1001", configure).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    let response: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(response["order_number"], "SO-1001");
    assert_eq!(response["total"], 15_000);
    assert_eq!(response["lines"][0]["sku"], "PROD-001");
    assert_eq!(response["lines"][0]["quantity"], 1);
}

#[actix_web::test]
async fn unknown_order_is_not_found() {
    let _ = env_logger::try_init().ok();
    let err = get_request("/api/orders/SO-9999", configure_empty).await.expect_err("Expected error");
    assert_eq!(err, "The data was not found. No order with number SO-9999");
}

fn configure(cfg: &mut ServiceConfig) {
    let mut backend = MockMirrorBackend::new();
    backend.expect_fetch_order_by_order_number().returning(|_| Ok(Some(order())));
    backend.expect_fetch_order_lines().returning(|_| Ok(lines()));
    cfg.app_data(web::Data::new(backend)).service(OrderByNumberRoute::<MockMirrorBackend>::new());
}

fn configure_empty(cfg: &mut ServiceConfig) {
    let mut backend = MockMirrorBackend::new();
    backend.expect_fetch_order_by_order_number().returning(|_| Ok(None));
    cfg.app_data(web::Data::new(backend)).service(OrderByNumberRoute::<MockMirrorBackend>::new());
}
