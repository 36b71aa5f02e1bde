use actix_web::{http::StatusCode, web::ServiceConfig};

use super::helpers::get_request;
use crate::external_mock::MockAcmeOrderRoute;

#[actix_web::test]
async fn simulated_order_is_well_formed() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("/external-api/orders/acme_1001", configure).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    let response: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(response["externalOrderId"], "acme_1001");
    assert_eq!(response["orderNumber"], "SO-1001");
    assert_eq!(response["orderTotal"], "150.00");
    assert_eq!(response["lines"][0]["qty"], 1);
}

#[actix_web::test]
async fn fail_trigger_returns_a_server_error() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("/external-api/orders/acme_FAIL_1", configure).await.expect("Request failed");
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Simulated External API Failure");
}

#[actix_web::test]
async fn invalid_trigger_returns_a_negative_quantity() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("/external-api/orders/acme_INVALID_9", configure).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    let response: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(response["lines"][0]["qty"], -1);
}

fn configure(cfg: &mut ServiceConfig) {
    cfg.service(MockAcmeOrderRoute::new());
}
