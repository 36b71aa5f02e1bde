use actix_web::{http::StatusCode, web, web::ServiceConfig};
use acme_mirror_engine::db_types::{ProcessingError, ProcessingRun, RunStatus};
use chrono::{TimeZone, Utc};

use super::{helpers::get_request, mocks::MockMirrorBackend};
use crate::routes::{ImportRunDetailsRoute, ImportRunsRoute};

fn run(id: i64) -> ProcessingRun {
    ProcessingRun {
        id,
        start_time: Utc.with_ymd_and_hms(2026, 2, 18, 10, 0, 0).unwrap(),
        end_time: Some(Utc.with_ymd_and_hms(2026, 2, 18, 10, 0, 5).unwrap()),
        status: RunStatus::Completed,
        records_processed: 2,
        records_failed: 1,
        records_skipped: 0,
    }
}

fn error() -> ProcessingError {
    ProcessingError {
        id: 1,
        processing_run_id: 2,
        source_system: "Acme".into(),
        external_order_id: "acme_INVALID_1".into(),
        error_message: "line item PROD-001 has non-positive quantity -1".into(),
        occurred_at: Utc.with_ymd_and_hms(2026, 2, 18, 10, 0, 3).unwrap(),
    }
}

#[actix_web::test]
async fn list_recent_runs() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("/api/import-runs", configure).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    let response: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(response.as_array().unwrap().len(), 2);
    assert_eq!(response[0]["id"], 2);
    assert_eq!(response[0]["status"], "Completed");
}

#[actix_web::test]
async fn run_details_include_errors() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("/api/import-runs/2", configure).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    let response: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(response["id"], 2);
    assert_eq!(response["records_failed"], 1);
    assert_eq!(response["errors"][0]["external_order_id"], "acme_INVALID_1");
}

#[actix_web::test]
async fn unknown_run_is_not_found() {
    let _ = env_logger::try_init().ok();
    let err = get_request("/api/import-runs/999", configure_empty).await.expect_err("Expected error");
    assert_eq!(err, "The data was not found. No processing run with id 999");
}

fn configure(cfg: &mut ServiceConfig) {
    let mut backend = MockMirrorBackend::new();
    backend.expect_fetch_recent_runs().returning(|_| Ok(vec![run(2), run(1)]));
    backend.expect_fetch_run().returning(|id| Ok(Some(run(id))));
    backend.expect_fetch_errors_for_run().returning(|_, _| Ok(vec![error()]));
    cfg.app_data(web::Data::new(backend))
        .service(ImportRunsRoute::<MockMirrorBackend>::new())
        .service(ImportRunDetailsRoute::<MockMirrorBackend>::new());
}

fn configure_empty(cfg: &mut ServiceConfig) {
    let mut backend = MockMirrorBackend::new();
    backend.expect_fetch_run().returning(|_| Ok(None));
    cfg.app_data(web::Data::new(backend)).service(ImportRunDetailsRoute::<MockMirrorBackend>::new());
}
