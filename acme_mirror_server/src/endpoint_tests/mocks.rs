use acme_mirror_engine::{
    db_types::{NewWebhookEvent, Order, OrderLine, ProcessingError, ProcessingRun, WebhookEvent},
    traits::{OrderManagement, ReconciliationError, RunManagement, WebhookManagement},
};
use mockall::mock;

mock! {
    pub MirrorBackend {}
    impl WebhookManagement for MirrorBackend {
        async fn insert_webhook(&self, event: NewWebhookEvent) -> Result<WebhookEvent, ReconciliationError>;
    }
    impl OrderManagement for MirrorBackend {
        async fn fetch_order_by_order_number(&self, order_number: &str) -> Result<Option<Order>, ReconciliationError>;
        async fn fetch_order_by_external_id(&self, source_system: &str, external_order_id: &str) -> Result<Option<Order>, ReconciliationError>;
        async fn fetch_order_lines(&self, order_id: i64) -> Result<Vec<OrderLine>, ReconciliationError>;
    }
    impl RunManagement for MirrorBackend {
        async fn fetch_recent_runs(&self, limit: i64) -> Result<Vec<ProcessingRun>, ReconciliationError>;
        async fn fetch_run(&self, run_id: i64) -> Result<Option<ProcessingRun>, ReconciliationError>;
        async fn fetch_errors_for_run(&self, run_id: i64, limit: i64) -> Result<Vec<ProcessingError>, ReconciliationError>;
    }
}
