use crate::{
    db_types::{ProcessingError, ProcessingRun},
    traits::ReconciliationError,
};

/// Read-only queries over the run/error ledger. The worker itself never reads this state back for
/// decision-making; these exist for operator visibility.
#[allow(async_fn_in_trait)]
pub trait RunManagement {
    /// The most recent runs, newest first.
    async fn fetch_recent_runs(&self, limit: i64) -> Result<Vec<ProcessingRun>, ReconciliationError>;

    async fn fetch_run(&self, run_id: i64) -> Result<Option<ProcessingRun>, ReconciliationError>;

    /// The run's errors ordered by occurrence time, capped at `limit`.
    async fn fetch_errors_for_run(&self, run_id: i64, limit: i64) -> Result<Vec<ProcessingError>, ReconciliationError>;
}
