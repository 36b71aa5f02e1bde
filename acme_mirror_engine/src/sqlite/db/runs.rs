use log::trace;
use sqlx::SqliteConnection;

use crate::{
    db_types::{ProcessingError, ProcessingRun},
    traits::{ItemOutcome, ReconciliationError},
};

pub(crate) async fn create_run(conn: &mut SqliteConnection) -> Result<ProcessingRun, ReconciliationError> {
    let run = sqlx::query_as("INSERT INTO processing_runs (status) VALUES ('Running') RETURNING *;")
        .fetch_one(conn)
        .await?;
    Ok(run)
}

pub(crate) async fn close_run(run_id: i64, conn: &mut SqliteConnection) -> Result<ProcessingRun, ReconciliationError> {
    let result: Option<ProcessingRun> = sqlx::query_as(
        "UPDATE processing_runs SET status = 'Completed', end_time = CURRENT_TIMESTAMP WHERE id = $1 RETURNING *",
    )
    .bind(run_id)
    .fetch_optional(conn)
    .await?;
    result.ok_or(ReconciliationError::RunNotFound(run_id))
}

/// Bumps the counter column matching the outcome. `Vanished` items are not part of the run's accounting.
pub(crate) async fn incr_run_counter(
    run_id: i64,
    outcome: ItemOutcome,
    conn: &mut SqliteConnection,
) -> Result<(), ReconciliationError> {
    let column = match outcome {
        ItemOutcome::Processed => "records_processed",
        ItemOutcome::Skipped => "records_skipped",
        ItemOutcome::Failed => "records_failed",
        ItemOutcome::Vanished => return Ok(()),
    };
    let query = format!("UPDATE processing_runs SET {column} = {column} + 1 WHERE id = $1");
    trace!("🧾️ Executing query: {query}");
    let result = sqlx::query(&query).bind(run_id).execute(conn).await?;
    if result.rows_affected() == 0 {
        return Err(ReconciliationError::RunNotFound(run_id));
    }
    Ok(())
}

pub(crate) async fn insert_processing_error(
    run_id: i64,
    source_system: &str,
    external_order_id: &str,
    message: &str,
    conn: &mut SqliteConnection,
) -> Result<ProcessingError, ReconciliationError> {
    let error = sqlx::query_as(
        r#"
            INSERT INTO processing_errors (processing_run_id, source_system, external_order_id, error_message)
            VALUES ($1, $2, $3, $4)
            RETURNING *;
        "#,
    )
    .bind(run_id)
    .bind(source_system)
    .bind(external_order_id)
    .bind(message)
    .fetch_one(conn)
    .await?;
    Ok(error)
}

pub async fn fetch_recent_runs(limit: i64, conn: &mut SqliteConnection) -> Result<Vec<ProcessingRun>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM processing_runs ORDER BY start_time DESC, id DESC LIMIT $1")
        .bind(limit)
        .fetch_all(conn)
        .await
}

pub async fn fetch_run_by_id(run_id: i64, conn: &mut SqliteConnection) -> Result<Option<ProcessingRun>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM processing_runs WHERE id = $1").bind(run_id).fetch_optional(conn).await
}

pub async fn fetch_errors_for_run(
    run_id: i64,
    limit: i64,
    conn: &mut SqliteConnection,
) -> Result<Vec<ProcessingError>, sqlx::Error> {
    sqlx::query_as(
        "SELECT * FROM processing_errors WHERE processing_run_id = $1 ORDER BY occurred_at ASC, id ASC LIMIT $2",
    )
    .bind(run_id)
    .bind(limit)
    .fetch_all(conn)
    .await
}
