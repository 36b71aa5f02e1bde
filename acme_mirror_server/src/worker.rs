use std::time::Duration;

use acme_mirror_engine::{ReconciliationApi, SqliteDatabase};
use log::*;
use tokio::{sync::watch, task::JoinHandle, time::MissedTickBehavior};

use crate::integrations::AcmeOrderSource;

/// Starts the reconciliation worker. Do not await the returned JoinHandle before signalling shutdown, as the loop
/// runs until then.
///
/// The worker polls on a fixed interval and runs one cycle at a time; cycles never overlap. The shutdown signal is
/// cooperative: it is observed before each new cycle and interrupts the inter-cycle sleep promptly, while an
/// in-flight cycle is allowed to finish naturally.
pub fn start_reconciliation_worker(
    db: SqliteDatabase,
    source: AcmeOrderSource,
    source_system: String,
    poll_interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let api = ReconciliationApi::new(db, source, source_system);
        let mut timer = tokio::time::interval(poll_interval);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!("⚙️ Reconciliation worker started. Polling every {}s", poll_interval.as_secs());
        loop {
            tokio::select! {
                _ = shutdown.changed() => {
                    info!("⚙️ Reconciliation worker received shutdown signal");
                    break;
                },
                _ = timer.tick() => {
                    match api.run_cycle().await {
                        Ok(Some(summary)) => info!(
                            "⚙️ Run #{} handled {} event(s): {} processed, {} skipped, {} failed",
                            summary.run_id,
                            summary.batch_size,
                            summary.counters.processed,
                            summary.counters.skipped,
                            summary.counters.failed
                        ),
                        Ok(None) => trace!("⚙️ No pending webhook events"),
                        Err(e) => error!("⚙️ Error running reconciliation cycle: {e}"),
                    }
                },
            }
        }
        info!("⚙️ Reconciliation worker stopped");
    })
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use acme_mirror_engine::{
        test_utils::prepare_env::{prepare_test_env, random_db_path},
        SqliteDatabase,
    };
    use acme_tools::{AcmeApi, AcmeConfig};
    use tokio::sync::watch;

    use super::start_reconciliation_worker;
    use crate::integrations::AcmeOrderSource;

    #[tokio::test]
    async fn shutdown_interrupts_the_inter_cycle_sleep() {
        let url = random_db_path();
        prepare_test_env(&url).await;
        let db = SqliteDatabase::new_with_url(&url, 5).await.unwrap();
        let source = AcmeOrderSource::new(AcmeApi::new(AcmeConfig::default()).unwrap());
        let (tx, rx) = watch::channel(false);

        // An hour-long interval: if cancellation did not interrupt the sleep, the test would time out.
        let handle = start_reconciliation_worker(db, source, "Acme".into(), Duration::from_secs(3600), rx);
        tokio::time::sleep(Duration::from_millis(50)).await;
        tx.send(true).unwrap();
        tokio::time::timeout(Duration::from_secs(5), handle).await.expect("Worker did not stop promptly").unwrap();
    }
}
