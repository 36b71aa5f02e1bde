use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use acme_mirror_engine::SqliteDatabase;
use acme_tools::AcmeApi;
use log::info;
use tokio::sync::watch;

use crate::{
    config::ServerConfig,
    errors::ServerError,
    external_mock::MockAcmeOrderRoute,
    integrations::AcmeOrderSource,
    routes::{health, ImportRunDetailsRoute, ImportRunsRoute, OrderByNumberRoute, ReceiveOrderWebhookRoute},
    worker::start_reconciliation_worker,
};

/// Brings up the database, the reconciliation worker and the HTTP server, and runs until the server exits.
/// The worker is wound down cooperatively once the server has stopped.
pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = SqliteDatabase::new_with_url(&config.database_url, 25)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    db.run_migrations().await.map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let acme_api = AcmeApi::new(config.acme.clone()).map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let source = AcmeOrderSource::new(acme_api);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let worker = start_reconciliation_worker(
        db.clone(),
        source,
        config.source_system.clone(),
        config.poll_interval,
        shutdown_rx,
    );

    let srv = create_server_instance(config, db)?;
    let result = srv.await.map_err(|e| ServerError::Unspecified(e.to_string()));

    info!("🛑️ Server stopped. Winding down the reconciliation worker.");
    let _ = shutdown_tx.send(true);
    let _ = worker.await;
    result
}

pub fn create_server_instance(config: ServerConfig, db: SqliteDatabase) -> Result<Server, ServerError> {
    let enable_acme_mock = config.enable_acme_mock;
    let srv = HttpServer::new(move || {
        let app = App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("amg::access_log"))
            .app_data(web::Data::new(db.clone()))
            .service(health)
            .service(ReceiveOrderWebhookRoute::<SqliteDatabase>::new())
            .service(OrderByNumberRoute::<SqliteDatabase>::new())
            .service(ImportRunsRoute::<SqliteDatabase>::new())
            .service(ImportRunDetailsRoute::<SqliteDatabase>::new());
        if enable_acme_mock {
            app.service(MockAcmeOrderRoute::new())
        } else {
            app
        }
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}
