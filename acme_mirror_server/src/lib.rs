//! # Acme mirror gateway server
//! This crate hosts the HTTP surface and the background worker of the Acme mirror gateway. It is responsible for:
//! * Listening for incoming order-change webhooks from the Acme commerce platform and persisting them durably.
//! * Running the reconciliation worker that turns pending webhooks into an idempotent local mirror of the orders.
//! * Serving read-only visibility endpoints over the mirrored orders and the processing-run ledger.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! The server exposes the following routes:
//! * `/health`: A health check route that returns a 200 OK response.
//! * `/webhooks/orders`: The ingestion route for order-change webhook events.
//! * `/api/orders/{order_number}`: A mirrored order and its line items.
//! * `/api/import-runs`: The most recent reconciliation runs.
//! * `/api/import-runs/{id}`: One run together with the errors recorded in it.
//! * `/external-api/orders/{id}`: A simulated Acme API, mounted for local development and testing.

pub mod config;
pub mod data_objects;
pub mod errors;
pub mod external_mock;
pub mod integrations;
pub mod routes;
pub mod server;
pub mod worker;

#[cfg(test)]
mod endpoint_tests;
