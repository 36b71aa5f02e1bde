//! A thin REST client for the Acme commerce platform API.
//!
//! The only call the mirror gateway needs is fetching the authoritative order record for an external order id.
//! The client carries the API key on every request and applies a hard request timeout, since a hung call would
//! stall an entire reconciliation batch.

mod api;
mod config;
pub mod data_objects;
mod error;

pub use api::AcmeApi;
pub use config::AcmeConfig;
pub use data_objects::{AcmeCustomer, AcmeOrder, AcmeOrderLine};
pub use error::AcmeApiError;
