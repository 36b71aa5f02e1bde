pub mod acme;

pub use acme::{snapshot_from_acme_order, AcmeOrderSource, OrderConversionError};
