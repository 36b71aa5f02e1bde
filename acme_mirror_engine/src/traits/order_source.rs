use thiserror::Error;

use crate::db_types::OrderSnapshot;

/// The external commerce API holding the authoritative order state.
///
/// This is the only network-bound step in a reconciliation cycle. Implementations should carry their own request
/// timeout; a hung fetch stalls every event behind it in the batch.
#[allow(async_fn_in_trait)]
pub trait OrderSource {
    async fn fetch_order(&self, external_order_id: &str) -> Result<OrderSnapshot, OrderSourceError>;
}

#[derive(Debug, Clone, Error)]
pub enum OrderSourceError {
    #[error("Order source returned status {status}: {message}")]
    Remote { status: u16, message: String },
    #[error("Could not reach the order source: {0}")]
    Transport(String),
    #[error("Could not interpret the order source response: {0}")]
    InvalidResponse(String),
}
