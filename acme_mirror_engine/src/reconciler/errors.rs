use thiserror::Error;

use crate::{
    reconciler::ValidationError,
    traits::{OrderSourceError, ReconciliationError},
};

/// Why a single webhook event's reconciliation attempt failed. The display string is what ends up in the event's
/// `last_error` field and in the run's error ledger.
#[derive(Debug, Error)]
pub enum ItemError {
    #[error("{0}")]
    Source(#[from] OrderSourceError),
    #[error("{0}")]
    Validation(#[from] ValidationError),
    #[error("{0}")]
    Database(#[from] ReconciliationError),
}
