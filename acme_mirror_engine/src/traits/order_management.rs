use crate::{
    db_types::{Order, OrderLine},
    traits::ReconciliationError,
};

/// Read-only queries over the mirrored orders, used by the visibility endpoints and by tests.
#[allow(async_fn_in_trait)]
pub trait OrderManagement {
    async fn fetch_order_by_order_number(&self, order_number: &str) -> Result<Option<Order>, ReconciliationError>;

    async fn fetch_order_by_external_id(
        &self,
        source_system: &str,
        external_order_id: &str,
    ) -> Result<Option<Order>, ReconciliationError>;

    /// Returns the order's line items in insertion order.
    async fn fetch_order_lines(&self, order_id: i64) -> Result<Vec<OrderLine>, ReconciliationError>;
}
