//! Glue between the Acme REST client and the reconciliation engine.
use acme_mirror_engine::{
    db_types::{LineSnapshot, Money, OrderSnapshot},
    traits::{OrderSource, OrderSourceError},
};
use acme_tools::{AcmeApi, AcmeApiError, AcmeOrder};
use log::trace;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("Could not convert Acme order into an order snapshot. {0}.")]
pub struct OrderConversionError(pub String);

/// Converts the wire-format order into the engine's snapshot type, parsing the decimal price strings into exact
/// minor units along the way.
pub fn snapshot_from_acme_order(order: AcmeOrder) -> Result<OrderSnapshot, OrderConversionError> {
    trace!("Converting AcmeOrder to OrderSnapshot: {order:?}");
    let total = order.order_total.parse::<Money>().map_err(|e| OrderConversionError(e.to_string()))?;
    let lines = order
        .lines
        .into_iter()
        .map(|line| {
            let unit_price = line.unit_price.parse::<Money>().map_err(|e| OrderConversionError(e.to_string()))?;
            Ok(LineSnapshot { sku: line.sku, quantity: line.qty, unit_price })
        })
        .collect::<Result<Vec<_>, OrderConversionError>>()?;
    Ok(OrderSnapshot {
        external_order_id: order.external_order_id,
        order_number: order.order_number,
        total,
        currency: order.currency,
        order_date: order.order_date,
        status: order.status,
        customer_email: order.customer.map(|c| c.email),
        lines,
    })
}

/// Adapter that lets the reconciliation worker use the Acme REST client as its order source.
#[derive(Clone)]
pub struct AcmeOrderSource {
    api: AcmeApi,
}

impl AcmeOrderSource {
    pub fn new(api: AcmeApi) -> Self {
        Self { api }
    }
}

impl OrderSource for AcmeOrderSource {
    async fn fetch_order(&self, external_order_id: &str) -> Result<OrderSnapshot, OrderSourceError> {
        let order = self.api.fetch_order(external_order_id).await.map_err(|e| match e {
            AcmeApiError::QueryError { status, message } => OrderSourceError::Remote { status, message },
            AcmeApiError::JsonError(m) => OrderSourceError::InvalidResponse(m),
            other => OrderSourceError::Transport(other.to_string()),
        })?;
        snapshot_from_acme_order(order).map_err(|e| OrderSourceError::InvalidResponse(e.to_string()))
    }
}
