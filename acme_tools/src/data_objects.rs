use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The authoritative order record as returned by `GET /external-api/orders/{id}`.
///
/// Acme expresses currency amounts as decimal strings ("150.00"); they are parsed into exact minor units at the
/// boundary where the response is converted into an order snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcmeOrder {
    pub external_order_id: String,
    pub order_number: String,
    pub order_total: String,
    pub currency: String,
    pub order_date: DateTime<Utc>,
    pub status: String,
    pub customer: Option<AcmeCustomer>,
    #[serde(default)]
    pub lines: Vec<AcmeOrderLine>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcmeCustomer {
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcmeOrderLine {
    pub sku: String,
    pub qty: i64,
    pub unit_price: String,
}
