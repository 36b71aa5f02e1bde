use amg_common::Money;
use thiserror::Error;

use crate::db_types::OrderSnapshot;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("external order id is blank")]
    BlankExternalOrderId,
    #[error("order number is blank")]
    BlankOrderNumber,
    #[error("currency is blank")]
    BlankCurrency,
    #[error("order has no line items")]
    NoLineItems,
    #[error("line {index} has a blank sku")]
    BlankSku { index: usize },
    #[error("line item {sku} has non-positive quantity {quantity}")]
    InvalidQuantity { sku: String, quantity: i64 },
    #[error("line item {sku} has negative unit price {unit_price}")]
    NegativeUnitPrice { sku: String, unit_price: Money },
}

/// Checks a fetched snapshot against the business rules that make it trustworthy enough to mirror.
///
/// Validation failures are terminal for the attempt: the webhook event is marked `Failed` and the reason recorded;
/// nothing is retried automatically. No side effects.
pub fn validate_snapshot(snapshot: &OrderSnapshot) -> Result<(), ValidationError> {
    if snapshot.external_order_id.trim().is_empty() {
        return Err(ValidationError::BlankExternalOrderId);
    }
    if snapshot.order_number.trim().is_empty() {
        return Err(ValidationError::BlankOrderNumber);
    }
    if snapshot.currency.trim().is_empty() {
        return Err(ValidationError::BlankCurrency);
    }
    if snapshot.lines.is_empty() {
        return Err(ValidationError::NoLineItems);
    }
    for (index, line) in snapshot.lines.iter().enumerate() {
        if line.sku.trim().is_empty() {
            return Err(ValidationError::BlankSku { index });
        }
        if line.quantity <= 0 {
            return Err(ValidationError::InvalidQuantity { sku: line.sku.clone(), quantity: line.quantity });
        }
        if line.unit_price < Money::from(0) {
            return Err(ValidationError::NegativeUnitPrice { sku: line.sku.clone(), unit_price: line.unit_price });
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use amg_common::Money;
    use chrono::Utc;

    use super::*;
    use crate::db_types::LineSnapshot;

    fn snapshot() -> OrderSnapshot {
        OrderSnapshot {
            external_order_id: "acme_1001".into(),
            order_number: "SO-1001".into(),
            total: Money::from_cents(15_000),
            currency: "USD".into(),
            order_date: Utc::now(),
            status: "SHIPPED".into(),
            customer_email: Some("integrated.customer@example.com".into()),
            lines: vec![LineSnapshot { sku: "PROD-001".into(), quantity: 1, unit_price: Money::from_cents(15_000) }],
        }
    }

    #[test]
    fn valid_snapshot_passes() {
        assert!(validate_snapshot(&snapshot()).is_ok());
    }

    #[test]
    fn blank_required_fields_fail() {
        let mut s = snapshot();
        s.external_order_id = "  ".into();
        assert_eq!(validate_snapshot(&s), Err(ValidationError::BlankExternalOrderId));

        let mut s = snapshot();
        s.order_number = String::new();
        assert_eq!(validate_snapshot(&s), Err(ValidationError::BlankOrderNumber));

        let mut s = snapshot();
        s.currency = String::new();
        assert_eq!(validate_snapshot(&s), Err(ValidationError::BlankCurrency));
    }

    #[test]
    fn empty_line_list_fails() {
        let mut s = snapshot();
        s.lines.clear();
        assert_eq!(validate_snapshot(&s), Err(ValidationError::NoLineItems));
    }

    #[test]
    fn bad_lines_fail_with_the_offending_sku() {
        let mut s = snapshot();
        s.lines[0].sku = String::new();
        assert_eq!(validate_snapshot(&s), Err(ValidationError::BlankSku { index: 0 }));

        let mut s = snapshot();
        s.lines[0].quantity = 0;
        assert_eq!(
            validate_snapshot(&s),
            Err(ValidationError::InvalidQuantity { sku: "PROD-001".into(), quantity: 0 })
        );

        let mut s = snapshot();
        s.lines[0].quantity = -1;
        assert_eq!(
            validate_snapshot(&s),
            Err(ValidationError::InvalidQuantity { sku: "PROD-001".into(), quantity: -1 })
        );

        let mut s = snapshot();
        s.lines[0].unit_price = Money::from_cents(-1);
        assert_eq!(
            validate_snapshot(&s),
            Err(ValidationError::NegativeUnitPrice { sku: "PROD-001".into(), unit_price: Money::from_cents(-1) })
        );
    }

    #[test]
    fn zero_unit_price_is_allowed() {
        let mut s = snapshot();
        s.lines[0].unit_price = Money::from_cents(0);
        assert!(validate_snapshot(&s).is_ok());
    }
}
