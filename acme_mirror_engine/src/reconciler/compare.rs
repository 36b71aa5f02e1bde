use crate::db_types::{LineSnapshot, Order, OrderLine, OrderSnapshot};

/// Decides whether a fetched snapshot is materially identical to the already-persisted mirror, so that redundant
/// re-deliveries do not churn the store.
///
/// "Identical" means every scalar field matches exactly and the line sets match after both sides are sorted by
/// sku: same count, and per matched index the same sku, quantity and unit price. Correctness does not depend on
/// this check, only write amplification does.
pub fn snapshot_matches_order(order: &Order, lines: &[OrderLine], snapshot: &OrderSnapshot) -> bool {
    order.order_number == snapshot.order_number
        && order.total == snapshot.total
        && order.currency == snapshot.currency
        && order.order_date == snapshot.order_date
        && order.status == snapshot.status
        && order.customer_email == snapshot.customer_email
        && lines_match(lines, &snapshot.lines)
}

fn lines_match(persisted: &[OrderLine], incoming: &[LineSnapshot]) -> bool {
    if persisted.len() != incoming.len() {
        return false;
    }
    let mut persisted: Vec<&OrderLine> = persisted.iter().collect();
    persisted.sort_by(|a, b| a.sku.cmp(&b.sku));
    let mut incoming: Vec<&LineSnapshot> = incoming.iter().collect();
    incoming.sort_by(|a, b| a.sku.cmp(&b.sku));
    persisted
        .iter()
        .zip(incoming.iter())
        .all(|(p, i)| p.sku == i.sku && p.quantity == i.quantity && p.unit_price == i.unit_price)
}

#[cfg(test)]
mod test {
    use amg_common::Money;
    use chrono::{TimeZone, Utc};

    use super::*;

    fn order() -> Order {
        Order {
            id: 1,
            source_system: "Acme".into(),
            external_order_id: "acme_1001".into(),
            order_number: "SO-1001".into(),
            total: Money::from_cents(15_000),
            currency: "USD".into(),
            order_date: Utc.with_ymd_and_hms(2026, 2, 18, 10, 0, 0).unwrap(),
            status: "SHIPPED".into(),
            customer_email: Some("integrated.customer@example.com".into()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn lines() -> Vec<OrderLine> {
        vec![
            OrderLine { id: 1, order_id: 1, sku: "PROD-002".into(), quantity: 2, unit_price: Money::from_cents(500) },
            OrderLine { id: 2, order_id: 1, sku: "PROD-001".into(), quantity: 1, unit_price: Money::from_cents(14_000) },
        ]
    }

    fn snapshot() -> OrderSnapshot {
        OrderSnapshot {
            external_order_id: "acme_1001".into(),
            order_number: "SO-1001".into(),
            total: Money::from_cents(15_000),
            currency: "USD".into(),
            order_date: Utc.with_ymd_and_hms(2026, 2, 18, 10, 0, 0).unwrap(),
            status: "SHIPPED".into(),
            customer_email: Some("integrated.customer@example.com".into()),
            lines: vec![
                LineSnapshot { sku: "PROD-001".into(), quantity: 1, unit_price: Money::from_cents(14_000) },
                LineSnapshot { sku: "PROD-002".into(), quantity: 2, unit_price: Money::from_cents(500) },
            ],
        }
    }

    #[test]
    fn identical_data_matches_regardless_of_line_order() {
        assert!(snapshot_matches_order(&order(), &lines(), &snapshot()));
    }

    #[test]
    fn scalar_change_is_material() {
        let mut s = snapshot();
        s.status = "DELIVERED".into();
        assert!(!snapshot_matches_order(&order(), &lines(), &s));

        let mut s = snapshot();
        s.total = Money::from_cents(15_001);
        assert!(!snapshot_matches_order(&order(), &lines(), &s));

        let mut s = snapshot();
        s.customer_email = None;
        assert!(!snapshot_matches_order(&order(), &lines(), &s));
    }

    #[test]
    fn line_quantity_change_is_material() {
        let mut s = snapshot();
        s.lines[0].quantity = 3;
        assert!(!snapshot_matches_order(&order(), &lines(), &s));
    }

    #[test]
    fn line_price_change_is_material() {
        let mut s = snapshot();
        s.lines[1].unit_price = Money::from_cents(501);
        assert!(!snapshot_matches_order(&order(), &lines(), &s));
    }

    #[test]
    fn differing_line_counts_are_material() {
        let mut s = snapshot();
        s.lines.pop();
        assert!(!snapshot_matches_order(&order(), &lines(), &s));

        let mut s = snapshot();
        s.lines.push(LineSnapshot { sku: "PROD-003".into(), quantity: 1, unit_price: Money::from_cents(100) });
        assert!(!snapshot_matches_order(&order(), &lines(), &s));
    }
}
