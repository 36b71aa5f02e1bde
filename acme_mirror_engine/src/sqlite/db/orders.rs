use log::debug;
use sqlx::SqliteConnection;

use crate::{
    db_types::{LineSnapshot, Order, OrderLine, OrderSnapshot},
    traits::ReconciliationError,
};

/// Returns the mirrored order for the natural key, if one exists.
pub async fn fetch_order_by_natural_key(
    source_system: &str,
    external_order_id: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<Order>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM orders WHERE source_system = $1 AND external_order_id = $2")
        .bind(source_system)
        .bind(external_order_id)
        .fetch_optional(conn)
        .await
}

pub async fn fetch_order_by_order_number(
    order_number: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<Order>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM orders WHERE order_number = $1").bind(order_number).fetch_optional(conn).await
}

pub async fn fetch_lines_for_order(order_id: i64, conn: &mut SqliteConnection) -> Result<Vec<OrderLine>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM order_lines WHERE order_id = $1 ORDER BY id ASC").bind(order_id).fetch_all(conn).await
}

/// Inserts a brand-new mirrored order together with its lines. Not atomic on its own; callers embed this in a
/// transaction and pass `&mut *tx` as the connection argument.
pub(crate) async fn insert_full_order(
    source_system: &str,
    snapshot: &OrderSnapshot,
    conn: &mut SqliteConnection,
) -> Result<Order, ReconciliationError> {
    let order: Order = sqlx::query_as(
        r#"
            INSERT INTO orders (
                source_system,
                external_order_id,
                order_number,
                total,
                currency,
                order_date,
                status,
                customer_email
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *;
        "#,
    )
    .bind(source_system)
    .bind(&snapshot.external_order_id)
    .bind(&snapshot.order_number)
    .bind(snapshot.total.value())
    .bind(&snapshot.currency)
    .bind(snapshot.order_date)
    .bind(&snapshot.status)
    .bind(&snapshot.customer_email)
    .fetch_one(&mut *conn)
    .await?;
    insert_lines(order.id, &snapshot.lines, conn).await?;
    debug!("🗃️ Order [{}/{}] inserted with id {}", order.source_system, order.external_order_id, order.id);
    Ok(order)
}

/// Overwrites an existing mirror with the snapshot: scalar fields are updated and the line collection is replaced
/// wholesale. Callers embed this in a transaction.
pub(crate) async fn replace_order(
    order_id: i64,
    snapshot: &OrderSnapshot,
    conn: &mut SqliteConnection,
) -> Result<Order, ReconciliationError> {
    let order: Option<Order> = sqlx::query_as(
        r#"
            UPDATE orders SET
                order_number = $1,
                total = $2,
                currency = $3,
                order_date = $4,
                status = $5,
                customer_email = $6,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = $7
            RETURNING *;
        "#,
    )
    .bind(&snapshot.order_number)
    .bind(snapshot.total.value())
    .bind(&snapshot.currency)
    .bind(snapshot.order_date)
    .bind(&snapshot.status)
    .bind(&snapshot.customer_email)
    .bind(order_id)
    .fetch_optional(&mut *conn)
    .await?;
    let order = order.ok_or_else(|| {
        ReconciliationError::DatabaseError(format!("Order {order_id} disappeared mid-transaction"))
    })?;
    sqlx::query("DELETE FROM order_lines WHERE order_id = $1").bind(order_id).execute(&mut *conn).await?;
    insert_lines(order_id, &snapshot.lines, conn).await?;
    debug!("🗃️ Order [{}/{}] replaced from snapshot", order.source_system, order.external_order_id);
    Ok(order)
}

async fn insert_lines(
    order_id: i64,
    lines: &[LineSnapshot],
    conn: &mut SqliteConnection,
) -> Result<(), ReconciliationError> {
    for line in lines {
        sqlx::query("INSERT INTO order_lines (order_id, sku, quantity, unit_price) VALUES ($1, $2, $3, $4)")
            .bind(order_id)
            .bind(&line.sku)
            .bind(line.quantity)
            .bind(line.unit_price.value())
            .execute(&mut *conn)
            .await?;
    }
    Ok(())
}
