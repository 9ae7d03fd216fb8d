//! Order persistence: placement from a cart and per-user history.
//!
//! Placing an order snapshots the cart's lines into `order_items`,
//! records the total, and empties the cart -- all in one transaction, so
//! a failed placement leaves the cart untouched and a successful one can
//! never double-spend the same cart lines.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use brigade_types::{CartId, MenuItemId, Order, OrderId, OrderItem, OrderItemId, OrderStatus};

use crate::error::DbError;

/// Operations on the `orders` and `order_items` tables.
pub struct OrderStore<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderStore<'a> {
    /// Create a new order store bound to a connection pool.
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Place an order from the user's current cart.
    ///
    /// The order total is `sum(quantity * price)` over the cart lines.
    /// The cart is emptied in the same transaction.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::NotFound`] if the user has no cart,
    /// [`DbError::EmptyCart`] if the cart has no lines, and
    /// [`DbError::Postgres`] if the transaction cannot commit.
    pub async fn place(&self, user_id: &str) -> Result<Order, DbError> {
        let mut tx = self.pool.begin().await?;

        let cart_id = sqlx::query_scalar::<_, Uuid>(r"SELECT id FROM carts WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| DbError::NotFound(format!("cart for user {user_id}")))?;

        let lines = sqlx::query_as::<_, CartLineRow>(
            r"SELECT menu_item_id, name, quantity, price
              FROM cart_items
              WHERE cart_id = $1
              ORDER BY created_at",
        )
        .bind(cart_id)
        .fetch_all(&mut *tx)
        .await?;

        if lines.is_empty() {
            return Err(DbError::EmptyCart);
        }

        let total_price = order_total(&lines)?;
        let order_id = OrderId::new();
        let now = Utc::now();

        sqlx::query(
            r"INSERT INTO orders (id, user_id, cart_id, total_price, status, created_at)
              VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(order_id.into_inner())
        .bind(user_id)
        .bind(cart_id)
        .bind(total_price)
        .bind(OrderStatus::Pending.as_db_str())
        .bind(now)
        .execute(&mut *tx)
        .await?;

        let mut items = Vec::with_capacity(lines.len());
        for line in &lines {
            let item_id = OrderItemId::new();
            sqlx::query(
                r"INSERT INTO order_items (id, order_id, menu_item_id, name, quantity, price)
                  VALUES ($1, $2, $3, $4, $5, $6)",
            )
            .bind(item_id.into_inner())
            .bind(order_id.into_inner())
            .bind(line.menu_item_id)
            .bind(&line.name)
            .bind(line.quantity)
            .bind(line.price)
            .execute(&mut *tx)
            .await?;

            items.push(OrderItem {
                id: item_id,
                order_id,
                menu_item_id: MenuItemId::from(line.menu_item_id),
                name: line.name.clone(),
                quantity: line.quantity,
                price: line.price,
            });
        }

        sqlx::query(r"DELETE FROM cart_items WHERE cart_id = $1")
            .bind(cart_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(user_id, order_id = %order_id, %total_price, "Placed order");

        Ok(Order {
            id: order_id,
            user_id: user_id.to_owned(),
            cart_id: CartId::from(cart_id),
            items,
            total_price,
            status: OrderStatus::Pending,
            created_at: now,
        })
    }

    /// List a user's orders with their items, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if a query fails.
    pub async fn list(&self, user_id: &str) -> Result<Vec<Order>, DbError> {
        let headers = sqlx::query_as::<_, OrderRow>(
            r"SELECT id, user_id, cart_id, total_price, status, created_at
              FROM orders
              WHERE user_id = $1
              ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        let order_ids: Vec<Uuid> = headers.iter().map(|h| h.id).collect();
        let item_rows = sqlx::query_as::<_, OrderItemRow>(
            r"SELECT id, order_id, menu_item_id, name, quantity, price
              FROM order_items
              WHERE order_id = ANY($1)
              ORDER BY id",
        )
        .bind(&order_ids)
        .fetch_all(self.pool)
        .await?;

        let mut items_by_order: BTreeMap<Uuid, Vec<OrderItem>> = BTreeMap::new();
        for row in item_rows {
            items_by_order
                .entry(row.order_id)
                .or_default()
                .push(row.into());
        }

        Ok(headers
            .into_iter()
            .map(|header| {
                let items = items_by_order.remove(&header.id).unwrap_or_default();
                Order {
                    id: OrderId::from(header.id),
                    user_id: header.user_id,
                    cart_id: CartId::from(header.cart_id),
                    items,
                    total_price: header.total_price,
                    status: OrderStatus::from_db_str(&header.status),
                    created_at: header.created_at,
                }
            })
            .collect())
    }
}

/// Sum `quantity * price` over cart lines with checked decimal math.
fn order_total(lines: &[CartLineRow]) -> Result<Decimal, DbError> {
    let mut total = Decimal::ZERO;
    for line in lines {
        let line_total = Decimal::from(line.quantity)
            .checked_mul(line.price)
            .ok_or(DbError::Numeric("order line total"))?;
        total = total
            .checked_add(line_total)
            .ok_or(DbError::Numeric("order total"))?;
    }
    Ok(total)
}

/// The cart line fields an order snapshot needs.
#[derive(Debug, Clone, sqlx::FromRow)]
struct CartLineRow {
    menu_item_id: Uuid,
    name: String,
    quantity: i32,
    price: Decimal,
}

/// A row from the `orders` table.
#[derive(Debug, Clone, sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    user_id: String,
    cart_id: Uuid,
    total_price: Decimal,
    status: String,
    created_at: DateTime<Utc>,
}

/// A row from the `order_items` table.
#[derive(Debug, Clone, sqlx::FromRow)]
struct OrderItemRow {
    id: Uuid,
    order_id: Uuid,
    menu_item_id: Uuid,
    name: String,
    quantity: i32,
    price: Decimal,
}

impl From<OrderItemRow> for OrderItem {
    fn from(row: OrderItemRow) -> Self {
        Self {
            id: OrderItemId::from(row.id),
            order_id: OrderId::from(row.order_id),
            menu_item_id: MenuItemId::from(row.menu_item_id),
            name: row.name,
            quantity: row.quantity,
            price: row.price,
        }
    }
}
