//! Raw-ingredient inventory persistence.
//!
//! CRUD over the `inventory_items` table. The presentation emoji is
//! derived from the product name on every create/update so renames keep
//! it in sync.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use brigade_types::{InventoryItem, InventoryItemId};

use crate::emoji;
use crate::error::DbError;

/// Fields supplied by the caller when creating or updating an inventory
/// item. The emoji is never caller-supplied.
#[derive(Debug, Clone)]
pub struct InventoryItemDraft {
    /// Product name (e.g. "salmon fillet").
    pub product_name: String,
    /// Stocked weight in grams.
    pub weight_grams: i32,
    /// Purchase price per kilogram.
    pub price_per_kg: Decimal,
    /// Whether the product is currently available.
    pub available: bool,
}

/// Operations on the `inventory_items` table.
pub struct InventoryStore<'a> {
    pool: &'a PgPool,
}

impl<'a> InventoryStore<'a> {
    /// Create a new inventory store bound to a connection pool.
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all inventory items, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn list(&self) -> Result<Vec<InventoryItem>, DbError> {
        let rows = sqlx::query_as::<_, InventoryItemRow>(
            r"SELECT id, product_name, weight_grams, price_per_kg, available, created_at, emoji
              FROM inventory_items
              ORDER BY created_at DESC",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(InventoryItem::from).collect())
    }

    /// Create an inventory item.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the insert fails.
    pub async fn create(&self, draft: InventoryItemDraft) -> Result<InventoryItem, DbError> {
        let id = InventoryItemId::new();
        let emoji = emoji::for_product(&draft.product_name);
        let now = Utc::now();

        sqlx::query(
            r"INSERT INTO inventory_items
                (id, product_name, weight_grams, price_per_kg, available, created_at, emoji)
              VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(id.into_inner())
        .bind(&draft.product_name)
        .bind(draft.weight_grams)
        .bind(draft.price_per_kg)
        .bind(draft.available)
        .bind(now)
        .bind(emoji)
        .execute(self.pool)
        .await?;

        tracing::debug!(%id, product = draft.product_name, "Created inventory item");

        Ok(InventoryItem {
            id,
            product_name: draft.product_name,
            weight_grams: draft.weight_grams,
            price_per_kg: draft.price_per_kg,
            available: draft.available,
            created_at: now,
            emoji: emoji.to_owned(),
        })
    }

    /// Update an inventory item, re-deriving its emoji.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::NotFound`] if the item does not exist.
    pub async fn update(
        &self,
        id: InventoryItemId,
        draft: InventoryItemDraft,
    ) -> Result<InventoryItem, DbError> {
        let emoji = emoji::for_product(&draft.product_name);

        let row = sqlx::query_as::<_, InventoryItemRow>(
            r"UPDATE inventory_items
              SET product_name = $1, weight_grams = $2, price_per_kg = $3, available = $4, emoji = $5
              WHERE id = $6
              RETURNING id, product_name, weight_grams, price_per_kg, available, created_at, emoji",
        )
        .bind(&draft.product_name)
        .bind(draft.weight_grams)
        .bind(draft.price_per_kg)
        .bind(draft.available)
        .bind(emoji)
        .bind(id.into_inner())
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound(format!("inventory item {id}")))?;

        Ok(row.into())
    }

    /// Delete an inventory item.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::NotFound`] if the item does not exist.
    pub async fn delete(&self, id: InventoryItemId) -> Result<(), DbError> {
        let result = sqlx::query(r"DELETE FROM inventory_items WHERE id = $1")
            .bind(id.into_inner())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound(format!("inventory item {id}")));
        }

        tracing::debug!(%id, "Deleted inventory item");
        Ok(())
    }
}

/// A row from the `inventory_items` table.
#[derive(Debug, Clone, sqlx::FromRow)]
struct InventoryItemRow {
    id: Uuid,
    product_name: String,
    weight_grams: i32,
    price_per_kg: Decimal,
    available: bool,
    created_at: DateTime<Utc>,
    emoji: String,
}

impl From<InventoryItemRow> for InventoryItem {
    fn from(row: InventoryItemRow) -> Self {
        Self {
            id: InventoryItemId::from(row.id),
            product_name: row.product_name,
            weight_grams: row.weight_grams,
            price_per_kg: row.price_per_kg,
            available: row.available,
            created_at: row.created_at,
            emoji: row.emoji,
        }
    }
}
