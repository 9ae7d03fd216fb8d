//! Menu item persistence.
//!
//! Field-level CRUD over the `menu_items` table. The only derived value
//! is `margin = price - cost_price`, recomputed on every create/update
//! and stored denormalized for cheap list queries. Deleting a menu item
//! cascades into its cost calculation via the schema.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use brigade_types::{CategoryId, MenuItem, MenuItemId, MenuItemWithCategory};

use crate::error::DbError;

/// Columns selected for a bare menu item, kept in one place so every
/// query scans identically.
const MENU_ITEM_COLUMNS: &str = "id, name, description, price, cost_price, image_url, margin, created_at, category_id, published";

/// Fields supplied by the caller when creating or updating a menu item.
///
/// `margin` is always derived; `published` is only honored on create
/// (updates go through [`MenuStore::toggle_published`]).
#[derive(Debug, Clone)]
pub struct MenuItemDraft {
    /// Display name.
    pub name: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Selling price.
    pub price: Decimal,
    /// Production cost price.
    pub cost_price: Decimal,
    /// Optional image URL.
    pub image_url: Option<String>,
    /// Owning category, if any.
    pub category_id: Option<CategoryId>,
    /// Initial visibility (create only).
    pub published: bool,
}

/// Operations on the `menu_items` table.
pub struct MenuStore<'a> {
    pool: &'a PgPool,
}

impl<'a> MenuStore<'a> {
    /// Create a new menu store bound to a connection pool.
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all menu items, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn list(&self) -> Result<Vec<MenuItem>, DbError> {
        let rows = sqlx::query_as::<_, MenuItemRow>(&format!(
            "SELECT {MENU_ITEM_COLUMNS} FROM menu_items ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(MenuItem::from).collect())
    }

    /// List published menu items, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn list_published(&self) -> Result<Vec<MenuItem>, DbError> {
        let rows = sqlx::query_as::<_, MenuItemRow>(&format!(
            "SELECT {MENU_ITEM_COLUMNS} FROM menu_items WHERE published = TRUE ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(MenuItem::from).collect())
    }

    /// List menu items joined with their category name, newest first.
    ///
    /// Items without a category get an empty category name. When
    /// `published_only` is set, unpublished items are filtered out.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn list_with_category(
        &self,
        published_only: bool,
    ) -> Result<Vec<MenuItemWithCategory>, DbError> {
        let rows = sqlx::query_as::<_, MenuItemWithCategoryRow>(
            r"SELECT
                m.id, m.name, m.description, m.price, m.cost_price,
                m.image_url, m.margin, m.created_at, m.category_id,
                COALESCE(c.name, '') AS category_name,
                m.published
              FROM menu_items m
              LEFT JOIN categories c ON m.category_id = c.id
              WHERE m.published = TRUE OR $1 = FALSE
              ORDER BY m.created_at DESC",
        )
        .bind(published_only)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(MenuItemWithCategory::from).collect())
    }

    /// Fetch a single menu item by id.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::NotFound`] if the item does not exist.
    pub async fn get(&self, id: MenuItemId) -> Result<MenuItem, DbError> {
        let row = sqlx::query_as::<_, MenuItemRow>(&format!(
            "SELECT {MENU_ITEM_COLUMNS} FROM menu_items WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound(format!("menu item {id}")))?;

        Ok(row.into())
    }

    /// Create a menu item.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Numeric`] if the margin derivation overflows
    /// and [`DbError::Postgres`] if the insert fails (e.g. an unknown
    /// category id).
    pub async fn create(&self, draft: MenuItemDraft) -> Result<MenuItem, DbError> {
        let id = MenuItemId::new();
        let margin = derive_margin(draft.price, draft.cost_price)?;
        let now = Utc::now();

        sqlx::query(
            r"INSERT INTO menu_items
                (id, name, description, price, cost_price, image_url, margin, created_at, category_id, published)
              VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        )
        .bind(id.into_inner())
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(draft.price)
        .bind(draft.cost_price)
        .bind(&draft.image_url)
        .bind(margin)
        .bind(now)
        .bind(draft.category_id.map(CategoryId::into_inner))
        .bind(draft.published)
        .execute(self.pool)
        .await?;

        tracing::debug!(%id, name = draft.name, "Created menu item");

        Ok(MenuItem {
            id,
            name: draft.name,
            description: draft.description,
            price: draft.price,
            cost_price: draft.cost_price,
            image_url: draft.image_url,
            margin,
            created_at: now,
            category_id: draft.category_id,
            published: draft.published,
        })
    }

    /// Update a menu item's fields, leaving `published` untouched.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::NotFound`] if the item does not exist and
    /// [`DbError::Numeric`] if the margin derivation overflows.
    pub async fn update(&self, id: MenuItemId, draft: MenuItemDraft) -> Result<MenuItem, DbError> {
        let margin = derive_margin(draft.price, draft.cost_price)?;

        let row = sqlx::query_as::<_, MenuItemRow>(&format!(
            "UPDATE menu_items
             SET name = $1, description = $2, price = $3, cost_price = $4,
                 image_url = $5, margin = $6, category_id = $7
             WHERE id = $8
             RETURNING {MENU_ITEM_COLUMNS}"
        ))
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(draft.price)
        .bind(draft.cost_price)
        .bind(&draft.image_url)
        .bind(margin)
        .bind(draft.category_id.map(CategoryId::into_inner))
        .bind(id.into_inner())
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound(format!("menu item {id}")))?;

        Ok(row.into())
    }

    /// Toggle a menu item's published flag, returning the new value.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::NotFound`] if the item does not exist.
    pub async fn toggle_published(&self, id: MenuItemId) -> Result<bool, DbError> {
        let published = sqlx::query_scalar::<_, bool>(
            r"UPDATE menu_items SET published = NOT published WHERE id = $1 RETURNING published",
        )
        .bind(id.into_inner())
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound(format!("menu item {id}")))?;

        Ok(published)
    }

    /// Delete a menu item. Its cost calculation cascades away.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::NotFound`] if the item does not exist.
    pub async fn delete(&self, id: MenuItemId) -> Result<(), DbError> {
        let result = sqlx::query(r"DELETE FROM menu_items WHERE id = $1")
            .bind(id.into_inner())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound(format!("menu item {id}")));
        }

        tracing::debug!(%id, "Deleted menu item");
        Ok(())
    }
}

/// Derive the stored margin from price and cost price.
fn derive_margin(price: Decimal, cost_price: Decimal) -> Result<Decimal, DbError> {
    price
        .checked_sub(cost_price)
        .ok_or(DbError::Numeric("menu item margin"))
}

/// A row from the `menu_items` table.
#[derive(Debug, Clone, sqlx::FromRow)]
struct MenuItemRow {
    id: Uuid,
    name: String,
    description: Option<String>,
    price: Decimal,
    cost_price: Decimal,
    image_url: Option<String>,
    margin: Decimal,
    created_at: DateTime<Utc>,
    category_id: Option<Uuid>,
    published: bool,
}

impl From<MenuItemRow> for MenuItem {
    fn from(row: MenuItemRow) -> Self {
        Self {
            id: MenuItemId::from(row.id),
            name: row.name,
            description: row.description,
            price: row.price,
            cost_price: row.cost_price,
            image_url: row.image_url,
            margin: row.margin,
            created_at: row.created_at,
            category_id: row.category_id.map(CategoryId::from),
            published: row.published,
        }
    }
}

/// A `menu_items` row joined with its category name.
#[derive(Debug, Clone, sqlx::FromRow)]
struct MenuItemWithCategoryRow {
    id: Uuid,
    name: String,
    description: Option<String>,
    price: Decimal,
    cost_price: Decimal,
    image_url: Option<String>,
    margin: Decimal,
    created_at: DateTime<Utc>,
    category_id: Option<Uuid>,
    category_name: String,
    published: bool,
}

impl From<MenuItemWithCategoryRow> for MenuItemWithCategory {
    fn from(row: MenuItemWithCategoryRow) -> Self {
        Self {
            item: MenuItem {
                id: MenuItemId::from(row.id),
                name: row.name,
                description: row.description,
                price: row.price,
                cost_price: row.cost_price,
                image_url: row.image_url,
                margin: row.margin,
                created_at: row.created_at,
                category_id: row.category_id.map(CategoryId::from),
                published: row.published,
            },
            category_name: row.category_name,
        }
    }
}
