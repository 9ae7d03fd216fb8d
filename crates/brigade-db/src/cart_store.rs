//! Per-user cart persistence.
//!
//! Each user has at most one cart (`UNIQUE user_id`), created on first
//! touch via the same insert-or-update primitive the costing core uses.
//! Cart lines are unique per menu item; adding an item a second time
//! increments its quantity in SQL rather than read-modify-write.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use brigade_types::{Cart, CartId, CartItem, CartItemId, MenuItemId};

use crate::error::DbError;

/// Fields supplied when adding a menu item to a cart.
///
/// Name and price are copied from the menu item at add time so the cart
/// survives later menu edits.
#[derive(Debug, Clone)]
pub struct CartItemDraft {
    /// The menu item being added.
    pub menu_item_id: MenuItemId,
    /// Menu item name at add time.
    pub name: String,
    /// Quantity to add, must be positive.
    pub quantity: i32,
    /// Unit price at add time.
    pub price: Decimal,
}

/// Operations on the `carts` and `cart_items` tables.
pub struct CartStore<'a> {
    pool: &'a PgPool,
}

impl<'a> CartStore<'a> {
    /// Create a new cart store bound to a connection pool.
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Fetch a user's cart with its items, creating the cart on first use.
    ///
    /// Line images are resolved from the menu at read time; they are not
    /// stored on the line.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if a query fails.
    pub async fn get_or_create(&self, user_id: &str) -> Result<Cart, DbError> {
        let cart = upsert_cart(self.pool, user_id).await?;
        let items = self.items_of(cart.id).await?;

        Ok(Cart {
            id: CartId::from(cart.id),
            user_id: user_id.to_owned(),
            items,
            created_at: cart.created_at,
        })
    }

    /// Add a menu item to a user's cart, or increment its quantity if the
    /// line already exists. The line keeps the name and price it was
    /// first added with.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::InvalidQuantity`] for a non-positive quantity
    /// and [`DbError::Postgres`] if a statement fails.
    pub async fn add_item(&self, user_id: &str, draft: CartItemDraft) -> Result<CartItem, DbError> {
        if draft.quantity <= 0 {
            return Err(DbError::InvalidQuantity(draft.quantity));
        }

        let mut tx = self.pool.begin().await?;

        let cart = upsert_cart(&mut *tx, user_id).await?;

        let row = sqlx::query_as::<_, CartItemRow>(
            r"INSERT INTO cart_items (id, cart_id, menu_item_id, name, quantity, price, created_at)
              VALUES ($1, $2, $3, $4, $5, $6, $7)
              ON CONFLICT (cart_id, menu_item_id) DO UPDATE SET
                quantity = cart_items.quantity + EXCLUDED.quantity
              RETURNING id, cart_id, menu_item_id, name, quantity, price, created_at",
        )
        .bind(CartItemId::new().into_inner())
        .bind(cart.id)
        .bind(draft.menu_item_id.into_inner())
        .bind(&draft.name)
        .bind(draft.quantity)
        .bind(draft.price)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::debug!(
            user_id,
            menu_item_id = %draft.menu_item_id,
            quantity = row.quantity,
            "Added item to cart"
        );

        self.with_image(row).await
    }

    /// Set the quantity of a cart line. A quantity of zero or less
    /// removes the line and returns `None`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::NotFound`] if the user has no cart or the line
    /// does not exist.
    pub async fn set_quantity(
        &self,
        user_id: &str,
        menu_item_id: MenuItemId,
        quantity: i32,
    ) -> Result<Option<CartItem>, DbError> {
        let cart_id = self.require_cart(user_id).await?;

        if quantity <= 0 {
            let result = sqlx::query(
                r"DELETE FROM cart_items WHERE cart_id = $1 AND menu_item_id = $2",
            )
            .bind(cart_id)
            .bind(menu_item_id.into_inner())
            .execute(self.pool)
            .await?;

            if result.rows_affected() == 0 {
                return Err(DbError::NotFound(format!("cart item {menu_item_id}")));
            }
            return Ok(None);
        }

        let row = sqlx::query_as::<_, CartItemRow>(
            r"UPDATE cart_items SET quantity = $1
              WHERE cart_id = $2 AND menu_item_id = $3
              RETURNING id, cart_id, menu_item_id, name, quantity, price, created_at",
        )
        .bind(quantity)
        .bind(cart_id)
        .bind(menu_item_id.into_inner())
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound(format!("cart item {menu_item_id}")))?;

        Ok(Some(self.with_image(row).await?))
    }

    /// Remove one line from a user's cart. Removing a line that is not
    /// there is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::NotFound`] if the user has no cart.
    pub async fn remove_item(&self, user_id: &str, menu_item_id: MenuItemId) -> Result<(), DbError> {
        let cart_id = self.require_cart(user_id).await?;

        sqlx::query(r"DELETE FROM cart_items WHERE cart_id = $1 AND menu_item_id = $2")
            .bind(cart_id)
            .bind(menu_item_id.into_inner())
            .execute(self.pool)
            .await?;

        Ok(())
    }

    /// Remove all lines from a user's cart.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::NotFound`] if the user has no cart.
    pub async fn clear(&self, user_id: &str) -> Result<(), DbError> {
        let cart_id = self.require_cart(user_id).await?;

        sqlx::query(r"DELETE FROM cart_items WHERE cart_id = $1")
            .bind(cart_id)
            .execute(self.pool)
            .await?;

        tracing::debug!(user_id, "Cleared cart");
        Ok(())
    }

    /// Look up the cart id for a user, failing when none exists.
    async fn require_cart(&self, user_id: &str) -> Result<Uuid, DbError> {
        sqlx::query_scalar::<_, Uuid>(r"SELECT id FROM carts WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::NotFound(format!("cart for user {user_id}")))
    }

    /// Fetch the lines of a cart with their menu images, oldest first.
    async fn items_of(&self, cart_id: Uuid) -> Result<Vec<CartItem>, DbError> {
        let rows = sqlx::query_as::<_, CartItemWithImageRow>(
            r"SELECT ci.id, ci.cart_id, ci.menu_item_id, ci.name, ci.quantity, ci.price,
                     ci.created_at, m.image_url
              FROM cart_items ci
              LEFT JOIN menu_items m ON m.id = ci.menu_item_id
              WHERE ci.cart_id = $1
              ORDER BY ci.created_at",
        )
        .bind(cart_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(CartItem::from).collect())
    }

    /// Attach the menu item's current image to a bare cart line.
    async fn with_image(&self, row: CartItemRow) -> Result<CartItem, DbError> {
        let image_url = sqlx::query_scalar::<_, Option<String>>(
            r"SELECT image_url FROM menu_items WHERE id = $1",
        )
        .bind(row.menu_item_id)
        .fetch_optional(self.pool)
        .await?
        .flatten();

        Ok(CartItem {
            id: CartItemId::from(row.id),
            cart_id: CartId::from(row.cart_id),
            menu_item_id: MenuItemId::from(row.menu_item_id),
            name: row.name,
            quantity: row.quantity,
            price: row.price,
            image_url,
            created_at: row.created_at,
        })
    }
}

/// Insert-or-fetch the cart row for a user.
///
/// The no-op `DO UPDATE` makes `RETURNING` yield the existing row on
/// conflict, so concurrent first touches converge on one cart.
async fn upsert_cart<'e, E>(executor: E, user_id: &str) -> Result<CartRow, DbError>
where
    E: sqlx::Executor<'e, Database = sqlx::Postgres>,
{
    let row = sqlx::query_as::<_, CartRow>(
        r"INSERT INTO carts (id, user_id, created_at)
          VALUES ($1, $2, $3)
          ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id
          RETURNING id, created_at",
    )
    .bind(CartId::new().into_inner())
    .bind(user_id)
    .bind(Utc::now())
    .fetch_one(executor)
    .await?;

    Ok(row)
}

/// A row from the `carts` table.
#[derive(Debug, Clone, sqlx::FromRow)]
struct CartRow {
    id: Uuid,
    created_at: DateTime<Utc>,
}

/// A bare row from the `cart_items` table.
#[derive(Debug, Clone, sqlx::FromRow)]
struct CartItemRow {
    id: Uuid,
    cart_id: Uuid,
    menu_item_id: Uuid,
    name: String,
    quantity: i32,
    price: Decimal,
    created_at: DateTime<Utc>,
}

/// A `cart_items` row joined with the menu item's image.
#[derive(Debug, Clone, sqlx::FromRow)]
struct CartItemWithImageRow {
    id: Uuid,
    cart_id: Uuid,
    menu_item_id: Uuid,
    name: String,
    quantity: i32,
    price: Decimal,
    created_at: DateTime<Utc>,
    image_url: Option<String>,
}

impl From<CartItemWithImageRow> for CartItem {
    fn from(row: CartItemWithImageRow) -> Self {
        Self {
            id: CartItemId::from(row.id),
            cart_id: CartId::from(row.cart_id),
            menu_item_id: MenuItemId::from(row.menu_item_id),
            name: row.name,
            quantity: row.quantity,
            price: row.price,
            image_url: row.image_url,
            created_at: row.created_at,
        }
    }
}
