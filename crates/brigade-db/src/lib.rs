//! `PostgreSQL` data layer for the Brigade ordering backend.
//!
//! One store per aggregate, all bound to the shared [`PgPool`] held by
//! [`PostgresPool`]. Every read and write is fully backed by the
//! database; the stores hold no in-process mutable state, so correctness
//! reduces to transaction isolation plus the per-dish serialization the
//! calculation store's upsert provides.
//!
//! # Modules
//!
//! - [`postgres`] -- Connection pool, configuration, migrations
//! - [`calculation_store`] -- Atomic replace of dish cost calculations
//! - [`menu_store`] -- Menu item CRUD with derived margin
//! - [`category_store`] -- Category CRUD
//! - [`inventory_store`] -- Inventory CRUD with derived emoji
//! - [`cart_store`] -- Per-user carts
//! - [`order_store`] -- Order placement and history
//! - [`emoji`] -- Product-name emoji derivation
//! - [`error`] -- Shared error types
//!
//! [`PgPool`]: sqlx::PgPool

pub mod calculation_store;
pub mod cart_store;
pub mod category_store;
pub mod emoji;
pub mod error;
pub mod inventory_store;
pub mod menu_store;
pub mod order_store;
pub mod postgres;

// Re-export primary types for convenience.
pub use calculation_store::CalculationStore;
pub use cart_store::{CartItemDraft, CartStore};
pub use category_store::CategoryStore;
pub use error::DbError;
pub use inventory_store::{InventoryItemDraft, InventoryStore};
pub use menu_store::{MenuItemDraft, MenuStore};
pub use order_store::OrderStore;
pub use postgres::{PostgresConfig, PostgresPool};
