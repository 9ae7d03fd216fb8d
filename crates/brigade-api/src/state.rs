//! Shared application state for the API server.
//!
//! [`AppState`] holds the `PostgreSQL` pool handle. Every request is
//! fully backed by the database; there is no in-process cache, so the
//! state is nothing more than the pool plus construction helpers for the
//! per-aggregate stores.

use brigade_db::{
    CalculationStore, CartStore, CategoryStore, InventoryStore, MenuStore, OrderStore,
    PostgresPool,
};

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`](std::sync::Arc) and injected via Axum's `State`
/// extractor.
#[derive(Clone)]
pub struct AppState {
    /// The `PostgreSQL` connection pool.
    pub db: PostgresPool,
}

impl AppState {
    /// Create application state around a connected pool.
    pub const fn new(db: PostgresPool) -> Self {
        Self { db }
    }

    /// Menu item store bound to the shared pool.
    pub const fn menu(&self) -> MenuStore<'_> {
        MenuStore::new(self.db.pool())
    }

    /// Category store bound to the shared pool.
    pub const fn categories(&self) -> CategoryStore<'_> {
        CategoryStore::new(self.db.pool())
    }

    /// Inventory store bound to the shared pool.
    pub const fn inventory(&self) -> InventoryStore<'_> {
        InventoryStore::new(self.db.pool())
    }

    /// Calculation store bound to the shared pool.
    pub const fn calculations(&self) -> CalculationStore<'_> {
        CalculationStore::new(self.db.pool())
    }

    /// Cart store bound to the shared pool.
    pub const fn carts(&self) -> CartStore<'_> {
        CartStore::new(self.db.pool())
    }

    /// Order store bound to the shared pool.
    pub const fn orders(&self) -> OrderStore<'_> {
        OrderStore::new(self.db.pool())
    }
}
