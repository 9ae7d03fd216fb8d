//! Error types for the data layer.
//!
//! All errors are propagated via [`DbError`], which wraps the underlying
//! [`sqlx`] errors with additional context about which operation failed.
//! Cost-model rejections pass through unchanged so the API layer can map
//! them to client errors instead of server faults.

use brigade_costing::CostError;

/// Errors that can occur in the data layer.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// A `PostgreSQL` operation failed.
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] sqlx::Error),

    /// A `PostgreSQL` migration failed.
    #[error("PostgreSQL migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// The cost model rejected the supplied ingredient usages.
    ///
    /// Raised before any transaction is opened; nothing is persisted.
    #[error("invalid calculation input: {0}")]
    Cost(#[from] CostError),

    /// The requested record does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// An attempt to place an order from a cart with no items.
    #[error("cart is empty")]
    EmptyCart,

    /// A quantity that must be positive was zero or negative.
    #[error("quantity must be positive, got {0}")]
    InvalidQuantity(i32),

    /// A derived decimal value left the representable range.
    #[error("numeric overflow while computing {0}")]
    Numeric(&'static str),

    /// A configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}
