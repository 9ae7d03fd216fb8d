//! HTTP API server for the Brigade ordering backend.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **Menu catalogue endpoints** (items, categories, publishing)
//! - **Inventory endpoints** for raw-ingredient stock
//! - **Dish costing endpoints** backed by the atomic calculation store
//! - **Cart and order endpoints** keyed by the external user id
//! - **Minimal HTML status page** (`GET /`) with links to the API
//!
//! # Architecture
//!
//! Handlers hold no state of their own: every request flows through the
//! stores in [`brigade_db`] against the shared `PostgreSQL` pool, so
//! horizontal scaling needs no coordination beyond the database. Errors
//! follow a fixed taxonomy -- invalid input maps to 400, missing records
//! to 404, persistence failures to 500 after rollback.

pub mod costing;
pub mod error;
pub mod handlers;
pub mod orders;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use error::ApiError;
pub use router::build_router;
pub use server::{start_server, ServerConfig, ServerError};
pub use state::AppState;
