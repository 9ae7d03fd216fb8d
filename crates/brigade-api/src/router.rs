//! Axum router construction for the Brigade API.
//!
//! Assembles all REST routes into a single [`Router`] with CORS
//! middleware enabled for cross-origin storefront/dashboard access.

use std::sync::Arc;

use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::costing;
use crate::handlers;
use crate::orders;
use crate::state::AppState;

/// Build the complete Axum router for the ordering backend.
///
/// CORS is configured to allow any origin for development. In
/// production this should be restricted.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Status page
        .route("/", get(handlers::index))
        // Menu catalogue
        .route(
            "/api/menu",
            get(handlers::list_menu).post(handlers::create_menu_item),
        )
        .route("/api/menu/published", get(handlers::list_published_menu))
        .route(
            "/api/menu/with-category",
            get(handlers::list_menu_with_category),
        )
        .route(
            "/api/menu/{id}",
            get(handlers::get_menu_item)
                .put(handlers::update_menu_item)
                .delete(handlers::delete_menu_item),
        )
        .route("/api/menu/{id}/publish", post(handlers::publish_menu_item))
        // Dish costing core
        .route(
            "/api/menu/{id}/calculation",
            get(costing::get_calculation).post(costing::save_calculation),
        )
        // Categories
        .route(
            "/api/categories",
            get(handlers::list_categories).post(handlers::create_category),
        )
        .route(
            "/api/categories/{id}",
            put(handlers::update_category).delete(handlers::delete_category),
        )
        // Inventory
        .route(
            "/api/inventory",
            get(handlers::list_inventory).post(handlers::create_inventory_item),
        )
        .route(
            "/api/inventory/{id}",
            put(handlers::update_inventory_item).delete(handlers::delete_inventory_item),
        )
        // Carts
        .route(
            "/api/cart/{user_id}",
            get(orders::get_cart).delete(orders::clear_cart),
        )
        .route("/api/cart/{user_id}/items", post(orders::add_cart_item))
        .route(
            "/api/cart/{user_id}/items/{menu_item_id}",
            put(orders::set_cart_item_quantity).delete(orders::remove_cart_item),
        )
        // Orders
        .route(
            "/api/orders/{user_id}",
            get(orders::list_orders).post(orders::place_order),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
