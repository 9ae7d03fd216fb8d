//! REST handlers for carts and orders.
//!
//! Cart routes are keyed by the external `user_id` (issued by the auth
//! service in front of this backend). A user's cart is created on first
//! touch; placing an order snapshots and empties it in one transaction.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/api/cart/{user_id}` | Get-or-create the cart |
//! | `POST` | `/api/cart/{user_id}/items` | Add item / increment quantity |
//! | `PUT` | `/api/cart/{user_id}/items/{menu_item_id}` | Set quantity |
//! | `DELETE` | `/api/cart/{user_id}/items/{menu_item_id}` | Remove item |
//! | `DELETE` | `/api/cart/{user_id}` | Clear cart |
//! | `POST` | `/api/orders/{user_id}` | Place order from cart |
//! | `GET` | `/api/orders/{user_id}` | List the user's orders |

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use rust_decimal::Decimal;

use brigade_db::CartItemDraft;
use brigade_types::MenuItemId;

use crate::error::ApiError;
use crate::handlers::parse_uuid;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

/// Request body for `POST /api/cart/{user_id}/items`.
#[derive(Debug, serde::Deserialize)]
pub struct AddCartItemBody {
    /// The menu item to add.
    pub menu_item_id: MenuItemId,
    /// Menu item name, copied onto the cart line.
    pub name: String,
    /// Quantity to add; must be positive.
    pub quantity: i32,
    /// Unit price, copied onto the cart line.
    #[serde(default)]
    pub price: Decimal,
}

/// Request body for `PUT /api/cart/{user_id}/items/{menu_item_id}`.
#[derive(Debug, serde::Deserialize)]
pub struct SetQuantityBody {
    /// New quantity; zero or less removes the line.
    pub quantity: i32,
}

// ---------------------------------------------------------------------------
// Carts
// ---------------------------------------------------------------------------

/// Return the user's cart, creating it on first use.
pub async fn get_cart(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let cart = state.carts().get_or_create(&user_id).await?;
    Ok(Json(cart))
}

/// Add a menu item to the cart, or increment its quantity if already
/// present.
pub async fn add_cart_item(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(body): Json<AddCartItemBody>,
) -> Result<impl IntoResponse, ApiError> {
    let item = state
        .carts()
        .add_item(
            &user_id,
            CartItemDraft {
                menu_item_id: body.menu_item_id,
                name: body.name,
                quantity: body.quantity,
                price: body.price,
            },
        )
        .await?;
    Ok(Json(item))
}

/// Set a cart line's quantity. A quantity of zero or less removes the
/// line and responds with 204.
pub async fn set_cart_item_quantity(
    State(state): State<Arc<AppState>>,
    Path((user_id, item_str)): Path<(String, String)>,
    Json(body): Json<SetQuantityBody>,
) -> Result<impl IntoResponse, ApiError> {
    let menu_item_id = MenuItemId::from(parse_uuid(&item_str)?);
    let updated = state
        .carts()
        .set_quantity(&user_id, menu_item_id, body.quantity)
        .await?;

    match updated {
        Some(item) => Ok(Json(item).into_response()),
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

/// Remove one line from the cart.
pub async fn remove_cart_item(
    State(state): State<Arc<AppState>>,
    Path((user_id, item_str)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let menu_item_id = MenuItemId::from(parse_uuid(&item_str)?);
    state.carts().remove_item(&user_id, menu_item_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Remove every line from the cart.
pub async fn clear_cart(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state.carts().clear(&user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Orders
// ---------------------------------------------------------------------------

/// Place an order from the user's current cart.
///
/// Fails with 404 when the user has no cart and 400 when the cart is
/// empty.
pub async fn place_order(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let order = state.orders().place(&user_id).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// List the user's orders, newest first.
pub async fn list_orders(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let orders = state.orders().list(&user_id).await?;
    Ok(Json(serde_json::json!({
        "count": orders.len(),
        "orders": orders,
    })))
}
