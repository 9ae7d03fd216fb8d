//! REST API endpoint handlers for the menu catalogue and inventory.
//!
//! All handlers go straight to `PostgreSQL` through the stores on the
//! shared [`AppState`]; there is no in-process cache to invalidate.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Minimal HTML status page |
//! | `GET` | `/api/menu` | List all menu items |
//! | `GET` | `/api/menu/published` | List published menu items |
//! | `GET` | `/api/menu/with-category` | List items with category name |
//! | `GET` | `/api/menu/{id}` | Get single menu item |
//! | `POST` | `/api/menu` | Create menu item |
//! | `PUT` | `/api/menu/{id}` | Update menu item |
//! | `POST` | `/api/menu/{id}/publish` | Toggle published |
//! | `DELETE` | `/api/menu/{id}` | Delete menu item |
//! | `GET` | `/api/categories` | List categories |
//! | `POST` | `/api/categories` | Create category |
//! | `PUT` | `/api/categories/{id}` | Rename category |
//! | `DELETE` | `/api/categories/{id}` | Delete category |
//! | `GET` | `/api/inventory` | List inventory |
//! | `POST` | `/api/inventory` | Create inventory item |
//! | `PUT` | `/api/inventory/{id}` | Update inventory item |
//! | `DELETE` | `/api/inventory/{id}` | Delete inventory item |

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::Json;
use rust_decimal::Decimal;
use uuid::Uuid;

use brigade_db::{InventoryItemDraft, MenuItemDraft};
use brigade_types::{CategoryId, InventoryItemId, MenuItemId};

use crate::error::ApiError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request bodies and query parameters
// ---------------------------------------------------------------------------

/// Request body for creating or updating a menu item.
#[derive(Debug, serde::Deserialize)]
pub struct MenuItemBody {
    /// Display name.
    pub name: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Selling price.
    #[serde(default)]
    pub price: Decimal,
    /// Production cost price.
    #[serde(default)]
    pub cost_price: Decimal,
    /// Optional image URL.
    pub image_url: Option<String>,
    /// Owning category.
    pub category_id: Option<CategoryId>,
    /// Initial visibility; ignored on update.
    #[serde(default)]
    pub published: bool,
}

impl From<MenuItemBody> for MenuItemDraft {
    fn from(body: MenuItemBody) -> Self {
        Self {
            name: body.name,
            description: body.description,
            price: body.price,
            cost_price: body.cost_price,
            image_url: body.image_url,
            category_id: body.category_id,
            published: body.published,
        }
    }
}

/// Request body for creating or renaming a category.
#[derive(Debug, serde::Deserialize)]
pub struct CategoryBody {
    /// Category name; must be non-empty.
    pub name: String,
}

/// Request body for creating or updating an inventory item.
#[derive(Debug, serde::Deserialize)]
pub struct InventoryItemBody {
    /// Product name.
    pub product_name: String,
    /// Stocked weight in grams.
    #[serde(default)]
    pub weight_grams: i32,
    /// Purchase price per kilogram.
    #[serde(default)]
    pub price_per_kg: Decimal,
    /// Availability flag.
    #[serde(default = "default_available")]
    pub available: bool,
}

const fn default_available() -> bool {
    true
}

impl From<InventoryItemBody> for InventoryItemDraft {
    fn from(body: InventoryItemBody) -> Self {
        Self {
            product_name: body.product_name,
            weight_grams: body.weight_grams,
            price_per_kg: body.price_per_kg,
            available: body.available,
        }
    }
}

/// Query parameters for `GET /api/menu/with-category`.
#[derive(Debug, serde::Deserialize)]
pub struct WithCategoryQuery {
    /// When `true`, only published items are returned.
    #[serde(default)]
    pub published: bool,
}

// ---------------------------------------------------------------------------
// GET / -- minimal HTML status page
// ---------------------------------------------------------------------------

/// Serve a minimal HTML page showing server status and API links.
pub async fn index() -> impl IntoResponse {
    Html(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Brigade</title>
    <style>
        body {
            background: #0d1117;
            color: #c9d1d9;
            font-family: 'Cascadia Code', 'Fira Code', 'Consolas', monospace;
            padding: 2rem;
            max-width: 800px;
            margin: 0 auto;
        }
        h1 { color: #58a6ff; margin-bottom: 0.25rem; }
        .subtitle { color: #8b949e; margin-top: 0; }
        a { color: #58a6ff; text-decoration: none; }
        a:hover { text-decoration: underline; }
        ul { list-style: none; padding: 0; }
        li { padding: 0.3rem 0; }
        .status { color: #3fb950; font-weight: bold; }
        hr { border: none; border-top: 1px solid #30363d; margin: 1.5rem 0; }
    </style>
</head>
<body>
    <h1>Brigade</h1>
    <p class="subtitle">Restaurant ordering backend</p>

    <p>Status: <span class="status">RUNNING</span></p>

    <hr>

    <h2>API Endpoints</h2>
    <ul>
        <li><a href="/api/menu">/api/menu</a> -- Menu items</li>
        <li><a href="/api/menu/published">/api/menu/published</a> -- Published menu items</li>
        <li><a href="/api/menu/with-category">/api/menu/with-category</a> -- Items with category names</li>
        <li>/api/menu/:id/calculation -- Dish cost calculation</li>
        <li><a href="/api/categories">/api/categories</a> -- Categories</li>
        <li><a href="/api/inventory">/api/inventory</a> -- Inventory</li>
        <li>/api/cart/:user_id -- Carts</li>
        <li>/api/orders/:user_id -- Orders</li>
    </ul>
</body>
</html>"#,
    )
}

// ---------------------------------------------------------------------------
// Menu items
// ---------------------------------------------------------------------------

/// List all menu items, newest first.
pub async fn list_menu(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let items = state.menu().list().await?;
    Ok(Json(serde_json::json!({
        "count": items.len(),
        "items": items,
    })))
}

/// List published menu items only.
pub async fn list_published_menu(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let items = state.menu().list_published().await?;
    Ok(Json(serde_json::json!({
        "count": items.len(),
        "items": items,
    })))
}

/// List menu items joined with their category name.
///
/// # Query Parameters
///
/// - `published`: when `true`, unpublished items are filtered out.
pub async fn list_menu_with_category(
    State(state): State<Arc<AppState>>,
    Query(params): Query<WithCategoryQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let items = state.menu().list_with_category(params.published).await?;
    Ok(Json(serde_json::json!({
        "count": items.len(),
        "items": items,
    })))
}

/// Return a single menu item by id.
pub async fn get_menu_item(
    State(state): State<Arc<AppState>>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = MenuItemId::from(parse_uuid(&id_str)?);
    let item = state.menu().get(id).await?;
    Ok(Json(item))
}

/// Create a menu item. The margin is derived server-side.
pub async fn create_menu_item(
    State(state): State<Arc<AppState>>,
    Json(body): Json<MenuItemBody>,
) -> Result<impl IntoResponse, ApiError> {
    if body.name.is_empty() {
        return Err(ApiError::InvalidInput(String::from("name is required")));
    }
    let item = state.menu().create(body.into()).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Update a menu item. `published` is left untouched.
pub async fn update_menu_item(
    State(state): State<Arc<AppState>>,
    Path(id_str): Path<String>,
    Json(body): Json<MenuItemBody>,
) -> Result<impl IntoResponse, ApiError> {
    let id = MenuItemId::from(parse_uuid(&id_str)?);
    if body.name.is_empty() {
        return Err(ApiError::InvalidInput(String::from("name is required")));
    }
    let item = state.menu().update(id, body.into()).await?;
    Ok(Json(item))
}

/// Toggle a menu item's published flag.
pub async fn publish_menu_item(
    State(state): State<Arc<AppState>>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = MenuItemId::from(parse_uuid(&id_str)?);
    let published = state.menu().toggle_published(id).await?;
    Ok(Json(serde_json::json!({
        "id": id,
        "published": published,
    })))
}

/// Delete a menu item. Its cost calculation cascades away.
pub async fn delete_menu_item(
    State(state): State<Arc<AppState>>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = MenuItemId::from(parse_uuid(&id_str)?);
    state.menu().delete(id).await?;
    Ok(Json(serde_json::json!({
        "ok": true,
        "message": "menu item deleted",
    })))
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// List all categories.
pub async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let categories = state.categories().list().await?;
    Ok(Json(serde_json::json!({
        "count": categories.len(),
        "categories": categories,
    })))
}

/// Create a category with a unique, non-empty name.
pub async fn create_category(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CategoryBody>,
) -> Result<impl IntoResponse, ApiError> {
    if body.name.is_empty() {
        return Err(ApiError::InvalidInput(String::from("name is required")));
    }
    let category = state.categories().create(&body.name).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// Rename a category.
pub async fn update_category(
    State(state): State<Arc<AppState>>,
    Path(id_str): Path<String>,
    Json(body): Json<CategoryBody>,
) -> Result<impl IntoResponse, ApiError> {
    let id = CategoryId::from(parse_uuid(&id_str)?);
    if body.name.is_empty() {
        return Err(ApiError::InvalidInput(String::from("name is required")));
    }
    let category = state.categories().rename(id, &body.name).await?;
    Ok(Json(category))
}

/// Delete a category, detaching its menu items.
pub async fn delete_category(
    State(state): State<Arc<AppState>>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = CategoryId::from(parse_uuid(&id_str)?);
    state.categories().delete(id).await?;
    Ok(Json(serde_json::json!({
        "ok": true,
        "message": "category deleted",
    })))
}

// ---------------------------------------------------------------------------
// Inventory
// ---------------------------------------------------------------------------

/// List all inventory items.
pub async fn list_inventory(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let items = state.inventory().list().await?;
    Ok(Json(serde_json::json!({
        "count": items.len(),
        "items": items,
    })))
}

/// Create an inventory item. The emoji is derived server-side.
pub async fn create_inventory_item(
    State(state): State<Arc<AppState>>,
    Json(body): Json<InventoryItemBody>,
) -> Result<impl IntoResponse, ApiError> {
    if body.product_name.is_empty() {
        return Err(ApiError::InvalidInput(String::from(
            "product_name is required",
        )));
    }
    let item = state.inventory().create(body.into()).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Update an inventory item, re-deriving its emoji.
pub async fn update_inventory_item(
    State(state): State<Arc<AppState>>,
    Path(id_str): Path<String>,
    Json(body): Json<InventoryItemBody>,
) -> Result<impl IntoResponse, ApiError> {
    let id = InventoryItemId::from(parse_uuid(&id_str)?);
    if body.product_name.is_empty() {
        return Err(ApiError::InvalidInput(String::from(
            "product_name is required",
        )));
    }
    let item = state.inventory().update(id, body.into()).await?;
    Ok(Json(item))
}

/// Delete an inventory item.
pub async fn delete_inventory_item(
    State(state): State<Arc<AppState>>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = InventoryItemId::from(parse_uuid(&id_str)?);
    state.inventory().delete(id).await?;
    Ok(Json(serde_json::json!({
        "ok": true,
        "message": "inventory item deleted",
    })))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a UUID from a string, returning an [`ApiError`] on failure.
pub(crate) fn parse_uuid(s: &str) -> Result<Uuid, ApiError> {
    s.parse::<Uuid>()
        .map_err(|e| ApiError::InvalidUuid(format!("{s}: {e}")))
}
