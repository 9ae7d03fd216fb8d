//! REST handlers for the dish cost-calculation core.
//!
//! A save request carries the finished-dish output weight and the raw
//! ingredient usages; every derived value (waste-adjusted prices, line
//! costs, the total) is computed server-side and persisted atomically by
//! the calculation store. The response is the persisted calculation, so
//! the client sees exactly what a subsequent read will return.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/api/menu/{id}/calculation` | Current calculation for a dish |
//! | `POST` | `/api/menu/{id}/calculation` | Save (create or replace) |

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use brigade_types::{IngredientUsage, MenuItemId};

use crate::error::ApiError;
use crate::handlers::parse_uuid;
use crate::state::AppState;

/// Request body for `POST /api/menu/{id}/calculation`.
#[derive(Debug, serde::Deserialize)]
pub struct SaveCalculationBody {
    /// Finished-dish output weight in grams, stored as supplied.
    #[serde(default)]
    pub total_output_grams: i32,
    /// Ordered raw-ingredient usages.
    #[serde(default)]
    pub ingredients: Vec<IngredientUsage>,
}

/// Return the current calculation for a dish, lines in input order.
pub async fn get_calculation(
    State(state): State<Arc<AppState>>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let menu_item_id = MenuItemId::from(parse_uuid(&id_str)?);
    let calculation = state.calculations().get(menu_item_id).await?;
    Ok(Json(calculation))
}

/// Save (create or replace) the calculation for a dish.
///
/// Invalid ingredient input (negative amount or price, waste at or above
/// 100%) is rejected with 400 before anything is written. A failed save
/// rolls back completely; the previous calculation, if any, stays
/// intact.
pub async fn save_calculation(
    State(state): State<Arc<AppState>>,
    Path(id_str): Path<String>,
    Json(body): Json<SaveCalculationBody>,
) -> Result<impl IntoResponse, ApiError> {
    let menu_item_id = MenuItemId::from(parse_uuid(&id_str)?);

    let calculation = state
        .calculations()
        .save(menu_item_id, body.total_output_grams, &body.ingredients)
        .await?;

    Ok((StatusCode::CREATED, Json(calculation)))
}
