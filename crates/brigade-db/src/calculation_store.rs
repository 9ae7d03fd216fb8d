//! Dish cost-calculation persistence: atomic whole-record replacement.
//!
//! A calculation is one logical record: a header row in
//! `menu_calculations` plus its ingredient lines in
//! `calculation_ingredients`. At most one calculation exists per menu
//! item at any time, and a save for a dish that already has one replaces
//! the whole record in a single transaction: the header keeps its id and
//! gets fresh totals and timestamp, all prior lines are deleted, and the
//! new lines are inserted in input order. Readers never observe a header
//! whose total disagrees with its visible lines.
//!
//! Concurrent saves for the same dish are serialized by the
//! `ON CONFLICT (menu_item_id) DO UPDATE` upsert: the unique constraint
//! makes the insert-or-update atomic, and the row lock the conflicting
//! update takes is held until commit, so a second writer blocks until the
//! first one's replace is complete. Saves for distinct dishes do not
//! contend.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use brigade_costing::{cost_usages, CostedLine};
use brigade_types::{
    Calculation, CalculationId, IngredientLine, IngredientLineId, IngredientUsage, MenuItemId,
};

use crate::error::DbError;

/// Operations on the `menu_calculations` and `calculation_ingredients`
/// tables.
pub struct CalculationStore<'a> {
    pool: &'a PgPool,
}

impl<'a> CalculationStore<'a> {
    /// Create a new calculation store bound to a connection pool.
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Save (create or replace) the calculation for a dish.
    ///
    /// The usages are costed first; invalid input fails the call before
    /// any transaction is opened. The replace itself is atomic: either
    /// the full new state (header plus all new lines) becomes visible, or
    /// none of it does. Retrying a failed save with the same inputs
    /// produces the same final state.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Cost`] for invalid ingredient input and
    /// [`DbError::Postgres`] if the transaction cannot commit (the
    /// foreign key also rejects saves for a dish that does not exist).
    pub async fn save(
        &self,
        menu_item_id: MenuItemId,
        total_output_grams: i32,
        usages: &[IngredientUsage],
    ) -> Result<Calculation, DbError> {
        // Cost everything up front; persistence only sees derived values
        // consistent with their inputs.
        let costed = cost_usages(usages)?;
        let now = Utc::now();

        let mut tx = self.pool.begin().await?;

        // Insert-or-update keyed by the unique menu_item_id. On replace
        // the existing id is kept and its row lock serializes concurrent
        // saves for this dish until commit.
        let calculation_id = sqlx::query_scalar::<_, Uuid>(
            r"INSERT INTO menu_calculations (id, menu_item_id, total_output_grams, total_cost, created_at)
              VALUES ($1, $2, $3, $4, $5)
              ON CONFLICT (menu_item_id) DO UPDATE SET
                total_output_grams = EXCLUDED.total_output_grams,
                total_cost = EXCLUDED.total_cost,
                created_at = EXCLUDED.created_at
              RETURNING id",
        )
        .bind(CalculationId::new().into_inner())
        .bind(menu_item_id.into_inner())
        .bind(total_output_grams)
        .bind(costed.total_cost)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(r"DELETE FROM calculation_ingredients WHERE calculation_id = $1")
            .bind(calculation_id)
            .execute(&mut *tx)
            .await?;

        let lines = insert_lines(&mut tx, calculation_id, &costed.lines, now).await?;

        tx.commit().await?;

        tracing::debug!(
            %menu_item_id,
            calculation_id = %calculation_id,
            lines = lines.len(),
            total_cost = %costed.total_cost,
            "Saved dish calculation"
        );

        Ok(Calculation {
            id: CalculationId::from(calculation_id),
            menu_item_id,
            total_output_grams,
            total_cost: costed.total_cost,
            ingredients: lines,
            created_at: now,
        })
    }

    /// Read the calculation for a dish, lines in input order.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::NotFound`] when the dish has no calculation and
    /// [`DbError::Postgres`] if a query fails.
    pub async fn get(&self, menu_item_id: MenuItemId) -> Result<Calculation, DbError> {
        let header = sqlx::query_as::<_, CalculationRow>(
            r"SELECT id, menu_item_id, total_output_grams, total_cost, created_at
              FROM menu_calculations
              WHERE menu_item_id = $1
              ORDER BY created_at DESC
              LIMIT 1",
        )
        .bind(menu_item_id.into_inner())
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound(format!("calculation for menu item {menu_item_id}")))?;

        let lines = sqlx::query_as::<_, IngredientLineRow>(
            r"SELECT id, calculation_id, product_name, amount_grams, price_per_kg,
                     waste_percent, price_after_waste, line_cost, created_at
              FROM calculation_ingredients
              WHERE calculation_id = $1
              ORDER BY position",
        )
        .bind(header.id)
        .fetch_all(self.pool)
        .await?;

        Ok(Calculation {
            id: CalculationId::from(header.id),
            menu_item_id: MenuItemId::from(header.menu_item_id),
            total_output_grams: header.total_output_grams,
            total_cost: header.total_cost,
            ingredients: lines.into_iter().map(IngredientLine::from).collect(),
            created_at: header.created_at,
        })
    }
}

/// Batch-insert the costed lines under a calculation id.
///
/// A single INSERT with UNNEST arrays replaces N round-trips. The
/// `position` column records input order for the read path.
async fn insert_lines(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    calculation_id: Uuid,
    costed: &[CostedLine],
    now: DateTime<Utc>,
) -> Result<Vec<IngredientLine>, DbError> {
    if costed.is_empty() {
        return Ok(Vec::new());
    }

    let len = costed.len();
    let mut ids = Vec::with_capacity(len);
    let mut calculation_ids = Vec::with_capacity(len);
    let mut product_names = Vec::with_capacity(len);
    let mut amounts = Vec::with_capacity(len);
    let mut prices = Vec::with_capacity(len);
    let mut wastes = Vec::with_capacity(len);
    let mut adjusted_prices = Vec::with_capacity(len);
    let mut line_costs = Vec::with_capacity(len);
    let mut positions = Vec::with_capacity(len);
    let mut timestamps = Vec::with_capacity(len);

    for (index, line) in costed.iter().enumerate() {
        ids.push(IngredientLineId::new().into_inner());
        calculation_ids.push(calculation_id);
        product_names.push(line.product_name.clone());
        amounts.push(line.amount_grams);
        prices.push(line.price_per_kg);
        wastes.push(line.waste_percent);
        adjusted_prices.push(line.price_after_waste);
        line_costs.push(line.line_cost);
        positions.push(i32::try_from(index).unwrap_or(i32::MAX));
        timestamps.push(now);
    }

    sqlx::query(
        r"INSERT INTO calculation_ingredients
            (id, calculation_id, product_name, amount_grams, price_per_kg, waste_percent, price_after_waste, line_cost, position, created_at)
          SELECT * FROM UNNEST($1::UUID[], $2::UUID[], $3::TEXT[], $4::INTEGER[], $5::NUMERIC[], $6::NUMERIC[], $7::NUMERIC[], $8::NUMERIC[], $9::INTEGER[], $10::TIMESTAMPTZ[])",
    )
    .bind(&ids)
    .bind(&calculation_ids)
    .bind(&product_names)
    .bind(&amounts)
    .bind(&prices)
    .bind(&wastes)
    .bind(&adjusted_prices)
    .bind(&line_costs)
    .bind(&positions)
    .bind(&timestamps)
    .execute(&mut **tx)
    .await?;

    let lines = ids
        .into_iter()
        .zip(costed)
        .map(|(id, line)| IngredientLine {
            id: IngredientLineId::from(id),
            calculation_id: CalculationId::from(calculation_id),
            product_name: line.product_name.clone(),
            amount_grams: line.amount_grams,
            price_per_kg: line.price_per_kg,
            waste_percent: line.waste_percent,
            price_after_waste: line.price_after_waste,
            line_cost: line.line_cost,
            created_at: now,
        })
        .collect();

    Ok(lines)
}

/// A row from the `menu_calculations` table.
#[derive(Debug, Clone, sqlx::FromRow)]
struct CalculationRow {
    /// Calculation UUID.
    id: Uuid,
    /// The dish this calculation costs.
    menu_item_id: Uuid,
    /// Finished-dish output weight in grams.
    total_output_grams: i32,
    /// Sum of the line costs.
    total_cost: Decimal,
    /// Timestamp of the most recent save.
    created_at: DateTime<Utc>,
}

/// A row from the `calculation_ingredients` table.
#[derive(Debug, Clone, sqlx::FromRow)]
struct IngredientLineRow {
    /// Line UUID.
    id: Uuid,
    /// Owning calculation UUID.
    calculation_id: Uuid,
    /// Product name.
    product_name: String,
    /// Consumed weight in grams.
    amount_grams: i32,
    /// Purchase price per kilogram.
    price_per_kg: Decimal,
    /// Waste percentage.
    waste_percent: Decimal,
    /// Waste-adjusted price per kilogram.
    price_after_waste: Decimal,
    /// Cost of this line.
    line_cost: Decimal,
    /// Insertion timestamp.
    created_at: DateTime<Utc>,
}

impl From<IngredientLineRow> for IngredientLine {
    fn from(row: IngredientLineRow) -> Self {
        Self {
            id: IngredientLineId::from(row.id),
            calculation_id: CalculationId::from(row.calculation_id),
            product_name: row.product_name,
            amount_grams: row.amount_grams,
            price_per_kg: row.price_per_kg,
            waste_percent: row.waste_percent,
            price_after_waste: row.price_after_waste,
            line_cost: row.line_cost,
            created_at: row.created_at,
        }
    }
}
