//! Core entity structs for the Brigade ordering backend.
//!
//! Covers the menu catalogue (`MenuItem`, `Category`), the raw-ingredient
//! inventory (`InventoryItem`), the dish costing records (`Calculation`,
//! `IngredientLine`, `IngredientUsage`), and the ordering flow (`Cart`,
//! `CartItem`, `Order`, `OrderItem`).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::OrderStatus;
use crate::ids::{
    CalculationId, CartId, CartItemId, CategoryId, IngredientLineId, InventoryItemId, MenuItemId,
    OrderId, OrderItemId,
};

// ---------------------------------------------------------------------------
// Menu catalogue
// ---------------------------------------------------------------------------

/// A sellable dish on the menu.
///
/// `margin` is always `price - cost_price` and is recomputed on every
/// create/update; it is stored denormalized for cheap list queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct MenuItem {
    /// Menu item identifier.
    pub id: MenuItemId,
    /// Display name.
    pub name: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Selling price.
    #[ts(as = "String")]
    pub price: Decimal,
    /// Production cost price.
    #[ts(as = "String")]
    pub cost_price: Decimal,
    /// Optional image URL for the storefront.
    pub image_url: Option<String>,
    /// Derived `price - cost_price`.
    #[ts(as = "String")]
    pub margin: Decimal,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Owning category, if assigned.
    pub category_id: Option<CategoryId>,
    /// Whether the dish is visible on the public menu.
    pub published: bool,
}

/// A menu item joined with its category name for list views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct MenuItemWithCategory {
    /// The menu item.
    #[serde(flatten)]
    pub item: MenuItem,
    /// Category display name; empty when the item has no category.
    pub category_name: String,
}

/// A menu category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Category {
    /// Category identifier.
    pub id: CategoryId,
    /// Unique display name.
    pub name: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Inventory
// ---------------------------------------------------------------------------

/// A raw ingredient held in stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct InventoryItem {
    /// Inventory item identifier.
    pub id: InventoryItemId,
    /// Product name (e.g. "salmon fillet").
    pub product_name: String,
    /// Stocked weight in grams.
    pub weight_grams: i32,
    /// Purchase price per kilogram.
    #[ts(as = "String")]
    pub price_per_kg: Decimal,
    /// Whether the product is currently available.
    pub available: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Presentation emoji derived from the product name.
    pub emoji: String,
}

// ---------------------------------------------------------------------------
// Dish costing
// ---------------------------------------------------------------------------

/// One raw-ingredient consumption entry supplied as input to a calculation.
///
/// Transient: usages are never persisted directly. The cost model turns
/// each usage into an [`IngredientLine`] with derived values filled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct IngredientUsage {
    /// Product name as entered by the chef.
    pub product_name: String,
    /// Consumed weight in grams.
    pub amount_grams: i32,
    /// Purchase price per kilogram.
    #[ts(as = "String")]
    pub price_per_kg: Decimal,
    /// Percentage of the raw ingredient lost to trimming/spoilage, in `[0, 100)`.
    #[ts(as = "String")]
    pub waste_percent: Decimal,
}

/// One persisted, cost-adjusted ingredient line of a calculation.
///
/// `price_after_waste` and `line_cost` are always consistent with
/// `amount_grams`, `price_per_kg` and `waste_percent`; a line is never
/// stored with stale derived values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct IngredientLine {
    /// Line identifier.
    pub id: IngredientLineId,
    /// Owning calculation.
    pub calculation_id: CalculationId,
    /// Product name.
    pub product_name: String,
    /// Consumed weight in grams.
    pub amount_grams: i32,
    /// Purchase price per kilogram.
    #[ts(as = "String")]
    pub price_per_kg: Decimal,
    /// Waste percentage in `[0, 100)`.
    #[ts(as = "String")]
    pub waste_percent: Decimal,
    /// Per-kilogram price inflated to account for waste.
    #[ts(as = "String")]
    pub price_after_waste: Decimal,
    /// Cost of this line: consumed kilograms times the adjusted price.
    #[ts(as = "String")]
    pub line_cost: Decimal,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// The persisted cost breakdown for one dish.
///
/// At most one calculation exists per menu item at any time. A save for a
/// dish that already has one replaces the whole record: header fields are
/// updated in place (same id) and all prior lines are discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Calculation {
    /// Calculation identifier.
    pub id: CalculationId,
    /// The dish this calculation costs.
    pub menu_item_id: MenuItemId,
    /// Finished-dish output weight in grams, stored as supplied.
    pub total_output_grams: i32,
    /// Sum of all line costs.
    #[ts(as = "String")]
    pub total_cost: Decimal,
    /// Costed ingredient lines, in input order.
    pub ingredients: Vec<IngredientLine>,
    /// Timestamp of the most recent save.
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Carts and orders
// ---------------------------------------------------------------------------

/// A user's cart with its line items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Cart {
    /// Cart identifier.
    pub id: CartId,
    /// Owning user (issued by the external auth service).
    pub user_id: String,
    /// Line items currently in the cart.
    pub items: Vec<CartItem>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// One line item in a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CartItem {
    /// Cart line identifier.
    pub id: CartItemId,
    /// Owning cart.
    pub cart_id: CartId,
    /// The menu item added to the cart.
    pub menu_item_id: MenuItemId,
    /// Menu item name at the time it was added.
    pub name: String,
    /// Quantity, always positive.
    pub quantity: i32,
    /// Unit price at the time it was added.
    #[ts(as = "String")]
    pub price: Decimal,
    /// Image URL resolved from the menu item; not stored on the line.
    pub image_url: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A placed order with its line items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Order {
    /// Order identifier.
    pub id: OrderId,
    /// Ordering user.
    pub user_id: String,
    /// The cart the order was placed from.
    pub cart_id: CartId,
    /// Ordered line items.
    pub items: Vec<OrderItem>,
    /// Sum of `quantity * price` over all items.
    #[ts(as = "String")]
    pub total_price: Decimal,
    /// Current order status.
    pub status: OrderStatus,
    /// Placement timestamp.
    pub created_at: DateTime<Utc>,
}

/// One line item of a placed order.
///
/// Name and price are copied from the cart at placement time so the order
/// history survives later menu edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct OrderItem {
    /// Order line identifier.
    pub id: OrderItemId,
    /// Owning order.
    pub order_id: OrderId,
    /// The ordered menu item.
    pub menu_item_id: MenuItemId,
    /// Menu item name at placement time.
    pub name: String,
    /// Ordered quantity.
    pub quantity: i32,
    /// Unit price at placement time.
    #[ts(as = "String")]
    pub price: Decimal,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn sample_usage() -> IngredientUsage {
        IngredientUsage {
            product_name: String::from("salmon"),
            amount_grams: 200,
            price_per_kg: Decimal::new(50_000, 2),
            waste_percent: Decimal::new(2_000, 2),
        }
    }

    #[test]
    fn usage_serde_round_trip() {
        let usage = sample_usage();
        let json = serde_json::to_string(&usage).unwrap();
        let back: IngredientUsage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, usage);
    }

    #[test]
    fn usage_decimal_fields_accept_json_numbers() {
        // Frontends send bare numbers; rust_decimal's serde accepts both
        // numbers and strings on deserialization.
        let json = r#"{
            "product_name": "rice",
            "amount_grams": 120,
            "price_per_kg": 90.50,
            "waste_percent": 0
        }"#;
        let usage: IngredientUsage = serde_json::from_str(json).unwrap();
        assert_eq!(usage.price_per_kg, Decimal::new(9_050, 2));
        assert_eq!(usage.waste_percent, Decimal::ZERO);
    }

    #[test]
    fn menu_item_with_category_flattens() {
        let item = MenuItem {
            id: MenuItemId::new(),
            name: String::from("Philadelphia roll"),
            description: None,
            price: Decimal::new(79_900, 2),
            cost_price: Decimal::new(25_000, 2),
            image_url: None,
            margin: Decimal::new(54_900, 2),
            created_at: Utc::now(),
            category_id: None,
            published: true,
        };
        let with_category = MenuItemWithCategory {
            item,
            category_name: String::from("Rolls"),
        };
        let json = serde_json::to_value(&with_category).unwrap();
        // `item` fields sit at the top level next to category_name.
        assert_eq!(json["name"], "Philadelphia roll");
        assert_eq!(json["category_name"], "Rolls");
    }
}
