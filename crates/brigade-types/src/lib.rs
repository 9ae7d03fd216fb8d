//! Shared type definitions for the Brigade ordering backend.
//!
//! This crate is the single source of truth for all types used across the
//! Brigade workspace. Types defined here flow downstream to `TypeScript`
//! via `ts-rs` for the storefront and admin dashboard.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for all entity identifiers
//! - [`enums`] -- Enumeration types (order status)
//! - [`structs`] -- Core entity structs (menu, inventory, costing, orders)

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::OrderStatus;
pub use ids::{
    CalculationId, CartId, CartItemId, CategoryId, IngredientLineId, InventoryItemId, MenuItemId,
    OrderId, OrderItemId,
};
pub use structs::{
    Calculation, Cart, CartItem, Category, IngredientLine, IngredientUsage, InventoryItem,
    MenuItem, MenuItemWithCategory, Order, OrderItem,
};

#[cfg(test)]
mod tests {
    //! Integration tests for type exports and `TypeScript` binding generation.

    #[test]
    fn export_bindings() {
        // ts-rs generates TypeScript bindings when types with
        // #[ts(export)] are used. Importing them here triggers generation.
        // The actual files are written to the `bindings/` directory
        // relative to the crate root.
        use ts_rs::TS;

        // IDs
        let _ = crate::ids::MenuItemId::export_all();
        let _ = crate::ids::CategoryId::export_all();
        let _ = crate::ids::InventoryItemId::export_all();
        let _ = crate::ids::CalculationId::export_all();
        let _ = crate::ids::IngredientLineId::export_all();
        let _ = crate::ids::CartId::export_all();
        let _ = crate::ids::CartItemId::export_all();
        let _ = crate::ids::OrderId::export_all();
        let _ = crate::ids::OrderItemId::export_all();

        // Enums
        let _ = crate::enums::OrderStatus::export_all();

        // Structs
        let _ = crate::structs::MenuItem::export_all();
        let _ = crate::structs::MenuItemWithCategory::export_all();
        let _ = crate::structs::Category::export_all();
        let _ = crate::structs::InventoryItem::export_all();
        let _ = crate::structs::IngredientUsage::export_all();
        let _ = crate::structs::IngredientLine::export_all();
        let _ = crate::structs::Calculation::export_all();
        let _ = crate::structs::Cart::export_all();
        let _ = crate::structs::CartItem::export_all();
        let _ = crate::structs::Order::export_all();
        let _ = crate::structs::OrderItem::export_all();
    }
}
