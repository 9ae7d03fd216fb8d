//! Type-safe identifier wrappers around [`Uuid`].
//!
//! Every entity in the backend has a strongly-typed ID to prevent
//! accidental mixing of identifiers at compile time. All IDs use UUID v7
//! (time-ordered) for efficient database indexing.
//!
//! The `new()` constructors generate IDs app-side so a store can bind the
//! ID it is about to insert and return the full record without a
//! round-trip for the generated key.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new identifier using UUID v7 (time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for a menu item (a sellable dish).
    MenuItemId
}

define_id! {
    /// Unique identifier for a menu category.
    CategoryId
}

define_id! {
    /// Unique identifier for a raw-ingredient inventory item.
    InventoryItemId
}

define_id! {
    /// Unique identifier for a dish cost calculation (the header record).
    CalculationId
}

define_id! {
    /// Unique identifier for one costed ingredient line of a calculation.
    IngredientLineId
}

define_id! {
    /// Unique identifier for a user's cart.
    CartId
}

define_id! {
    /// Unique identifier for a cart line item.
    CartItemId
}

define_id! {
    /// Unique identifier for a placed order.
    OrderId
}

define_id! {
    /// Unique identifier for an order line item.
    OrderItemId
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn ids_are_distinct_types_but_share_uuid_representation() {
        let raw = Uuid::now_v7();
        let menu: MenuItemId = raw.into();
        let calc: CalculationId = raw.into();
        assert_eq!(menu.into_inner(), calc.into_inner());
    }

    #[test]
    fn id_serializes_as_plain_uuid_string() {
        let id = MenuItemId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.into_inner()));
    }

    #[test]
    fn new_ids_are_unique() {
        assert_ne!(CalculationId::new(), CalculationId::new());
    }
}
