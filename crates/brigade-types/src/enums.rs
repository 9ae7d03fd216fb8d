//! Enumeration types shared across the backend.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Lifecycle status of a placed order.
///
/// Orders are created as [`OrderStatus::Pending`]. The kitchen/delivery
/// flow advances them; a cancelled order keeps its items for history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum OrderStatus {
    /// Order placed, not yet accepted by the kitchen.
    Pending,
    /// Order accepted and being prepared.
    InProgress,
    /// Order handed over to the customer.
    Completed,
    /// Order cancelled before completion.
    Cancelled,
}

impl OrderStatus {
    /// Database string representation (stored in a `VARCHAR` column).
    pub const fn as_db_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parse the database string representation back into the enum.
    ///
    /// Unknown strings map to [`OrderStatus::Pending`] so a row written by
    /// a newer schema revision still loads.
    #[must_use]
    pub fn from_db_str(s: &str) -> Self {
        match s {
            "in_progress" => Self::InProgress,
            "completed" => Self::Completed,
            "cancelled" => Self::Cancelled,
            _ => Self::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_round_trip() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::InProgress,
            OrderStatus::Completed,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(OrderStatus::from_db_str(status.as_db_str()), status);
        }
    }

    #[test]
    fn unknown_db_string_defaults_to_pending() {
        assert_eq!(OrderStatus::from_db_str("refunded"), OrderStatus::Pending);
    }
}
