//! Order, line item and status types

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{OrderError, OrderResult};
use crate::money::{MAX_PRICE, MAX_QUANTITY};
use crate::utils::time::second_precision;

/// Category used when a line item arrives without one
pub const UNKNOWN_CATEGORY: &str = "unknown";

fn default_category() -> String {
    UNKNOWN_CATEGORY.to_string()
}

/// Order status vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Preparing,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Preparing,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = OrderError;

    fn from_str(s: &str) -> OrderResult<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(OrderError::validation("status is required"));
        }
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                let known: Vec<&str> = OrderStatus::ALL.iter().map(|st| st.as_str()).collect();
                OrderError::Validation(format!(
                    "unknown status '{}', expected one of {}",
                    s,
                    known.join(", ")
                ))
            })
    }
}

/// One menu item and quantity inside an order, price-snapshotted at creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(alias = "price")]
    pub unit_price: f64,
    pub quantity: u32,
}

impl LineItem {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        unit_price: f64,
        quantity: u32,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            unit_price,
            quantity,
        }
    }

    /// Check the fields a new order relies on. `index` is the zero-based
    /// position used in the error message.
    pub fn validate(&self, index: usize) -> OrderResult<()> {
        if self.name.trim().is_empty() {
            return Err(OrderError::Validation(format!(
                "item {}: name must not be empty",
                index
            )));
        }
        if !self.unit_price.is_finite() || self.unit_price <= 0.0 {
            return Err(OrderError::Validation(format!(
                "item {} ('{}'): unit_price must be a positive number, got {}",
                index, self.name, self.unit_price
            )));
        }
        if self.unit_price > MAX_PRICE {
            return Err(OrderError::Validation(format!(
                "item {} ('{}'): unit_price exceeds maximum allowed ({}), got {}",
                index, self.name, MAX_PRICE, self.unit_price
            )));
        }
        if self.quantity == 0 {
            return Err(OrderError::Validation(format!(
                "item {} ('{}'): quantity must be at least 1",
                index, self.name
            )));
        }
        if self.quantity > MAX_QUANTITY {
            return Err(OrderError::Validation(format!(
                "item {} ('{}'): quantity exceeds maximum allowed ({}), got {}",
                index, self.name, MAX_QUANTITY, self.quantity
            )));
        }
        Ok(())
    }
}

/// A persisted order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: u64,
    pub order_number: String,
    pub items: Vec<LineItem>,
    pub total_amount: f64,
    pub status: OrderStatus,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(with = "second_precision")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "second_precision")]
    pub updated_at: DateTime<Utc>,
}

/// An order that has been validated but not yet stored. The store assigns
/// the id; status starts as [`OrderStatus::Pending`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub order_number: String,
    pub items: Vec<LineItem>,
    pub total_amount: f64,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl NewOrder {
    /// Materialize the stored form under `id`
    pub fn into_order(self, id: u64) -> Order {
        Order {
            id,
            order_number: self.order_number,
            items: self.items,
            total_amount: self.total_amount,
            status: OrderStatus::Pending,
            notes: self.notes,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_status_round_trip_through_str() {
        for status in OrderStatus::ALL {
            assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_empty_status_is_rejected() {
        let err = "  ".parse::<OrderStatus>().unwrap_err();
        assert!(matches!(err, OrderError::Validation(_)));
    }

    #[test]
    fn test_unknown_status_lists_vocabulary() {
        let err = "served".parse::<OrderStatus>().unwrap_err();
        assert!(err.to_string().contains("pending, preparing, completed, cancelled"));
    }

    #[test]
    fn test_line_item_accepts_price_alias_and_default_category() {
        let item: LineItem =
            serde_json::from_str(r#"{"name":"Tea","price":3.5,"quantity":2}"#).unwrap();
        assert_eq!(item.unit_price, 3.5);
        assert_eq!(item.category, UNKNOWN_CATEGORY);
    }

    #[test]
    fn test_fractional_quantity_is_rejected_by_serde() {
        let parsed = serde_json::from_str::<LineItem>(
            r#"{"name":"Tea","category":"drink","unit_price":3.5,"quantity":1.5}"#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn test_line_item_validation() {
        assert!(LineItem::new("Tea", "drink", 3.5, 1).validate(0).is_ok());
        assert!(LineItem::new("", "drink", 3.5, 1).validate(0).is_err());
        assert!(LineItem::new("Tea", "drink", 0.0, 1).validate(0).is_err());
        assert!(LineItem::new("Tea", "drink", -1.0, 1).validate(0).is_err());
        assert!(LineItem::new("Tea", "drink", f64::NAN, 1).validate(0).is_err());
        assert!(LineItem::new("Tea", "drink", 3.5, 0).validate(0).is_err());
    }

    #[test]
    fn test_line_item_bounds() {
        assert!(LineItem::new("Banquet", "main", MAX_PRICE, MAX_QUANTITY).validate(0).is_ok());
        assert!(LineItem::new("Gold", "main", 5e28, 1).validate(0).is_err());
        assert!(LineItem::new("Tea", "drink", 3.5, MAX_QUANTITY + 1).validate(0).is_err());
    }

    #[test]
    fn test_order_serializes_second_precision_timestamps() {
        let created = Utc.with_ymd_and_hms(2025, 1, 10, 23, 0, 0).unwrap()
            + chrono::Duration::milliseconds(450);
        let order = NewOrder {
            order_number: "20250110230000-001".to_string(),
            items: vec![LineItem::new("Noodles", "main", 9.0, 1)],
            total_amount: 9.0,
            notes: None,
            created_at: created,
        }
        .into_order(1);

        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["created_at"], "2025-01-10T23:00:00Z");
        assert_eq!(json["updated_at"], "2025-01-10T23:00:00Z");
        assert_eq!(json["status"], "pending");
    }
}
