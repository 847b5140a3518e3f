//! Sales analytics result types

use serde::{Deserialize, Serialize};

/// Per `(name, category)` rollup inside an aggregation window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSales {
    pub name: String,
    pub category: String,
    pub quantity: u64,
    pub total_price: f64,
    /// Start of the resolved window (`YYYY-MM-DD`), not the order's own date
    pub date: String,
}

/// A stored record that was skipped during aggregation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsWarning {
    /// Absent when the record was too damaged to read its id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<u64>,
    pub message: String,
}

impl AnalyticsWarning {
    pub fn for_order(order_id: u64, message: impl Into<String>) -> Self {
        Self {
            order_id: Some(order_id),
            message: message.into(),
        }
    }
}

/// Result of a sales aggregation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsResult {
    pub total_orders: usize,
    pub total_revenue: f64,
    pub items: Vec<ItemSales>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<AnalyticsWarning>,
}

impl AnalyticsResult {
    /// The answer for a window with no qualifying orders
    pub fn empty() -> Self {
        Self {
            total_orders: 0,
            total_revenue: 0.0,
            items: Vec::new(),
            warnings: Vec::new(),
        }
    }
}
