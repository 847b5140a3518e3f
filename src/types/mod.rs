//! Data types for the order server
//!
//! This module contains the core data structures shared by the store,
//! lifecycle, analytics and HTTP layers.

mod analytics;
mod menu;
mod order;

pub use analytics::{AnalyticsResult, AnalyticsWarning, ItemSales};
pub use menu::MenuItem;
pub use order::{LineItem, NewOrder, Order, OrderStatus, UNKNOWN_CATEGORY};
