//! Order Store - persistence interface consumed by the order core
//!
//! The lifecycle manager and the analytics service only see the
//! [`OrderStore`] trait; [`JsonlOrderStore`] is the implementation the
//! server ships with.

mod jsonl;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::OrderResult;
use crate::types::{NewOrder, Order, OrderStatus};

pub use jsonl::JsonlOrderStore;

/// Selection passed to [`OrderStore::query`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreQuery {
    All,
    Status(OrderStatus),
    /// Orders with `start <= created_at < end`
    CreatedBetween {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

impl StoreQuery {
    pub fn matches(&self, order: &Order) -> bool {
        match self {
            StoreQuery::All => true,
            StoreQuery::Status(status) => order.status == *status,
            StoreQuery::CreatedBetween { start, end } => {
                order.created_at >= *start && order.created_at < *end
            }
        }
    }
}

/// A stored record that could not be decoded when the store was opened
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnreadableRecord {
    /// 1-based line in the backing file at load time
    pub line: usize,
    /// The record's `id`, when it could still be read
    pub order_id: Option<u64>,
    pub error: String,
}

/// Durable keyed storage of orders.
///
/// Each call is atomic: it either applies completely or leaves the store
/// unchanged. Implementations own id assignment and order-number
/// uniqueness.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Store a new order under a fresh, never reused id
    async fn insert(&self, order: NewOrder) -> OrderResult<Order>;

    async fn get(&self, id: u64) -> OrderResult<Order>;

    /// Write back a mutated order. Only `status` and `updated_at` are taken
    /// from `order`; every other field keeps its stored value.
    async fn update(&self, order: Order) -> OrderResult<Order>;

    async fn delete(&self, id: u64) -> OrderResult<()>;

    /// Matching orders in ascending id order
    async fn query(&self, query: StoreQuery) -> OrderResult<Vec<Order>>;

    /// Records skipped at load. They are kept in storage untouched.
    fn unreadable_records(&self) -> Vec<UnreadableRecord> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LineItem;
    use chrono::TimeZone;

    fn order_at(status: OrderStatus, hour: u32) -> Order {
        let mut order = NewOrder {
            order_number: "20250110000000-001".to_string(),
            items: vec![LineItem::new("Rice", "main", 4.0, 1)],
            total_amount: 4.0,
            notes: None,
            created_at: Utc.with_ymd_and_hms(2025, 1, 10, hour, 0, 0).unwrap(),
        }
        .into_order(1);
        order.status = status;
        order
    }

    #[test]
    fn test_status_query_is_exact() {
        let order = order_at(OrderStatus::Preparing, 9);
        assert!(StoreQuery::Status(OrderStatus::Preparing).matches(&order));
        assert!(!StoreQuery::Status(OrderStatus::Pending).matches(&order));
        assert!(StoreQuery::All.matches(&order));
    }

    #[test]
    fn test_created_between_is_half_open() {
        let start = Utc.with_ymd_and_hms(2025, 1, 10, 9, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 1, 10, 10, 0, 0).unwrap();
        let query = StoreQuery::CreatedBetween { start, end };

        assert!(query.matches(&order_at(OrderStatus::Completed, 9)));
        assert!(!query.matches(&order_at(OrderStatus::Completed, 10)));
        assert!(!query.matches(&order_at(OrderStatus::Completed, 8)));
    }
}
