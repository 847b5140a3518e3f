//! Order Lifecycle Manager
//!
//! Validates requests, applies them to the [`OrderStore`] and then hands
//! the resulting event to the [`Publisher`]. The store is the source of
//! truth: a publish failure is logged and never undoes a stored change.
//!
//! The manager keeps no copies of orders between calls. Every store call is
//! bounded by [`LifecycleConfig::store_timeout`]; a call that times out may
//! still complete in the store afterwards.

mod order_number;
mod transitions;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use tokio::sync::OnceCell;

use crate::broadcast::{OrderEvent, Publisher};
use crate::error::{BroadcastError, OrderError, OrderResult};
use crate::money;
use crate::store::{OrderStore, StoreQuery};
use crate::types::{LineItem, NewOrder, Order, OrderStatus};
use crate::utils::time;

pub use order_number::OrderNumberGenerator;
pub use transitions::TransitionPolicy;

/// Status filter value that selects every order
pub const ALL_STATUSES: &str = "all";

/// Default bound on a single store call
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifecycleConfig {
    pub store_timeout: Duration,
    pub transition_policy: TransitionPolicy,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            store_timeout: DEFAULT_STORE_TIMEOUT,
            transition_policy: TransitionPolicy::default(),
        }
    }
}

/// Applies order state transitions
pub struct OrderLifecycle {
    store: Arc<dyn OrderStore>,
    publisher: Arc<dyn Publisher>,
    numbers: OrderNumberGenerator,
    numbers_seeded: OnceCell<()>,
    config: LifecycleConfig,
}

impl OrderLifecycle {
    pub fn new(store: Arc<dyn OrderStore>, publisher: Arc<dyn Publisher>) -> Self {
        Self::with_config(store, publisher, LifecycleConfig::default())
    }

    pub fn with_config(
        store: Arc<dyn OrderStore>,
        publisher: Arc<dyn Publisher>,
        config: LifecycleConfig,
    ) -> Self {
        Self {
            store,
            publisher,
            numbers: OrderNumberGenerator::new(),
            numbers_seeded: OnceCell::new(),
            config,
        }
    }

    pub fn config(&self) -> &LifecycleConfig {
        &self.config
    }

    /// Create a `pending` order from non-empty, valid line items.
    ///
    /// `total_amount` is computed here once and never recomputed.
    pub async fn create_order(
        &self,
        items: Vec<LineItem>,
        notes: Option<String>,
    ) -> OrderResult<Order> {
        if items.is_empty() {
            return Err(OrderError::validation("order must contain at least one item"));
        }

        let mut total = Decimal::ZERO;
        for (index, item) in items.iter().enumerate() {
            item.validate(index)?;
            total = money::line_total(item.unit_price, item.quantity)
                .and_then(|line| total.checked_add(line))
                .ok_or_else(|| {
                    OrderError::Validation(format!("item {}: order total is out of range", index))
                })?;
        }

        self.numbers_seeded.get_or_try_init(|| self.seed_numbers()).await?;

        let created_at = time::now();
        let new_order = NewOrder {
            order_number: self.numbers.next(&created_at),
            items,
            total_amount: money::to_f64(total),
            notes: notes.filter(|n| !n.trim().is_empty()),
            created_at,
        };

        let order = self.bounded(self.store.insert(new_order)).await?;
        tracing::info!(
            order_id = order.id,
            order_number = %order.order_number,
            total_amount = order.total_amount,
            "new order created"
        );

        self.notify(OrderEvent::NewOrder {
            order: order.clone(),
        });
        Ok(order)
    }

    /// Move an order to `new_status`
    pub async fn update_status(&self, order_id: u64, new_status: &str) -> OrderResult<Order> {
        let status: OrderStatus = new_status.parse()?;

        let mut order = self.bounded(self.store.get(order_id)).await?;
        self.config.transition_policy.check(order.status, status)?;

        let previous = order.status;
        order.status = status;
        order.updated_at = time::now().max(order.created_at);

        let order = self.bounded(self.store.update(order)).await?;
        tracing::info!(
            order_id = order.id,
            order_number = %order.order_number,
            from = %previous,
            to = %order.status,
            "order status updated"
        );

        self.notify(OrderEvent::OrderUpdated {
            order: order.clone(),
        });
        Ok(order)
    }

    /// Permanently remove an order
    pub async fn delete_order(&self, order_id: u64) -> OrderResult<()> {
        self.bounded(self.store.delete(order_id)).await?;
        tracing::info!(order_id, "order deleted");

        self.notify(OrderEvent::OrderDeleted { order_id });
        Ok(())
    }

    /// All orders (`"all"`) or those whose status equals `status_filter`.
    ///
    /// Not paginated: the full matching set is returned.
    pub async fn list_orders(&self, status_filter: &str) -> OrderResult<Vec<Order>> {
        let query = if status_filter == ALL_STATUSES {
            StoreQuery::All
        } else {
            match status_filter.parse::<OrderStatus>() {
                Ok(status) => StoreQuery::Status(status),
                Err(_) => {
                    tracing::debug!(
                        filter = status_filter,
                        "status filter matches no known status"
                    );
                    return Ok(Vec::new());
                }
            }
        };

        let orders = self.bounded(self.store.query(query)).await?;
        tracing::debug!(filter = status_filter, count = orders.len(), "orders listed");
        Ok(orders)
    }

    /// Continue numbering after the newest stored order so a restart within
    /// the same second cannot reissue a number
    async fn seed_numbers(&self) -> OrderResult<()> {
        let orders = self.bounded(self.store.query(StoreQuery::All)).await?;
        for order in &orders {
            self.numbers.observe(&order.order_number);
        }
        tracing::debug!(orders = orders.len(), "order numbering resumed");
        Ok(())
    }

    async fn bounded<T, F>(&self, call: F) -> OrderResult<T>
    where
        F: Future<Output = OrderResult<T>>,
    {
        match tokio::time::timeout(self.config.store_timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                tracing::error!(timeout = ?self.config.store_timeout, "store call timed out");
                Err(OrderError::Timeout(self.config.store_timeout))
            }
        }
    }

    fn notify(&self, event: OrderEvent) {
        let name = event.name();
        match self.publisher.publish(event) {
            Ok(()) => {}
            Err(BroadcastError::NoSubscribers) => {
                tracing::debug!(event = name, "no subscribers for event");
            }
            Err(e) => {
                tracing::warn!(event = name, error = %e, "failed to broadcast event");
            }
        }
    }
}
