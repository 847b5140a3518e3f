//! Order Flow Server
//!
//! Restaurant order lifecycle with real-time notifications and sales
//! analytics. Waiters create orders, the kitchen advances their status, and
//! a dashboard aggregates completed sales.
//!
//! # Modules
//!
//! - `store`: Persistence interface and the JSON Lines store
//! - `lifecycle`: Order creation, status transitions and deletion
//! - `broadcast`: Best-effort fan-out of lifecycle events
//! - `analytics`: Windowed sales aggregation
//! - `menu`: Read-only menu catalog
//! - `api`: Axum REST and WebSocket endpoints
//! - `config`: Environment-based server configuration
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use order_flow::{EventBroadcaster, JsonlOrderStore, OrderLifecycle};
//! use order_flow::types::LineItem;
//!
//! # async fn run() -> order_flow::OrderResult<()> {
//! let store = Arc::new(JsonlOrderStore::open("orders.jsonl")?);
//! let broadcaster = Arc::new(EventBroadcaster::default());
//! let lifecycle = OrderLifecycle::new(store, broadcaster);
//!
//! let order = lifecycle
//!     .create_order(vec![LineItem::new("Beef Noodles", "main", 12.5, 2)], None)
//!     .await?;
//! lifecycle.update_status(order.id, "preparing").await?;
//! # Ok(())
//! # }
//! ```

pub mod analytics;
pub mod api;
pub mod broadcast;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod menu;
pub mod money;
pub mod store;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use analytics::{aggregate, SalesAnalytics};
pub use broadcast::{EventBroadcaster, OrderEvent, Publisher};
pub use config::ServerConfig;
pub use error::{BroadcastError, OrderError, OrderResult};
pub use lifecycle::{LifecycleConfig, OrderLifecycle, TransitionPolicy};
pub use menu::MenuCatalog;
pub use store::{JsonlOrderStore, OrderStore, StoreQuery};
pub use types::{AnalyticsResult, LineItem, Order, OrderStatus};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
