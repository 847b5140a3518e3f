//! Shared application state for HTTP and WebSocket handlers

use std::sync::Arc;

use crate::analytics::SalesAnalytics;
use crate::broadcast::EventBroadcaster;
use crate::lifecycle::{LifecycleConfig, OrderLifecycle};
use crate::menu::MenuCatalog;
use crate::store::OrderStore;

pub struct AppState {
    pub lifecycle: OrderLifecycle,
    pub analytics: SalesAnalytics,
    pub broadcaster: Arc<EventBroadcaster>,
    pub menu: MenuCatalog,
}

impl AppState {
    /// Wire the core components around one store and one broadcaster
    pub fn new(
        store: Arc<dyn OrderStore>,
        broadcaster: Arc<EventBroadcaster>,
        menu: MenuCatalog,
        config: LifecycleConfig,
    ) -> Self {
        Self {
            lifecycle: OrderLifecycle::with_config(store.clone(), broadcaster.clone(), config),
            analytics: SalesAnalytics::new(store),
            broadcaster,
            menu,
        }
    }
}
