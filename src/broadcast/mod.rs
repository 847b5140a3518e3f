//! Notification Broadcaster
//!
//! Best-effort fan-out of lifecycle events. Nothing is persisted or
//! replayed: an event reaches exactly the subscribers connected when it
//! was published.
//!
//! The lifecycle manager only sees the [`Publisher`] trait, so the
//! transport (WebSocket today) stays outside the order core.

pub mod events;

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::broadcast;

use crate::error::BroadcastError;

pub use events::{OrderEvent, WsMessage};

/// Default channel capacity; slower subscribers lag and must refresh
pub const DEFAULT_CAPACITY: usize = 1024;

/// Publish side of the notification interface.
///
/// Implementations must not block the caller.
pub trait Publisher: Send + Sync {
    fn publish(&self, event: OrderEvent) -> Result<(), BroadcastError>;
}

/// Broadcast-channel publisher with sequence numbering
pub struct EventBroadcaster {
    tx: broadcast::Sender<WsMessage>,
    sequence_counter: AtomicU64,
}

impl EventBroadcaster {
    /// Create a new broadcaster with the given capacity
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self {
            tx,
            sequence_counter: AtomicU64::new(0),
        }
    }

    /// Get the current sequence ID
    pub fn current_sequence_id(&self) -> u64 {
        self.sequence_counter.load(Ordering::SeqCst)
    }

    /// Subscribe to events published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<WsMessage> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBroadcaster {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl Publisher for EventBroadcaster {
    fn publish(&self, event: OrderEvent) -> Result<(), BroadcastError> {
        let seq = self.sequence_counter.fetch_add(1, Ordering::SeqCst);
        let name = event.name();
        let msg = WsMessage {
            event,
            sequence_id: seq,
            timestamp: chrono::Utc::now().timestamp(),
        };

        // send only fails when nobody is subscribed
        match self.tx.send(msg) {
            Ok(receivers) => {
                tracing::debug!(event = name, sequence_id = seq, receivers, "event broadcast");
                Ok(())
            }
            Err(_) => Err(BroadcastError::NoSubscribers),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_without_subscribers_reports_it() {
        let broadcaster = EventBroadcaster::new(16);
        let result = broadcaster.publish(OrderEvent::OrderDeleted { order_id: 1 });

        assert_eq!(result, Err(BroadcastError::NoSubscribers));
        assert_eq!(broadcaster.current_sequence_id(), 1);
    }

    #[tokio::test]
    async fn test_subscribers_receive_events_in_sequence() {
        let broadcaster = EventBroadcaster::new(16);
        let mut rx = broadcaster.subscribe();

        broadcaster
            .publish(OrderEvent::OrderDeleted { order_id: 1 })
            .unwrap();
        broadcaster
            .publish(OrderEvent::OrderDeleted { order_id: 2 })
            .unwrap();

        let first = rx.recv().await.unwrap();
        let second = rx.recv().await.unwrap();
        assert_eq!(first.sequence_id, 0);
        assert_eq!(second.sequence_id, 1);
        assert_eq!(second.event.order_id(), 2);
    }

    #[tokio::test]
    async fn test_late_subscribers_get_no_backlog() {
        let broadcaster = EventBroadcaster::new(16);
        let _early = broadcaster.subscribe();
        broadcaster
            .publish(OrderEvent::OrderDeleted { order_id: 1 })
            .unwrap();

        let mut late = broadcaster.subscribe();
        assert!(matches!(
            late.try_recv(),
            Err(broadcast::error::TryRecvError::Empty)
        ));
    }
}
