//! WebSocket module for real-time kitchen and waiter updates
//!
//! Clients connect to `/ws`, receive a `connected` frame with the current
//! sequence id, then every lifecycle event published after they joined.
//! Missed events are not replayed; a client that reconnects or lags should
//! reload `/api/orders`.

pub mod handler;
pub mod messages;

pub use handler::ws_handler;
