//! API module for HTTP and WebSocket endpoints
//!
//! This is the boundary where request bodies are validated into typed line
//! items before they reach the order core.

pub mod http;
pub mod rest;
pub mod state;
pub mod websocket;

pub use http::create_router;
pub use state::AppState;
