//! Utility functions and helpers
//!
//! Timestamp formatting and atomic file writes.

pub mod atomic;
pub mod time;

pub use time::{format_timestamp, now};
