//! Menu item type (read-only to the order core)

use serde::{Deserialize, Serialize};

fn default_available() -> bool {
    true
}

/// Item on the restaurant menu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: u64,
    pub name: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: String,
    #[serde(default = "default_available")]
    pub available: bool,
}
