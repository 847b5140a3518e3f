//! Read-only menu catalog
//!
//! Menu management lives outside this service; the catalog is loaded once
//! from a JSON array and only served to waiters.

use std::fs;
use std::path::Path;

use crate::error::OrderResult;
use crate::types::MenuItem;

#[derive(Debug, Clone, Default)]
pub struct MenuCatalog {
    items: Vec<MenuItem>,
}

impl MenuCatalog {
    pub fn new(items: Vec<MenuItem>) -> Self {
        Self { items }
    }

    /// Load from a JSON file. A missing file yields an empty catalog.
    pub fn load<P: AsRef<Path>>(path: P) -> OrderResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::warn!(path = %path.display(), "menu file not found, serving an empty menu");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let items: Vec<MenuItem> = serde_json::from_str(&content)?;
        tracing::info!(path = %path.display(), items = items.len(), "menu loaded");
        Ok(Self::new(items))
    }

    /// Available items ordered by category, then name
    pub fn available(&self) -> Vec<MenuItem> {
        let mut items: Vec<MenuItem> = self.items.iter().filter(|i| i.available).cloned().collect();
        items.sort_by(|a, b| a.category.cmp(&b.category).then_with(|| a.name.cmp(&b.name)));
        items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
