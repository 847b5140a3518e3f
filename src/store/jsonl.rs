//! JSON Lines order store
//!
//! The table lives in memory behind a single lock. When a file path is
//! configured, every mutation is applied to a copy of the table, the copy
//! is written atomically, and only then swapped in. A failed write leaves
//! both memory and disk at the previous state.
//!
//! Locking and file writes run on the blocking pool, so callers can bound
//! a store call with a timeout without stalling the async runtime.
//!
//! File layout: one optional `{"next_id":N}` line followed by one order per
//! line. The id counter is persisted so ids are never reused after the
//! newest order is deleted. Lines that fail to decode are written back
//! verbatim after the orders on every rewrite.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use super::{OrderStore, StoreQuery, UnreadableRecord};
use crate::error::{OrderError, OrderResult};
use crate::types::{NewOrder, Order};
use crate::utils::atomic::{atomic_write_lines, cleanup_temp_file};

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct TableMeta {
    next_id: u64,
}

#[derive(Debug, Clone)]
struct Table {
    orders: BTreeMap<u64, Order>,
    next_id: u64,
}

impl Default for Table {
    fn default() -> Self {
        Self {
            orders: BTreeMap::new(),
            next_id: 1,
        }
    }
}

/// An undecodable line and what was learned about it
#[derive(Debug, Clone)]
struct Unreadable {
    record: UnreadableRecord,
    raw: String,
}

struct Shared {
    path: Option<PathBuf>,
    table: Mutex<Table>,
    unreadable: Vec<Unreadable>,
}

/// Order store backed by an in-memory table and an optional JSONL file
pub struct JsonlOrderStore {
    shared: Arc<Shared>,
}

impl JsonlOrderStore {
    /// A store that never touches the filesystem
    pub fn in_memory() -> Self {
        Self::from_parts(None, Table::default(), Vec::new())
    }

    /// Open (or create on first write) the store at `path`.
    ///
    /// Lines that cannot be decoded are skipped, logged and reported through
    /// [`OrderStore::unreadable_records`]. Their ids stay reserved.
    pub fn open<P: AsRef<Path>>(path: P) -> OrderResult<Self> {
        let path = path.as_ref().to_path_buf();
        if cleanup_temp_file(&path)? {
            tracing::warn!(
                path = %path.display(),
                "removed leftover temp file from interrupted write"
            );
        }

        let (table, unreadable) = load_table(&path)?;
        for skipped in &unreadable {
            tracing::warn!(
                path = %path.display(),
                line = skipped.record.line,
                order_id = ?skipped.record.order_id,
                error = %skipped.record.error,
                "skipped unreadable order record"
            );
        }
        tracing::info!(
            path = %path.display(),
            orders = table.orders.len(),
            unreadable = unreadable.len(),
            next_id = table.next_id,
            "order store loaded"
        );

        Ok(Self::from_parts(Some(path), table, unreadable))
    }

    fn from_parts(path: Option<PathBuf>, table: Table, unreadable: Vec<Unreadable>) -> Self {
        Self {
            shared: Arc::new(Shared {
                path,
                table: Mutex::new(table),
                unreadable,
            }),
        }
    }

    /// Backing file, if any
    pub fn file_path(&self) -> Option<&Path> {
        self.shared.path.as_deref()
    }

    /// Run `f` against the store on the blocking pool
    async fn run<T, F>(&self, f: F) -> OrderResult<T>
    where
        F: FnOnce(&Shared) -> OrderResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let shared = self.shared.clone();
        tokio::task::spawn_blocking(move || f(&shared))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "store task failed");
                OrderError::Persistence(format!("store task failed: {}", e))
            })?
    }
}

fn load_table(path: &Path) -> OrderResult<(Table, Vec<Unreadable>)> {
    let mut table = Table::default();
    let mut unreadable = Vec::new();
    if !path.exists() {
        return Ok((table, unreadable));
    }

    let content = fs::read_to_string(path)?;
    for (index, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Ok(meta) = serde_json::from_str::<TableMeta>(line) {
            table.next_id = table.next_id.max(meta.next_id);
            continue;
        }

        match serde_json::from_str::<Order>(line) {
            Ok(order) => {
                table.next_id = table.next_id.max(order.id + 1);
                table.orders.insert(order.id, order);
            }
            Err(e) => {
                let order_id = serde_json::from_str::<serde_json::Value>(line)
                    .ok()
                    .and_then(|value| value.get("id").and_then(serde_json::Value::as_u64));
                if let Some(id) = order_id {
                    table.next_id = table.next_id.max(id + 1);
                }
                unreadable.push(Unreadable {
                    record: UnreadableRecord {
                        line: index + 1,
                        order_id,
                        error: e.to_string(),
                    },
                    raw: line.to_string(),
                });
            }
        }
    }

    Ok((table, unreadable))
}

impl Shared {
    fn persist(&self, table: &Table) -> OrderResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let mut lines = Vec::with_capacity(table.orders.len() + self.unreadable.len() + 1);
        lines.push(serde_json::to_string(&TableMeta {
            next_id: table.next_id,
        })?);
        for order in table.orders.values() {
            lines.push(serde_json::to_string(order)?);
        }
        lines.extend(self.unreadable.iter().map(|skipped| skipped.raw.clone()));

        atomic_write_lines(path, lines).map_err(|e| {
            tracing::error!(path = %path.display(), error = %e, "failed to persist order table");
            OrderError::from(e)
        })
    }

    /// Apply `f` to a copy of the table, persist it, then commit
    fn commit<T, F>(&self, f: F) -> OrderResult<T>
    where
        F: FnOnce(&mut Table) -> OrderResult<T>,
    {
        let mut table = self.table.lock();
        let mut next = table.clone();
        let out = f(&mut next)?;
        self.persist(&next)?;
        *table = next;
        Ok(out)
    }
}

#[async_trait]
impl OrderStore for JsonlOrderStore {
    async fn insert(&self, order: NewOrder) -> OrderResult<Order> {
        self.run(move |shared| {
            shared.commit(|table| {
                if table
                    .orders
                    .values()
                    .any(|existing| existing.order_number == order.order_number)
                {
                    return Err(OrderError::Persistence(format!(
                        "order number {} already exists",
                        order.order_number
                    )));
                }

                let id = table.next_id;
                table.next_id += 1;
                let stored = order.into_order(id);
                table.orders.insert(id, stored.clone());
                Ok(stored)
            })
        })
        .await
    }

    async fn get(&self, id: u64) -> OrderResult<Order> {
        self.run(move |shared| {
            shared
                .table
                .lock()
                .orders
                .get(&id)
                .cloned()
                .ok_or(OrderError::NotFound(id))
        })
        .await
    }

    async fn update(&self, order: Order) -> OrderResult<Order> {
        self.run(move |shared| {
            shared.commit(|table| {
                let stored = table
                    .orders
                    .get_mut(&order.id)
                    .ok_or(OrderError::NotFound(order.id))?;
                stored.status = order.status;
                stored.updated_at = order.updated_at;
                Ok(stored.clone())
            })
        })
        .await
    }

    async fn delete(&self, id: u64) -> OrderResult<()> {
        self.run(move |shared| {
            shared.commit(|table| {
                table
                    .orders
                    .remove(&id)
                    .map(|_| ())
                    .ok_or(OrderError::NotFound(id))
            })
        })
        .await
    }

    async fn query(&self, query: StoreQuery) -> OrderResult<Vec<Order>> {
        self.run(move |shared| {
            Ok(shared
                .table
                .lock()
                .orders
                .values()
                .filter(|order| query.matches(order))
                .cloned()
                .collect())
        })
        .await
    }

    fn unreadable_records(&self) -> Vec<UnreadableRecord> {
        self.shared
            .unreadable
            .iter()
            .map(|skipped| skipped.record.clone())
            .collect()
    }
}
