//! Analytics Aggregator
//!
//! [`aggregate`] is a pure function over an order snapshot. The
//! [`SalesAnalytics`] service reads that snapshot from the store for the
//! requested window and runs the aggregation on demand. Records the store
//! could not decode are reported as warnings on every result, since their
//! dates are unknown.

mod aggregate;
mod window;

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::error::OrderResult;
use crate::store::{OrderStore, StoreQuery};
use crate::types::{AnalyticsResult, AnalyticsWarning};
use crate::utils::time;

pub use aggregate::{aggregate, ALL_CATEGORIES};
pub use window::{DateFilter, DateWindow};

/// Reads completed sales from the store
pub struct SalesAnalytics {
    store: Arc<dyn OrderStore>,
}

impl SalesAnalytics {
    pub fn new(store: Arc<dyn OrderStore>) -> Self {
        Self { store }
    }

    /// Sales for `date_filter`/`category_filter` relative to the current time
    pub async fn sales(
        &self,
        date_filter: &str,
        category_filter: &str,
    ) -> OrderResult<AnalyticsResult> {
        self.sales_at(date_filter, category_filter, time::now()).await
    }

    /// Sales relative to an explicit reference instant
    pub async fn sales_at(
        &self,
        date_filter: &str,
        category_filter: &str,
        now: DateTime<Utc>,
    ) -> OrderResult<AnalyticsResult> {
        let window = date_filter.parse::<DateFilter>()?.window(now)?;
        let snapshot = self
            .store
            .query(StoreQuery::CreatedBetween {
                start: window.start,
                end: window.end,
            })
            .await?;

        let mut result = aggregate(&snapshot, date_filter, category_filter, now)?;
        for record in self.store.unreadable_records() {
            result.warnings.push(AnalyticsWarning {
                order_id: record.order_id,
                message: format!(
                    "stored record at line {} is unreadable: {}",
                    record.line, record.error
                ),
            });
        }
        tracing::debug!(
            date = date_filter,
            category = category_filter,
            orders = result.total_orders,
            revenue = result.total_revenue,
            warnings = result.warnings.len(),
            "analytics computed"
        );
        Ok(result)
    }
}
