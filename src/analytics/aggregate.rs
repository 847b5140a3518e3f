//! Pure sales aggregation over an order snapshot

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::window::DateFilter;
use crate::error::OrderResult;
use crate::money;
use crate::types::{AnalyticsResult, AnalyticsWarning, ItemSales, Order, OrderStatus};

/// Category filter value that keeps every category
pub const ALL_CATEGORIES: &str = "all";

struct Group {
    name: String,
    category: String,
    quantity: u64,
    total: Decimal,
}

/// Aggregate completed sales inside the window named by `date_filter`.
///
/// Only `completed` orders created inside the window count. Line items are
/// grouped by `(name, category)` in first-seen order, visiting orders by
/// ascending id. Records with unusable numbers, or whose amounts would
/// overflow the running sums, are skipped and reported in `warnings`
/// instead of failing the call. Money is rounded half-up to cents after
/// summing.
///
/// Calling this twice with the same arguments yields identical results.
pub fn aggregate(
    orders: &[Order],
    date_filter: &str,
    category_filter: &str,
    now: DateTime<Utc>,
) -> OrderResult<AnalyticsResult> {
    let window = date_filter.parse::<DateFilter>()?.window(now)?;

    let mut qualifying: Vec<&Order> = orders
        .iter()
        .filter(|order| order.status == OrderStatus::Completed)
        .filter(|order| window.contains(&order.created_at))
        .collect();
    qualifying.sort_by_key(|order| order.id);

    let mut warnings = Vec::new();
    let mut total_orders = 0usize;
    let mut revenue = Decimal::ZERO;
    let mut groups: Vec<Group> = Vec::new();
    let mut index: HashMap<(String, String), usize> = HashMap::new();

    for order in qualifying {
        let Some(order_total) = money::to_decimal(order.total_amount) else {
            warnings.push(AnalyticsWarning::for_order(
                order.id,
                format!("total_amount {} is not a number, order skipped", order.total_amount),
            ));
            continue;
        };
        let Some(next_revenue) = revenue.checked_add(order_total) else {
            warnings.push(AnalyticsWarning::for_order(
                order.id,
                format!("total_amount {} overflows revenue, order skipped", order.total_amount),
            ));
            continue;
        };
        total_orders += 1;
        revenue = next_revenue;

        for item in &order.items {
            if category_filter != ALL_CATEGORIES && item.category != category_filter {
                continue;
            }

            let line = if item.unit_price > 0.0 && item.quantity > 0 {
                money::line_total(item.unit_price, item.quantity)
            } else {
                None
            };
            let Some(line) = line else {
                warnings.push(AnalyticsWarning::for_order(
                    order.id,
                    format!(
                        "item '{}' has unit_price {} and quantity {}, skipped",
                        item.name, item.unit_price, item.quantity
                    ),
                ));
                continue;
            };

            let key = (item.name.clone(), item.category.clone());
            let slot = *index.entry(key).or_insert_with(|| {
                groups.push(Group {
                    name: item.name.clone(),
                    category: item.category.clone(),
                    quantity: 0,
                    total: Decimal::ZERO,
                });
                groups.len() - 1
            });
            let group = &mut groups[slot];
            let Some(total) = group.total.checked_add(line) else {
                warnings.push(AnalyticsWarning::for_order(
                    order.id,
                    format!("item '{}' overflows its group total, skipped", item.name),
                ));
                continue;
            };
            group.quantity += u64::from(item.quantity);
            group.total = total;
        }
    }

    for warning in &warnings {
        tracing::warn!(
            order_id = ?warning.order_id,
            message = %warning.message,
            "analytics skipped a record"
        );
    }

    if total_orders == 0 {
        return Ok(AnalyticsResult {
            warnings,
            ..AnalyticsResult::empty()
        });
    }

    let date = window.label();
    let items = groups
        .into_iter()
        .map(|group| ItemSales {
            name: group.name,
            category: group.category,
            quantity: group.quantity,
            total_price: money::to_f64(money::round_money(group.total)),
            date: date.clone(),
        })
        .collect();

    Ok(AnalyticsResult {
        total_orders,
        total_revenue: money::to_f64(money::round_money(revenue)),
        items,
        warnings,
    })
}
