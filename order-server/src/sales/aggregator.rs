//! Sales Aggregator
//!
//! 1. 校验 `SalesQuery` → 可选月份区间
//! 2. 按时间窗口取订单 (无区间 = 全部)
//! 3. 展开为行项目
//! 4. 每个菜单 id 只解析一次，`quantity × price`
//! 5. 求和，保留 2 位小数
//!
//! 菜单项找不到的行跳过 (warn)，不会让整份报表失败。
//! Uses rust_decimal for precise calculations, returns f64.

use std::collections::HashMap;

use chrono_tz::Tz;
use rust_decimal::prelude::*;
use shared::models::{MenuItem, SalesQuery, SalesReport};

use super::{MonthRange, SalesError, SalesStore};

/// Rounding for monetary values (2 decimal places, midpoint away from zero)
const DECIMAL_PLACES: u32 = 2;

/// Convert f64 to Decimal for calculation
///
/// Prices are validated finite at the API boundary; anything else counts as zero.
#[inline]
fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in sales calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Convert Decimal back to f64, rounded to 2 decimal places
#[inline]
fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// `total + price × quantity`, `None` on Decimal overflow
#[inline]
fn add_line(total: Decimal, price: Decimal, quantity: i32) -> Option<Decimal> {
    price
        .checked_mul(Decimal::from(quantity))
        .and_then(|amount| total.checked_add(amount))
}

/// Computes total revenue over a [`SalesStore`]
///
/// Stateless apart from the store and the business timezone; every call
/// reads the store afresh.
#[derive(Debug, Clone)]
pub struct SalesAggregator<S> {
    store: S,
    timezone: Tz,
}

impl<S: SalesStore> SalesAggregator<S> {
    pub fn new(store: S, timezone: Tz) -> Self {
        Self { store, timezone }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Total of `quantity × price` over all line items of the qualifying orders
    pub async fn compute_total_sales(&self, query: &SalesQuery) -> Result<SalesReport, SalesError> {
        let range = MonthRange::from_query(query)?;
        let window = range.map(|r| r.window(self.timezone));

        if let Some(w) = window.filter(|w| w.is_empty()) {
            tracing::debug!(
                start = w.start_millis,
                end = w.end_millis,
                "Sales range start is after end, nothing to sum"
            );
            return Ok(SalesReport { total: 0.0 });
        }

        let orders = self.store.find_orders(window).await?;

        // Weak references: resolve each distinct menu id once per call
        let mut prices: HashMap<String, Option<Decimal>> = HashMap::new();
        let mut total = Decimal::ZERO;
        let mut rows = 0usize;
        let mut skipped = 0usize;

        for order in &orders {
            for line in &order.items {
                if line.quantity < 1 {
                    tracing::warn!(
                        order_id = %order.id,
                        item = %line.item,
                        quantity = line.quantity,
                        "Skipping line item with non-positive quantity"
                    );
                    skipped += 1;
                    continue;
                }

                let price = match prices.get(&line.item) {
                    Some(price) => *price,
                    None => {
                        let resolved = self
                            .store
                            .resolve_menu_item(&line.item)
                            .await?
                            .map(|item: MenuItem| to_decimal(item.price));
                        prices.insert(line.item.clone(), resolved);
                        resolved
                    }
                };

                let Some(price) = price else {
                    tracing::warn!(
                        order_id = %order.id,
                        item = %line.item,
                        "Skipping line item referencing a missing menu item"
                    );
                    skipped += 1;
                    continue;
                };

                let Some(next) = add_line(total, price, line.quantity) else {
                    tracing::warn!(
                        order_id = %order.id,
                        item = %line.item,
                        quantity = line.quantity,
                        price = %price,
                        "Skipping line item whose amount overflows the sales total"
                    );
                    skipped += 1;
                    continue;
                };
                total = next;
                rows += 1;
            }
        }

        let total = to_f64(total);
        tracing::debug!(
            orders = orders.len(),
            rows,
            skipped,
            total,
            "Sales report computed"
        );

        Ok(SalesReport { total })
    }
}
