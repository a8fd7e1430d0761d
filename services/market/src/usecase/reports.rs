use std::collections::HashMap;

use anyhow::Context as _;
use chrono::{Datelike, Months, Utc};
use serde::Serialize;
use serde_json::Value;

use mercato_store::{DocumentStore, decode};

use crate::domain::collections;
use crate::domain::types::Order;
use crate::error::MarketServiceError;

async fn load_orders<S: DocumentStore>(store: &S) -> Result<Vec<Order>, MarketServiceError> {
    let docs = store.list(collections::ORDERS).await.context("list orders")?;
    let mut orders = Vec::with_capacity(docs.len());
    for doc in docs {
        let id = doc
            .get("id")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned();
        orders.push(decode(collections::ORDERS, &id, doc).context("decode order")?);
    }
    Ok(orders)
}

fn order_revenue(order: &Order) -> f64 {
    order
        .items
        .iter()
        .map(|line| line.price.amount() * line.quantity as f64)
        .sum()
}

// ── SalesSummary ─────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesSummary {
    pub total_sales: f64,
    pub order_count: u64,
    pub product_count: u64,
    pub user_count: u64,
}

pub struct SalesSummaryUseCase<S: DocumentStore> {
    pub store: S,
}

impl<S: DocumentStore> SalesSummaryUseCase<S> {
    /// Revenue is recomputed from the order line snapshots on every call;
    /// user and product totals come from count aggregations.
    pub async fn execute(&self) -> Result<SalesSummary, MarketServiceError> {
        let orders = load_orders(&self.store).await?;
        let total_sales = orders.iter().map(order_revenue).sum();
        let product_count = self
            .store
            .count(collections::PRODUCTS)
            .await
            .context("count products")?;
        let user_count = self
            .store
            .count(collections::USERS)
            .await
            .context("count users")?;
        Ok(SalesSummary {
            total_sales,
            order_count: orders.len() as u64,
            product_count,
            user_count,
        })
    }
}

// ── MonthlyPerformance ───────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct MonthlyBucket {
    pub year: i32,
    /// Calendar month, 1 through 12.
    pub month: u32,
    pub total: f64,
}

pub struct MonthlyPerformanceUseCase<S: DocumentStore> {
    pub store: S,
}

impl<S: DocumentStore> MonthlyPerformanceUseCase<S> {
    /// Twelve calendar-month buckets ending at the current month, oldest
    /// first. Months without orders stay at zero; orders older than the
    /// window are left out.
    pub async fn execute(&self) -> Result<Vec<MonthlyBucket>, MarketServiceError> {
        let now = Utc::now();
        let mut buckets: Vec<MonthlyBucket> = (0..12u32)
            .rev()
            .map(|back| {
                let month = now.checked_sub_months(Months::new(back)).unwrap_or(now);
                MonthlyBucket {
                    year: month.year(),
                    month: month.month(),
                    total: 0.0,
                }
            })
            .collect();

        for order in load_orders(&self.store).await? {
            let (year, month) = (order.created_at.year(), order.created_at.month());
            if let Some(bucket) = buckets
                .iter_mut()
                .find(|b| b.year == year && b.month == month)
            {
                bucket.total += order_revenue(&order);
            }
        }
        Ok(buckets)
    }
}

// ── TopSellers ───────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct SellerRank {
    pub seller: String,
    /// Order lines carrying this seller's name, not units sold.
    pub items: u64,
}

pub struct TopSellersUseCase<S: DocumentStore> {
    pub store: S,
}

impl<S: DocumentStore> TopSellersUseCase<S> {
    /// Ranks sellers by how many order lines carry their name. A line
    /// counts once whatever its quantity, matching how product sales
    /// counters are kept. Ties break alphabetically.
    pub async fn execute(&self) -> Result<Vec<SellerRank>, MarketServiceError> {
        let mut counts: HashMap<String, u64> = HashMap::new();
        for order in load_orders(&self.store).await? {
            for line in &order.items {
                let Some(seller) = line.seller.as_deref() else {
                    continue;
                };
                *counts.entry(seller.to_owned()).or_default() += 1;
            }
        }
        let mut ranked: Vec<SellerRank> = counts
            .into_iter()
            .map(|(seller, items)| SellerRank { seller, items })
            .collect();
        ranked.sort_by(|a, b| b.items.cmp(&a.items).then_with(|| a.seller.cmp(&b.seller)));
        ranked.truncate(5);
        Ok(ranked)
    }
}

// ── LatestOrders ─────────────────────────────────────────────────────────────

pub struct LatestOrdersUseCase<S: DocumentStore> {
    pub store: S,
}

impl<S: DocumentStore> LatestOrdersUseCase<S> {
    pub async fn execute(&self, limit: usize) -> Result<Vec<Order>, MarketServiceError> {
        let mut orders = load_orders(&self.store).await?;
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        orders.truncate(limit);
        Ok(orders)
    }
}
