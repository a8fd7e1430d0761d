use anyhow::Context as _;
use chrono::Utc;
use futures::future::join_all;
use serde_json::{Map, Value};
use uuid::Uuid;

use mercato_store::{DocumentStore, StoreError, Update, decode};

use crate::domain::collections;
use crate::domain::types::{Cart, CartLine, ORDER_STATUS_PENDING, Order, RESERVED_ORDER_KEYS};
use crate::error::MarketServiceError;

// ── PlaceOrder ───────────────────────────────────────────────────────────────

pub struct PlaceOrderUseCase<S: DocumentStore> {
    pub store: S,
}

impl<S: DocumentStore> PlaceOrderUseCase<S> {
    /// Converts the caller's cart into an order and settles inventory.
    ///
    /// Steps run in order: load cart, build the order from a verbatim
    /// snapshot of its lines, persist the order, adjust per-product
    /// counters, clear the cart. There is no compensating rollback: once
    /// the order document is written it survives any later step failing,
    /// and counter drift is reconciled out of band.
    pub async fn execute(
        &self,
        user_id: &str,
        mut details: Map<String, Value>,
    ) -> Result<Order, MarketServiceError> {
        let cart: Cart = match self
            .store
            .get(collections::CARTS, user_id)
            .await
            .context("load cart")?
        {
            Some(doc) => decode(collections::CARTS, user_id, doc).context("decode cart")?,
            None => Cart::default(),
        };
        if cart.items.is_empty() {
            return Err(MarketServiceError::CartEmpty);
        }

        for key in RESERVED_ORDER_KEYS {
            details.remove(key);
        }
        let order = Order {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_owned(),
            items: cart.items,
            status: ORDER_STATUS_PENDING.to_owned(),
            created_at: Utc::now(),
            details,
        };
        self.store
            .set_as(collections::ORDERS, &order.id, &order)
            .await
            .context("persist order")?;

        // Per-line settlement, issued concurrently. A failed line is logged
        // and never aborts the flow: the order stands regardless.
        join_all(order.items.iter().map(|line| self.settle_line(line))).await;

        // Clear the cart only after every line update has been issued. The
        // cart document itself is retained.
        self.store
            .set_as(collections::CARTS, user_id, &Cart::default())
            .await
            .context("clear cart")?;

        Ok(order)
    }

    async fn settle_line(&self, line: &CartLine) {
        if let Err(e) = self.adjust_counters(line).await {
            tracing::warn!(
                product_id = %line.product_id,
                error = %e,
                "order line failed to settle"
            );
        }
    }

    /// Sales +1 and, when the product tracks inventory, stock −1. The
    /// adjustment is per line, not per unit quantity, and uses the store's
    /// atomic increments so concurrent orders never lose updates.
    async fn adjust_counters(&self, line: &CartLine) -> Result<(), StoreError> {
        let Some(product) = self
            .store
            .get(collections::PRODUCTS, &line.product_id)
            .await?
        else {
            // Product deleted since it was added to the cart; the order
            // snapshot stands on its own.
            return Ok(());
        };
        let mut update = Update::new().increment("sales", 1);
        if product.get("stock").is_some_and(Value::is_number) {
            update = update.increment("stock", -1);
        }
        self.store
            .update(collections::PRODUCTS, &line.product_id, update)
            .await
    }
}

// ── GetOrder ─────────────────────────────────────────────────────────────────

pub struct GetOrderUseCase<S: DocumentStore> {
    pub store: S,
}

impl<S: DocumentStore> GetOrderUseCase<S> {
    pub async fn execute(&self, order_id: &str) -> Result<Order, MarketServiceError> {
        self.store
            .get_as(collections::ORDERS, order_id)
            .await
            .context("load order")?
            .ok_or(MarketServiceError::OrderNotFound)
    }
}

// ── ListOrders ───────────────────────────────────────────────────────────────

pub struct ListOrdersUseCase<S: DocumentStore> {
    pub store: S,
}

impl<S: DocumentStore> ListOrdersUseCase<S> {
    pub async fn execute(&self, user_id: &str) -> Result<Vec<Order>, MarketServiceError> {
        let docs = self
            .store
            .query_eq(
                collections::ORDERS,
                "userId",
                &Value::String(user_id.to_owned()),
            )
            .await
            .context("list orders")?;

        let mut orders: Vec<Order> = Vec::with_capacity(docs.len());
        for doc in docs {
            let id = doc
                .get("id")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_owned();
            orders.push(decode(collections::ORDERS, &id, doc).context("decode order")?);
        }
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }
}
