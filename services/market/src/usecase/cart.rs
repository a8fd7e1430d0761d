use anyhow::Context as _;
use serde_json::Value;

use mercato_store::{DocumentStore, decode};

use crate::domain::collections;
use crate::domain::types::{Cart, CartLine, Price, Product};
use crate::error::MarketServiceError;

// ── AddToCart ────────────────────────────────────────────────────────────────

pub struct AddToCartInput {
    pub product_id: String,
    pub name: Option<String>,
    pub price: Option<Price>,
    pub image: Option<String>,
    pub seller: Option<String>,
}

pub struct AddToCartUseCase<S: DocumentStore> {
    pub store: S,
}

impl<S: DocumentStore> AddToCartUseCase<S> {
    pub async fn execute(
        &self,
        user_id: &str,
        input: AddToCartInput,
    ) -> Result<Cart, MarketServiceError> {
        let product: Product = self
            .store
            .get_as(collections::PRODUCTS, &input.product_id)
            .await
            .context("load product")?
            .ok_or(MarketServiceError::ProductNotFound)?;

        // Snapshot the line from the request, falling back to the product
        // document for fields the client left out.
        let line = CartLine {
            product_id: input.product_id,
            name: input.name.unwrap_or(product.name),
            price: input.price.unwrap_or(product.price),
            image: input.image.or(product.image),
            seller: input.seller.or(Some(product.seller)),
            quantity: 1,
        };
        let product_id = line.product_id.clone();
        let line_value = serde_json::to_value(&line).context("encode cart line")?;

        // Serialized read-modify-write on this user's cart document: repeated
        // adds of the same product accumulate quantity on the one existing
        // line instead of appending duplicates.
        let stored = self
            .store
            .transform(collections::CARTS, user_id, move |current| {
                let mut cart = current.unwrap_or_default();
                let items = cart
                    .entry("items")
                    .or_insert_with(|| Value::Array(Vec::new()));
                if let Value::Array(items) = items {
                    let existing = items.iter_mut().find(|item| {
                        item.get("productId").and_then(Value::as_str)
                            == Some(product_id.as_str())
                    });
                    match existing {
                        Some(item) => {
                            let quantity =
                                item.get("quantity").and_then(Value::as_i64).unwrap_or(0);
                            if let Value::Object(item) = item {
                                item.insert("quantity".to_owned(), Value::from(quantity + 1));
                            }
                        }
                        None => items.push(line_value),
                    }
                }
                Some(cart)
            })
            .await
            .context("update cart")?;

        match stored {
            Some(doc) => Ok(decode(collections::CARTS, user_id, doc).context("decode cart")?),
            None => Ok(Cart::default()),
        }
    }
}

// ── RemoveFromCart ───────────────────────────────────────────────────────────

pub struct RemoveFromCartUseCase<S: DocumentStore> {
    pub store: S,
}

impl<S: DocumentStore> RemoveFromCartUseCase<S> {
    pub async fn execute(
        &self,
        user_id: &str,
        product_id: &str,
    ) -> Result<Cart, MarketServiceError> {
        let product_id = product_id.to_owned();
        let stored = self
            .store
            .transform(collections::CARTS, user_id, move |current| {
                // Absent cart: nothing to remove, leave the store untouched.
                let mut cart = current?;
                if let Some(Value::Array(items)) = cart.get_mut("items") {
                    items.retain(|item| {
                        item.get("productId").and_then(Value::as_str)
                            != Some(product_id.as_str())
                    });
                }
                Some(cart)
            })
            .await
            .context("update cart")?;

        match stored {
            Some(doc) => Ok(decode(collections::CARTS, user_id, doc).context("decode cart")?),
            None => Ok(Cart::default()),
        }
    }
}

// ── RetrieveCart ─────────────────────────────────────────────────────────────

pub struct RetrieveCartUseCase<S: DocumentStore> {
    pub store: S,
}

impl<S: DocumentStore> RetrieveCartUseCase<S> {
    pub async fn execute(&self, user_id: &str) -> Result<Cart, MarketServiceError> {
        // An absent cart document reads as an empty cart, never as an error.
        match self
            .store
            .get(collections::CARTS, user_id)
            .await
            .context("load cart")?
        {
            Some(doc) => Ok(decode(collections::CARTS, user_id, doc).context("decode cart")?),
            None => Ok(Cart::default()),
        }
    }
}
