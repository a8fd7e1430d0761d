use anyhow::Context as _;
use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use uuid::Uuid;

use mercato_store::{DocumentStore, StoreError, Update, decode};

use crate::domain::collections;
use crate::domain::types::{Price, Product, SellerCard};
use crate::error::MarketServiceError;

// ── CreateProduct ────────────────────────────────────────────────────────────

pub struct CreateProductInput {
    pub name: Option<String>,
    pub price: Option<Price>,
    pub image: Option<String>,
    pub stock: Option<i64>,
}

pub struct CreateProductUseCase<S: DocumentStore> {
    pub store: S,
}

impl<S: DocumentStore> CreateProductUseCase<S> {
    /// Lists a product under the caller's seller card. The card's title and
    /// genre are denormalized onto the product so catalog reads never join;
    /// seller-card updates rewrite these copies.
    pub async fn execute(
        &self,
        user_id: &str,
        input: CreateProductInput,
    ) -> Result<Product, MarketServiceError> {
        let mut missing = Vec::new();
        if input.name.is_none() {
            missing.push("name");
        }
        if input.price.is_none() {
            missing.push("price");
        }
        let (Some(name), Some(price)) = (input.name, input.price) else {
            return Err(MarketServiceError::MissingFields(missing.join(", ")));
        };

        let card: SellerCard = self
            .store
            .get_as(collections::SELLERS, user_id)
            .await
            .context("load seller card")?
            .ok_or(MarketServiceError::SellerCardNotFound)?;

        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4().to_string(),
            seller: card.title,
            seller_id: user_id.to_owned(),
            image: input.image,
            name,
            price,
            stock: input.stock,
            sales: 0,
            genre: card.genre,
            total: None,
            created_at: now,
            updated_at: now,
        };
        self.store
            .set_as(collections::PRODUCTS, &product.id, &product)
            .await
            .context("save product")?;
        Ok(product)
    }
}

// ── ListProducts / GetProduct ────────────────────────────────────────────────

#[derive(Default)]
pub struct ProductFilter {
    pub genre: Option<String>,
    pub seller_id: Option<String>,
}

pub struct ListProductsUseCase<S: DocumentStore> {
    pub store: S,
}

impl<S: DocumentStore> ListProductsUseCase<S> {
    pub async fn execute(&self, filter: ProductFilter) -> Result<Vec<Product>, MarketServiceError> {
        let docs = if let Some(seller_id) = &filter.seller_id {
            self.store
                .query_eq(
                    collections::PRODUCTS,
                    "SellerID",
                    &Value::String(seller_id.clone()),
                )
                .await
        } else if let Some(genre) = &filter.genre {
            self.store
                .query_eq(collections::PRODUCTS, "genre", &Value::String(genre.clone()))
                .await
        } else {
            self.store.list(collections::PRODUCTS).await
        }
        .context("list products")?;

        let mut products = Vec::with_capacity(docs.len());
        for doc in docs {
            let id = doc
                .get("id")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_owned();
            products.push(decode(collections::PRODUCTS, &id, doc).context("decode product")?);
        }
        if filter.seller_id.is_some() {
            if let Some(genre) = &filter.genre {
                products.retain(|p: &Product| &p.genre == genre);
            }
        }
        products.sort_by(|a: &Product, b: &Product| b.created_at.cmp(&a.created_at));
        Ok(products)
    }
}

pub struct GetProductUseCase<S: DocumentStore> {
    pub store: S,
}

impl<S: DocumentStore> GetProductUseCase<S> {
    pub async fn execute(&self, product_id: &str) -> Result<Product, MarketServiceError> {
        self.store
            .get_as(collections::PRODUCTS, product_id)
            .await
            .context("load product")?
            .ok_or(MarketServiceError::ProductNotFound)
    }
}

// ── UpdateProduct / DeleteProduct ────────────────────────────────────────────

pub struct UpdateProductInput {
    pub name: Option<String>,
    pub price: Option<Price>,
    pub image: Option<String>,
    pub stock: Option<i64>,
}

impl UpdateProductInput {
    fn into_update(self) -> Result<Update, MarketServiceError> {
        let mut update = Update::new();
        if let Some(name) = self.name {
            update = update.set("name", name);
        }
        if let Some(price) = self.price {
            let value = serde_json::to_value(&price).context("encode price")?;
            update = update.set("price", value);
        }
        if let Some(image) = self.image {
            update = update.set("image", image);
        }
        if let Some(stock) = self.stock {
            update = update.set("stock", stock);
        }
        if update.is_empty() {
            return Err(MarketServiceError::MissingData);
        }
        Ok(update.set(
            "updatedAt",
            Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        ))
    }
}

pub struct UpdateProductUseCase<S: DocumentStore> {
    pub store: S,
}

impl<S: DocumentStore> UpdateProductUseCase<S> {
    pub async fn execute(
        &self,
        product_id: &str,
        input: UpdateProductInput,
    ) -> Result<Product, MarketServiceError> {
        let update = input.into_update()?;
        match self.store.update(collections::PRODUCTS, product_id, update).await {
            Ok(()) => {}
            Err(StoreError::Missing { .. }) => return Err(MarketServiceError::ProductNotFound),
            Err(e) => return Err(anyhow::Error::from(e).context("update product").into()),
        }
        self.store
            .get_as(collections::PRODUCTS, product_id)
            .await
            .context("reload product")?
            .ok_or(MarketServiceError::ProductNotFound)
    }
}

pub struct DeleteProductUseCase<S: DocumentStore> {
    pub store: S,
}

impl<S: DocumentStore> DeleteProductUseCase<S> {
    pub async fn execute(&self, product_id: &str) -> Result<(), MarketServiceError> {
        self.store
            .delete(collections::PRODUCTS, product_id)
            .await
            .context("delete product")?;
        Ok(())
    }
}
