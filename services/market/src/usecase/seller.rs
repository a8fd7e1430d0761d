use anyhow::Context as _;
use chrono::Utc;
use serde_json::Value;

use mercato_store::{DocumentStore, Update, Write, decode, encode};

use crate::domain::collections;
use crate::domain::types::SellerCard;
use crate::error::MarketServiceError;

// ── UpsertSellerCard ─────────────────────────────────────────────────────────

pub struct SellerCardInput {
    pub color: Option<String>,
    pub description: Option<String>,
    pub genre: Option<String>,
    pub image: Option<String>,
    pub text_color: Option<String>,
    pub title: Option<String>,
}

struct SellerCardFields {
    color: String,
    description: String,
    genre: String,
    image: String,
    text_color: String,
    title: String,
}

impl SellerCardInput {
    fn into_fields(self) -> Result<SellerCardFields, MarketServiceError> {
        let mut missing = Vec::new();
        if self.color.is_none() {
            missing.push("color");
        }
        if self.description.is_none() {
            missing.push("description");
        }
        if self.genre.is_none() {
            missing.push("genre");
        }
        if self.image.is_none() {
            missing.push("image");
        }
        if self.text_color.is_none() {
            missing.push("textColor");
        }
        if self.title.is_none() {
            missing.push("title");
        }

        match (
            self.color,
            self.description,
            self.genre,
            self.image,
            self.text_color,
            self.title,
        ) {
            (
                Some(color),
                Some(description),
                Some(genre),
                Some(image),
                Some(text_color),
                Some(title),
            ) => Ok(SellerCardFields {
                color,
                description,
                genre,
                image,
                text_color,
                title,
            }),
            _ => Err(MarketServiceError::MissingFields(missing.join(", "))),
        }
    }
}

#[derive(Debug)]
pub struct UpsertSellerCardOutput {
    pub card: SellerCard,
    pub created: bool,
}

pub struct UpsertSellerCardUseCase<S: DocumentStore> {
    pub store: S,
}

impl<S: DocumentStore> UpsertSellerCardUseCase<S> {
    /// Creates or rewrites the caller's seller card.
    ///
    /// On update, the new title and genre are copied onto every product
    /// with a matching `SellerID` in the same atomic batch as the card
    /// write, so readers never observe a card disagreeing with its
    /// products. A fresh card owns no products yet and skips propagation.
    pub async fn execute(
        &self,
        user_id: &str,
        input: SellerCardInput,
    ) -> Result<UpsertSellerCardOutput, MarketServiceError> {
        let fields = input.into_fields()?;
        let now = Utc::now();
        let existing: Option<SellerCard> = self
            .store
            .get_as(collections::SELLERS, user_id)
            .await
            .context("load seller card")?;

        match existing {
            Some(current) => {
                let card = SellerCard {
                    color: fields.color,
                    description: fields.description,
                    genre: fields.genre,
                    image: fields.image,
                    text_color: fields.text_color,
                    title: fields.title,
                    user_id: user_id.to_owned(),
                    created_at: current.created_at,
                    updated_at: now,
                };
                let mut writes = vec![Write::set(
                    collections::SELLERS,
                    user_id,
                    encode(&card).context("encode seller card")?,
                )];
                for product in owned_products(&self.store, user_id).await? {
                    let Some(id) = product.get("id").and_then(Value::as_str) else {
                        continue;
                    };
                    writes.push(Write::update(
                        collections::PRODUCTS,
                        id,
                        Update::new()
                            .set("Seller", card.title.clone())
                            .set("genre", card.genre.clone()),
                    ));
                }
                self.store
                    .batch(writes)
                    .await
                    .context("propagate seller card")?;
                Ok(UpsertSellerCardOutput {
                    card,
                    created: false,
                })
            }
            None => {
                let card = SellerCard {
                    color: fields.color,
                    description: fields.description,
                    genre: fields.genre,
                    image: fields.image,
                    text_color: fields.text_color,
                    title: fields.title,
                    user_id: user_id.to_owned(),
                    created_at: now,
                    updated_at: now,
                };
                self.store
                    .set_as(collections::SELLERS, user_id, &card)
                    .await
                    .context("create seller card")?;
                Ok(UpsertSellerCardOutput {
                    card,
                    created: true,
                })
            }
        }
    }
}

// ── DeleteSellerCard ─────────────────────────────────────────────────────────

/// Deletes every product with a matching `SellerID` together with, never
/// after, the seller document: one atomic batch, so products cannot outlive
/// their card. Also invoked by the user-deletion cascade.
pub(crate) async fn cascade_delete_seller<S: DocumentStore>(
    store: &S,
    user_id: &str,
) -> Result<(), MarketServiceError> {
    let products = owned_products(store, user_id).await?;
    let mut writes: Vec<Write> = products
        .iter()
        .filter_map(|product| product.get("id").and_then(Value::as_str))
        .map(|id| Write::delete(collections::PRODUCTS, id))
        .collect();
    writes.push(Write::delete(collections::SELLERS, user_id));
    store.batch(writes).await.context("delete seller card")?;
    Ok(())
}

pub struct DeleteSellerCardUseCase<S: DocumentStore> {
    pub store: S,
}

impl<S: DocumentStore> DeleteSellerCardUseCase<S> {
    pub async fn execute(&self, user_id: &str) -> Result<(), MarketServiceError> {
        cascade_delete_seller(&self.store, user_id).await
    }
}

// ── Seller queries ───────────────────────────────────────────────────────────

async fn owned_products<S: DocumentStore>(
    store: &S,
    user_id: &str,
) -> Result<Vec<mercato_store::Document>, MarketServiceError> {
    Ok(store
        .query_eq(
            collections::PRODUCTS,
            "SellerID",
            &Value::String(user_id.to_owned()),
        )
        .await
        .context("list seller products")?)
}

async fn load_sellers<S: DocumentStore>(store: &S) -> Result<Vec<SellerCard>, MarketServiceError> {
    let docs = store
        .list(collections::SELLERS)
        .await
        .context("list sellers")?;
    let mut cards = Vec::with_capacity(docs.len());
    for doc in docs {
        let id = doc
            .get("userId")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned();
        cards.push(decode(collections::SELLERS, &id, doc).context("decode seller card")?);
    }
    Ok(cards)
}

pub struct GetSellerUseCase<S: DocumentStore> {
    pub store: S,
}

impl<S: DocumentStore> GetSellerUseCase<S> {
    pub async fn execute(&self, user_id: &str) -> Result<SellerCard, MarketServiceError> {
        self.store
            .get_as(collections::SELLERS, user_id)
            .await
            .context("load seller card")?
            .ok_or(MarketServiceError::SellerCardNotFound)
    }
}

pub struct ListSellersUseCase<S: DocumentStore> {
    pub store: S,
}

impl<S: DocumentStore> ListSellersUseCase<S> {
    pub async fn execute(&self) -> Result<Vec<SellerCard>, MarketServiceError> {
        load_sellers(&self.store).await
    }
}

pub struct LatestSellersUseCase<S: DocumentStore> {
    pub store: S,
}

impl<S: DocumentStore> LatestSellersUseCase<S> {
    pub async fn execute(&self, limit: usize) -> Result<Vec<SellerCard>, MarketServiceError> {
        let mut cards = load_sellers(&self.store).await?;
        cards.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        cards.truncate(limit);
        Ok(cards)
    }
}
