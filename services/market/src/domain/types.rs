use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use mercato_auth::Role;
use mercato_core::serde::to_rfc3339_ms;

/// Marketplace account, keyed by the identity provider's subject id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    /// Identity-provider tag (e.g. "password", "google.com").
    pub provider: String,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub joined_at: DateTime<Utc>,
}

/// Seller storefront card, one per user, keyed by the owning user id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerCard {
    pub color: String,
    pub description: String,
    pub genre: String,
    pub image: String,
    pub text_color: String,
    pub title: String,
    pub user_id: String,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

/// Catalog product.
///
/// `Seller` and `genre` are denormalized copies of the owning seller card's
/// title and genre, kept in sync by the propagation cascade. The field
/// names, including the historical capitalization of `Seller`/`SellerID`,
/// are the stored wire names and must not be normalized.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    #[serde(rename = "Seller")]
    pub seller: String,
    #[serde(rename = "SellerID")]
    pub seller_id: String,
    #[serde(default)]
    pub image: Option<String>,
    pub name: String,
    pub price: Price,
    /// Absent means inventory is untracked; only `sales` is counted then.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    #[serde(default)]
    pub sales: i64,
    pub genre: String,
    /// Freeform accumulator carried verbatim, never interpreted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<Value>,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

/// A price as stored: either a JSON number or a currency-formatted string
/// (e.g. "R12.50").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Price {
    Number(f64),
    Text(String),
}

impl Price {
    /// Numeric amount, tolerant of currency formatting: every character
    /// except digits, `.` and `-` is stripped before parsing, and a value
    /// that still fails to parse counts as 0.
    pub fn amount(&self) -> f64 {
        match self {
            Self::Number(n) => *n,
            Self::Text(s) => {
                let cleaned: String = s
                    .chars()
                    .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
                    .collect();
                cleaned.parse().unwrap_or(0.0)
            }
        }
    }
}

impl Default for Price {
    fn default() -> Self {
        Self::Number(0.0)
    }
}

/// One cart line: a snapshot of product data taken at add time, plus the
/// accumulated quantity. At most one line exists per product id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: Price,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub seller: Option<String>,
    pub quantity: i64,
}

/// Per-user cart document. An absent document reads as an empty cart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    #[serde(default)]
    pub items: Vec<CartLine>,
}

/// Status a freshly placed order carries. No update path exists in this
/// service, so every stored order holds it.
pub const ORDER_STATUS_PENDING: &str = "Pending";

/// Order field names that caller-supplied details can never override.
pub const RESERVED_ORDER_KEYS: [&str; 5] = ["id", "userId", "items", "status", "createdAt"];

/// A placed order: a verbatim snapshot of the cart lines at placement time,
/// immune to later product changes, merged with caller-supplied detail
/// fields (shipping address and the like).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub user_id: String,
    pub items: Vec<CartLine>,
    pub status: String,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}
