#![allow(async_fn_in_trait)]

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::document::{Document, Update, Write};
use crate::error::StoreError;

/// Client contract for the key-partitioned document database.
///
/// Implementations must provide per-document atomicity for every single
/// write, apply [`FieldOp::Increment`](crate::FieldOp::Increment) and
/// [`FieldOp::ArrayUnion`](crate::FieldOp::ArrayUnion) without conflicting
/// with concurrent applications of the same operation, apply a batch all or
/// not at all, and serialize concurrent [`transform`](Self::transform)
/// calls against the same document.
pub trait DocumentStore: Send + Sync {
    /// Fetch one document, `None` if absent.
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

    /// Create or replace one document.
    async fn set(&self, collection: &str, id: &str, doc: Document) -> Result<(), StoreError>;

    /// Merge field operations into an existing document. Fails with
    /// [`StoreError::Missing`] if the document does not exist.
    async fn update(&self, collection: &str, id: &str, update: Update) -> Result<(), StoreError>;

    /// Delete one document. Deleting an absent document succeeds.
    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;

    /// Fetch every document of a collection.
    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError>;

    /// Fetch the documents whose `field` equals `value`.
    async fn query_eq(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<Document>, StoreError>;

    /// Count-aggregation over a collection.
    async fn count(&self, collection: &str) -> Result<u64, StoreError>;

    /// Apply a multi-document batch atomically, in order. An update against
    /// a document that does not exist at its point in the batch fails the
    /// whole batch without applying anything.
    async fn batch(&self, writes: Vec<Write>) -> Result<(), StoreError>;

    /// Single-document read-modify-write executed under the store's
    /// transaction primitive: no other write to this document interleaves
    /// between the read and the write. The closure receives the current
    /// document (`None` if absent); returning `Some` stores the new
    /// document, returning `None` leaves the stored state untouched.
    /// Returns the stored state after the call.
    async fn transform<F>(
        &self,
        collection: &str,
        id: &str,
        f: F,
    ) -> Result<Option<Document>, StoreError>
    where
        F: FnOnce(Option<Document>) -> Option<Document> + Send;

    /// [`get`](Self::get) decoded into a typed value.
    async fn get_as<T: DeserializeOwned>(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<T>, StoreError>
    where
        Self: Sized,
    {
        match self.get(collection, id).await? {
            Some(doc) => decode(collection, id, doc).map(Some),
            None => Ok(None),
        }
    }

    /// [`set`](Self::set) from a typed value.
    async fn set_as<T: Serialize>(
        &self,
        collection: &str,
        id: &str,
        value: &T,
    ) -> Result<(), StoreError>
    where
        Self: Sized,
    {
        self.set(collection, id, encode(value)?).await
    }
}

/// Decode a document into a typed value.
pub fn decode<T: DeserializeOwned>(
    collection: &str,
    id: &str,
    doc: Document,
) -> Result<T, StoreError> {
    serde_json::from_value(Value::Object(doc)).map_err(|source| StoreError::Decode {
        collection: collection.to_owned(),
        id: id.to_owned(),
        source,
    })
}

/// Encode a typed value as a document. Fails if the value does not
/// serialize to a JSON object.
pub fn encode<T: Serialize>(value: &T) -> Result<Document, StoreError> {
    match serde_json::to_value(value).map_err(StoreError::Encode)? {
        Value::Object(map) => Ok(map),
        _ => Err(StoreError::Encode(<serde_json::Error as serde::ser::Error>::custom(
            "document must serialize to a JSON object",
        ))),
    }
}
