/// Document store failure variants.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// `update` (or a batched update) targeted a document that does not exist.
    #[error("no document {collection}/{id} to update")]
    Missing { collection: String, id: String },
    /// A stored document could not be decoded into the requested type.
    #[error("malformed document {collection}/{id}: {source}")]
    Decode {
        collection: String,
        id: String,
        #[source]
        source: serde_json::Error,
    },
    /// A value could not be encoded as a document.
    #[error("document encoding failed: {0}")]
    Encode(#[source] serde_json::Error),
    /// The backend rejected or failed the call.
    #[error("{0}")]
    Backend(String),
}
