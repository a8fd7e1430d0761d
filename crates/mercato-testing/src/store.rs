//! Failure injection for storage-dependent tests.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use serde_json::Value;

use mercato_store::{Document, DocumentStore, StoreError, Update, Write, WriteOp};

/// Wraps a [`DocumentStore`] and fails selected operations.
///
/// Used to exercise degraded paths, for example settlement continuing past
/// a product whose counter update keeps failing. Marked documents fail
/// their `set`, `update` or `delete`, and any batch touching a marked
/// document fails whole.
#[derive(Clone)]
pub struct FailingStore<S> {
    inner: S,
    fail_sets: Arc<Mutex<HashSet<(String, String)>>>,
    fail_updates: Arc<Mutex<HashSet<(String, String)>>>,
    fail_deletes: Arc<Mutex<HashSet<(String, String)>>>,
}

impl<S> FailingStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            fail_sets: Arc::default(),
            fail_updates: Arc::default(),
            fail_deletes: Arc::default(),
        }
    }

    /// Make every `set` of `collection/id` fail, including in batches.
    pub fn fail_set(&self, collection: &str, id: &str) {
        mark(&self.fail_sets, collection, id);
    }

    /// Make every `update` of `collection/id` fail, including in batches.
    pub fn fail_update(&self, collection: &str, id: &str) {
        mark(&self.fail_updates, collection, id);
    }

    /// Make every `delete` of `collection/id` fail, including in batches.
    pub fn fail_delete(&self, collection: &str, id: &str) {
        mark(&self.fail_deletes, collection, id);
    }

    fn set_marked(&self, collection: &str, id: &str) -> bool {
        marked(&self.fail_sets, collection, id)
    }

    fn update_marked(&self, collection: &str, id: &str) -> bool {
        marked(&self.fail_updates, collection, id)
    }

    fn delete_marked(&self, collection: &str, id: &str) -> bool {
        marked(&self.fail_deletes, collection, id)
    }

    fn injected(collection: &str, id: &str) -> StoreError {
        StoreError::Backend(format!("injected failure for {collection}/{id}"))
    }
}

fn mark(marks: &Mutex<HashSet<(String, String)>>, collection: &str, id: &str) {
    marks
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .insert((collection.to_owned(), id.to_owned()));
}

fn marked(marks: &Mutex<HashSet<(String, String)>>, collection: &str, id: &str) -> bool {
    marks
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .contains(&(collection.to_owned(), id.to_owned()))
}

impl<S: DocumentStore> DocumentStore for FailingStore<S> {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        self.inner.get(collection, id).await
    }

    async fn set(&self, collection: &str, id: &str, doc: Document) -> Result<(), StoreError> {
        if self.set_marked(collection, id) {
            return Err(Self::injected(collection, id));
        }
        self.inner.set(collection, id, doc).await
    }

    async fn update(&self, collection: &str, id: &str, update: Update) -> Result<(), StoreError> {
        if self.update_marked(collection, id) {
            return Err(Self::injected(collection, id));
        }
        self.inner.update(collection, id, update).await
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        if self.delete_marked(collection, id) {
            return Err(Self::injected(collection, id));
        }
        self.inner.delete(collection, id).await
    }

    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        self.inner.list(collection).await
    }

    async fn query_eq(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<Document>, StoreError> {
        self.inner.query_eq(collection, field, value).await
    }

    async fn count(&self, collection: &str) -> Result<u64, StoreError> {
        self.inner.count(collection).await
    }

    async fn batch(&self, writes: Vec<Write>) -> Result<(), StoreError> {
        for write in &writes {
            let marked = match write.op {
                WriteOp::Set(_) => self.set_marked(&write.collection, &write.id),
                WriteOp::Update(_) => self.update_marked(&write.collection, &write.id),
                WriteOp::Delete => self.delete_marked(&write.collection, &write.id),
            };
            if marked {
                return Err(Self::injected(&write.collection, &write.id));
            }
        }
        self.inner.batch(writes).await
    }

    async fn transform<F>(
        &self,
        collection: &str,
        id: &str,
        f: F,
    ) -> Result<Option<Document>, StoreError>
    where
        F: FnOnce(Option<Document>) -> Option<Document> + Send,
    {
        self.inner.transform(collection, id, f).await
    }
}
