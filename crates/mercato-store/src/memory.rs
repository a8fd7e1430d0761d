use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::Value;

use crate::document::{Document, FieldOp, Update, Write, WriteOp};
use crate::error::StoreError;
use crate::store::DocumentStore;

type Collections = HashMap<String, BTreeMap<String, Document>>;

/// Embedded implementation of the full [`DocumentStore`] contract.
///
/// All operations run under one process-wide mutex, which trivially gives
/// per-document atomicity, conflict-free field operations, all-or-nothing
/// batches, and serialized transforms. Cloning yields a handle onto the
/// same store, so one instance constructed at startup can be shared by
/// every component.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Collections>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Collections> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn apply_update(doc: &mut Document, update: &Update) {
    for (field, op) in update.ops() {
        match op {
            FieldOp::Set(value) => {
                doc.insert(field.clone(), value.clone());
            }
            FieldOp::Increment(by) => {
                let current = doc.get(field).and_then(Value::as_i64).unwrap_or(0);
                doc.insert(field.clone(), Value::from(current + by));
            }
            FieldOp::ArrayUnion(values) => {
                let mut arr = match doc.get(field) {
                    Some(Value::Array(existing)) => existing.clone(),
                    _ => Vec::new(),
                };
                for value in values {
                    if !arr.contains(value) {
                        arr.push(value.clone());
                    }
                }
                doc.insert(field.clone(), Value::Array(arr));
            }
        }
    }
}

impl DocumentStore for MemoryStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        Ok(self
            .lock()
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned())
    }

    async fn set(&self, collection: &str, id: &str, doc: Document) -> Result<(), StoreError> {
        self.lock()
            .entry(collection.to_owned())
            .or_default()
            .insert(id.to_owned(), doc);
        Ok(())
    }

    async fn update(&self, collection: &str, id: &str, update: Update) -> Result<(), StoreError> {
        let mut guard = self.lock();
        let doc = guard
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| StoreError::Missing {
                collection: collection.to_owned(),
                id: id.to_owned(),
            })?;
        apply_update(doc, &update);
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        if let Some(docs) = self.lock().get_mut(collection) {
            docs.remove(id);
        }
        Ok(())
    }

    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        Ok(self
            .lock()
            .get(collection)
            .map(|docs| docs.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn query_eq(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<Document>, StoreError> {
        Ok(self
            .lock()
            .get(collection)
            .map(|docs| {
                docs.values()
                    .filter(|doc| doc.get(field) == Some(value))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn count(&self, collection: &str) -> Result<u64, StoreError> {
        Ok(self
            .lock()
            .get(collection)
            .map(|docs| docs.len() as u64)
            .unwrap_or_default())
    }

    async fn batch(&self, writes: Vec<Write>) -> Result<(), StoreError> {
        let mut guard = self.lock();

        // Validate in batch order before touching anything, tracking the
        // existence changes earlier writes would make, so the batch applies
        // all or not at all.
        let mut exists: HashMap<(&str, &str), bool> = HashMap::new();
        for write in &writes {
            let key = (write.collection.as_str(), write.id.as_str());
            let current = exists.get(&key).copied().unwrap_or_else(|| {
                guard
                    .get(write.collection.as_str())
                    .is_some_and(|docs| docs.contains_key(write.id.as_str()))
            });
            match &write.op {
                WriteOp::Set(_) => {
                    exists.insert(key, true);
                }
                WriteOp::Delete => {
                    exists.insert(key, false);
                }
                WriteOp::Update(_) if !current => {
                    return Err(StoreError::Missing {
                        collection: write.collection.clone(),
                        id: write.id.clone(),
                    });
                }
                WriteOp::Update(_) => {}
            }
        }

        for write in writes {
            let docs = guard.entry(write.collection).or_default();
            match write.op {
                WriteOp::Set(doc) => {
                    docs.insert(write.id, doc);
                }
                WriteOp::Update(update) => {
                    if let Some(doc) = docs.get_mut(&write.id) {
                        apply_update(doc, &update);
                    }
                }
                WriteOp::Delete => {
                    docs.remove(&write.id);
                }
            }
        }
        Ok(())
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
        let mut guard = self.lock();
        let current = guard
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned();
        match f(current.clone()) {
            Some(next) => {
                guard
                    .entry(collection.to_owned())
                    .or_default()
                    .insert(id.to_owned(), next.clone());
                Ok(Some(next))
            }
            None => Ok(current),
        }
    }
}
