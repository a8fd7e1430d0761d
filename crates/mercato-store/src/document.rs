use serde_json::Value;

/// A stored document: a JSON object addressed by `(collection, id)`.
pub type Document = serde_json::Map<String, Value>;

/// A field-scoped operation inside an [`Update`].
#[derive(Debug, Clone)]
pub enum FieldOp {
    /// Overwrite the field with the given value.
    Set(Value),
    /// Atomically add to a numeric field. An absent or non-numeric field is
    /// treated as 0 before the increment is applied.
    Increment(i64),
    /// Append the given elements that are not already present in the array
    /// field, compared by value. An absent or non-array field is treated as
    /// an empty array.
    ArrayUnion(Vec<Value>),
}

/// A set of field operations merged into one existing document.
///
/// Built with the chained constructors and applied through
/// [`DocumentStore::update`](crate::DocumentStore::update) or inside a
/// [`Write`]. Operations apply in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Update {
    ops: Vec<(String, FieldOp)>,
}

impl Update {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.ops.push((field.to_owned(), FieldOp::Set(value.into())));
        self
    }

    pub fn increment(mut self, field: &str, by: i64) -> Self {
        self.ops.push((field.to_owned(), FieldOp::Increment(by)));
        self
    }

    pub fn array_union(mut self, field: &str, values: Vec<Value>) -> Self {
        self.ops
            .push((field.to_owned(), FieldOp::ArrayUnion(values)));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn ops(&self) -> &[(String, FieldOp)] {
        &self.ops
    }
}

/// One entry of an atomic multi-document batch.
#[derive(Debug, Clone)]
pub struct Write {
    pub collection: String,
    pub id: String,
    pub op: WriteOp,
}

#[derive(Debug, Clone)]
pub enum WriteOp {
    Set(Document),
    Update(Update),
    Delete,
}

impl Write {
    pub fn set(collection: &str, id: &str, doc: Document) -> Self {
        Self {
            collection: collection.to_owned(),
            id: id.to_owned(),
            op: WriteOp::Set(doc),
        }
    }

    pub fn update(collection: &str, id: &str, update: Update) -> Self {
        Self {
            collection: collection.to_owned(),
            id: id.to_owned(),
            op: WriteOp::Update(update),
        }
    }

    pub fn delete(collection: &str, id: &str) -> Self {
        Self {
            collection: collection.to_owned(),
            id: id.to_owned(),
            op: WriteOp::Delete,
        }
    }
}
