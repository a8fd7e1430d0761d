//! Document-store client contract for the mercato workspace.
//!
//! The marketplace service talks to a key-partitioned document database
//! through the [`DocumentStore`] trait: documents addressed by
//! `(collection, id)`, per-document atomic writes, field-scoped atomic
//! operations (increment, array-union), atomic multi-document batches,
//! single-document read-modify-write transactions, and equality-filtered /
//! count-aggregation queries. Managed backends implement the trait out of
//! tree; [`MemoryStore`] is the embedded implementation used for
//! development and tests.

pub mod document;
pub mod error;
pub mod memory;
pub mod store;

pub use document::{Document, FieldOp, Update, Write, WriteOp};
pub use error::StoreError;
pub use memory::MemoryStore;
pub use store::{DocumentStore, decode, encode};
