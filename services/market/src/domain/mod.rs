pub mod collections;
pub mod types;
