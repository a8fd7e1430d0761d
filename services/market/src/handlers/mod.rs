pub mod cart;
pub mod orders;
pub mod products;
pub mod reports;
pub mod sellers;
pub mod users;

use serde::{Deserialize, Serialize};

/// Body of operations that acknowledge with a message only.
#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// `?limit=N` query of the latest-N endpoints.
#[derive(Deserialize)]
pub struct LimitQuery {
    pub limit: Option<usize>,
}

impl LimitQuery {
    pub fn or_default(&self) -> usize {
        self.limit.unwrap_or(5)
    }
}
