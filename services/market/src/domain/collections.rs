//! Store collection names.

pub const USERS: &str = "users";
pub const SELLERS: &str = "sellers";
pub const PRODUCTS: &str = "products";
pub const CARTS: &str = "carts";
pub const ORDERS: &str = "orders";
