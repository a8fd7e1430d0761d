pub mod cart;
pub mod order;
pub mod product;
pub mod reports;
pub mod seller;
pub mod user;
