// app/src/models/mod.rs

//! Rows read from the product data service.

pub mod category;
pub mod product;

pub use category::Category;
pub use product::Product;
