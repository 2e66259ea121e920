// core/src/product.rs

//! Validated construction of the product projection the cart consumes.
//!
//! Rows from the product data service arrive as a loose [`ProductRecord`].
//! Only a [`ProductSnapshot`] can be added to a cart, which keeps partial
//! records from leaking into totals.

use crate::error::{CartError, CartResult};
use crate::id::ProductId;
use serde::Deserialize;

/// Loose projection of a data-service row. Every field is optional and the id
/// may be either a number or a string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductRecord {
  pub id: Option<ProductId>,
  pub title: Option<String>,
  pub price: Option<i64>,
  pub image_url: Option<String>,
  pub stock: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSnapshot {
  pub id: ProductId,
  pub title: String,
  pub price: u64,
  pub image_url: String,
  pub stock: u32,
}

impl ProductSnapshot {
  pub fn new(
    id: impl Into<ProductId>,
    title: impl Into<String>,
    price: i64,
    image_url: impl Into<String>,
    stock: i64,
  ) -> CartResult<Self> {
    let id = id.into();
    if id.is_empty() {
      return Err(CartError::invalid("id", "must not be empty"));
    }

    let title = title.into();
    if title.trim().is_empty() {
      return Err(CartError::invalid("title", "must not be blank"));
    }

    let price = u64::try_from(price).map_err(|_| CartError::invalid("price", format!("must not be negative (got {})", price)))?;

    if stock < 0 {
      return Err(CartError::invalid("stock", format!("must not be negative (got {})", stock)));
    }
    let stock = u32::try_from(stock).unwrap_or(u32::MAX);

    Ok(ProductSnapshot {
      id,
      title,
      price,
      image_url: image_url.into(),
      stock,
    })
  }
}

impl TryFrom<ProductRecord> for ProductSnapshot {
  type Error = CartError;

  fn try_from(record: ProductRecord) -> CartResult<Self> {
    let id = record.id.ok_or_else(|| CartError::invalid("id", "is missing"))?;
    let title = record.title.ok_or_else(|| CartError::invalid("title", "is missing"))?;
    let price = record.price.ok_or_else(|| CartError::invalid("price", "is missing"))?;
    // Absent image or stock is tolerated: no picture, nothing available.
    ProductSnapshot::new(
      id,
      title,
      price,
      record.image_url.unwrap_or_default(),
      record.stock.unwrap_or(0),
    )
  }
}
