// app/src/models/product.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use storefront_cart::{CartResult, ProductSnapshot};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
  pub id: i64,
  pub title: String,
  pub description: Option<String>,
  pub price: i64,
  pub image_url: Option<String>,
  pub stock: i32,
  pub category_id: Option<i64>,
  pub sold: Option<i32>,
  pub rating: Option<f64>,
  /// Percent off; `None` when the product is not on promotion.
  pub discount: Option<i32>,
  pub created_at: DateTime<Utc>,
}

impl Product {
  /// The projection a cart line item is built from, validated.
  pub fn to_snapshot(&self) -> CartResult<ProductSnapshot> {
    ProductSnapshot::new(
      self.id,
      self.title.clone(),
      self.price,
      self.image_url.clone().unwrap_or_default(),
      i64::from(self.stock),
    )
  }
}
