// core/src/item.rs
use crate::id::ProductId;
use crate::product::ProductSnapshot;
use serde::{Deserialize, Serialize};

/// One row of the cart: a single distinct product and how many units of it.
///
/// `title`, `price`, `image_url` and `stock` are captured when the row is
/// created and never refreshed from the data service afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
  pub id: ProductId,
  pub title: String,
  pub price: u64,
  pub image_url: String,
  pub quantity: u32,
  pub stock: u32,
}

impl CartLineItem {
  pub fn from_snapshot(product: ProductSnapshot, quantity: u32) -> Self {
    CartLineItem {
      id: product.id,
      title: product.title,
      price: product.price,
      image_url: product.image_url,
      quantity,
      stock: product.stock,
    }
  }

  /// `price * quantity`, saturating.
  pub fn subtotal(&self) -> u64 {
    self.price.saturating_mul(u64::from(self.quantity))
  }

  /// Whether the cart screen may offer one more unit.
  pub fn can_increment(&self) -> bool {
    self.quantity < self.stock
  }

  pub fn at_stock_limit(&self) -> bool {
    self.quantity >= self.stock
  }
}
