// core/src/codec.rs

//! The persisted cart is a single JSON array of line-item objects.

use crate::error::CartResult;
use crate::item::CartLineItem;

pub fn encode(items: &[CartLineItem]) -> CartResult<String> {
  Ok(serde_json::to_string(items)?)
}

pub fn decode(blob: &str) -> CartResult<Vec<CartLineItem>> {
  Ok(serde_json::from_str(blob)?)
}
