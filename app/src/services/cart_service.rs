// app/src/services/cart_service.rs

//! Cart-screen and product-screen flows built on top of the cart store.
//!
//! The plain store mutations never enforce stock; these flows use the
//! stock-checked variants, which check and apply under one lock, and refuse
//! with `InsufficientStock` like the screens do.

use crate::errors::{AppError, Result};
use crate::services::catalog::ProductCatalog;
use storefront_cart::{CartLineItem, CartStore, ProductId};
use tracing::{info, instrument, warn};

/// Add `quantity` units of catalog product `product_id`:
/// validate input, fetch the product, check stock against what is already in
/// the cart, then add.
#[instrument(name = "cart_service::add_product", skip(catalog, cart))]
pub async fn add_product(
  catalog: &dyn ProductCatalog,
  cart: &CartStore,
  product_id: i64,
  quantity: i64,
) -> Result<CartLineItem> {
  // Step 1: validate input
  if quantity <= 0 {
    warn!("Invalid quantity ({}) provided. Must be positive.", quantity);
    return Err(AppError::Validation("Quantity must be a positive number.".to_string()));
  }
  let quantity =
    u32::try_from(quantity).map_err(|_| AppError::Validation("Quantity is too large.".to_string()))?;

  // Step 2: fetch product details
  let product = catalog
    .get_product(product_id)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Product with ID {} not found.", product_id)))?;
  let snapshot = product.to_snapshot()?;

  // Step 3: check stock against what is already in the cart and add, as one step
  let item = cart.add_within_stock(snapshot, quantity).map_err(|e| {
    warn!(product_id, quantity, "Stock check failed: {}", e);
    AppError::from(e)
  })?;
  info!(product_id, new_quantity = item.quantity, "Product added to cart.");
  Ok(item)
}

/// Sets an item's quantity after checking it against the captured stock.
/// Zero or less removes the item.
pub fn set_quantity(cart: &CartStore, id: &ProductId, quantity: i64) -> Result<Option<CartLineItem>> {
  Ok(cart.set_quantity_within_stock(id, quantity)?)
}

/// One more unit, refused once the captured stock is reached.
pub fn increment(cart: &CartStore, id: &ProductId) -> Result<CartLineItem> {
  cart.increment_within_stock(id).map_err(|e| {
    warn!(product_id = %id, "Increment refused: {}", e);
    AppError::from(e)
  })
}

/// One less unit; the item disappears when it reaches zero.
pub fn decrement(cart: &CartStore, id: &ProductId) -> Result<Option<CartLineItem>> {
  Ok(cart.decrement(id)?)
}
