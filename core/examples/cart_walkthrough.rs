// core/examples/cart_walkthrough.rs

use storefront_cart::{CartError, CartStore, CartStoreOptions, FileStore, ProductRecord, ProductSnapshot};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), CartError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();

  info!("--- Cart Walkthrough ---");

  // 1. A device-local directory stands in for app storage.
  let dir = tempfile::tempdir().map_err(|e| CartError::Persistence(storefront_cart::PersistenceError::Io {
    key: "tempdir".into(),
    source: e,
  }))?;

  // 2. Open (create + hydrate) the store. Nothing is saved yet, so it starts empty.
  let cart = CartStore::open(FileStore::new(dir.path()), CartStoreOptions::default()).await;
  info!(hydrated = cart.is_hydrated(), "Store opened.");

  // 3. Rows from the data service go through validated construction first.
  let row: ProductRecord = serde_json::from_str(
    r#"{"id": 12, "title": "Kursi Makan Jati", "price": 1250000, "image_url": "https://cdn.example/kursi.jpg", "stock": 4}"#,
  )?;
  let chair = ProductSnapshot::try_from(row)?;

  // 4. The advisory stock check is the caller's job.
  cart.check_add(&chair, 3)?;
  cart.add_to_cart(chair.clone(), 3);
  if let Err(e) = cart.check_add(&chair, 2) {
    info!("Refusing to add two more: {}", e);
  }

  // 5. Reads see the mutation immediately.
  info!(total = cart.cart_total(), units = cart.cart_items_count(), "After adding.");

  // 6. Same product by string id; quantity 0 removes it.
  cart.update_quantity("12", 0);
  info!(empty = cart.items().is_empty(), "After zero-quantity update.");

  // 7. Add again, flush, and reopen to simulate an app restart.
  cart.add_to_cart(chair, 1);
  cart.flush().await;
  drop(cart);

  let reopened = CartStore::open(FileStore::new(dir.path()), CartStoreOptions::default()).await;
  for item in reopened.items() {
    info!(id = %item.id, title = %item.title, quantity = item.quantity, "Restored line item.");
  }

  info!("--- Cart Walkthrough Complete ---");
  Ok(())
}
