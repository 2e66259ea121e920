// tests/hydration_tests.rs
mod common;

use common::*;
use serial_test::serial;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use storefront_cart::{codec, CartLineItem, CartStore, CartStoreOptions, MemoryStore, ProductId, CART_STORAGE_KEY};

fn saved_cart() -> Vec<CartLineItem> {
  vec![
    CartLineItem {
      id: ProductId::from(5),
      title: "Sofa Minimalis".into(),
      price: 100_000,
      image_url: "https://cdn.example/sofa.jpg".into(),
      quantity: 2,
      stock: 10,
    },
    CartLineItem {
      id: ProductId::from("meja-7"),
      title: "Meja Kopi".into(),
      price: 50_000,
      image_url: "https://cdn.example/meja.jpg".into(),
      quantity: 1,
      stock: 3,
    },
  ]
}

#[tokio::test]
#[serial]
async fn test_open_reflects_persisted_cart_before_any_mutation() {
  setup_tracing();
  let backend = MemoryStore::new();
  backend.insert(CART_STORAGE_KEY, codec::encode(&saved_cart()).unwrap());

  let store = CartStore::open(backend, CartStoreOptions::default()).await;

  assert!(store.is_hydrated());
  assert_eq!(store.items(), saved_cart());
  assert_eq!(store.cart_total(), 250_000);
  assert_eq!(store.cart_items_count(), 3);
}

#[tokio::test]
#[serial]
async fn test_restart_restores_latest_state() {
  setup_tracing();
  let backend = MemoryStore::new();
  {
    let store = CartStore::open(backend.clone(), CartStoreOptions::default()).await;
    store.add_to_cart(sofa(), 2);
    store.add_to_cart(table(), 1);
    store.update_quantity("meja-7", 3);
    store.flush().await;
  }

  let restarted = CartStore::open(backend, CartStoreOptions::default()).await;
  let items = restarted.items();
  assert_eq!(items.len(), 2);
  assert_eq!(items[0].id.as_str(), "5");
  assert_eq!(items[1].quantity, 3);
}

#[tokio::test]
#[serial]
async fn test_clear_is_durable_across_restart() {
  setup_tracing();
  let backend = MemoryStore::new();
  backend.insert(CART_STORAGE_KEY, codec::encode(&saved_cart()).unwrap());

  let store = CartStore::open(backend.clone(), CartStoreOptions::default()).await;
  store.clear_cart();
  assert!(store.items().is_empty());
  store.flush().await;
  assert_eq!(backend.snapshot(CART_STORAGE_KEY).as_deref(), Some("[]"));

  let restarted = CartStore::open(backend, CartStoreOptions::default()).await;
  assert!(restarted.items().is_empty());
}

#[tokio::test]
#[serial]
async fn test_unreadable_blob_hydrates_empty() {
  setup_tracing();
  let backend = MemoryStore::new();
  backend.insert(CART_STORAGE_KEY, "{definitely not a cart");

  let store = CartStore::open(backend.clone(), CartStoreOptions::default()).await;
  assert!(store.is_hydrated());
  assert!(store.items().is_empty());

  // Nothing is written back until the cart actually changes.
  store.flush().await;
  assert_eq!(backend.snapshot(CART_STORAGE_KEY).as_deref(), Some("{definitely not a cart"));
}

#[tokio::test]
#[serial]
async fn test_read_failure_hydrates_empty_and_store_keeps_working() {
  setup_tracing();
  let backend = FlakyStore::failing_reads();
  let store = CartStore::open(Arc::clone(&backend), CartStoreOptions::default()).await;

  assert!(store.is_hydrated());
  assert!(store.items().is_empty());

  store.add_to_cart(sofa(), 1);
  store.flush().await;
  assert_eq!(backend.set_calls.load(Ordering::SeqCst), 1);
  assert!(backend.value.lock().is_some());
}

#[tokio::test]
#[serial]
async fn test_mutations_before_hydration_are_not_persisted() {
  setup_tracing();
  let backend = Arc::new(RecordingStore::default());
  *backend.initial.lock() = Some(codec::encode(&saved_cart()).unwrap());
  *backend.read_delay.lock() = Some(Duration::from_millis(20));

  let store = CartStore::new(Arc::clone(&backend), CartStoreOptions::default());
  assert!(!store.is_hydrated());

  store.add_to_cart(product(99, 1, 1), 1);
  assert_eq!(store.cart_items_count(), 1);
  store.flush().await;
  assert!(backend.writes.lock().is_empty());

  store.hydrate().await;
  assert_eq!(store.items(), saved_cart());
  store.flush().await;
  assert!(backend.writes.lock().is_empty());
}

#[tokio::test]
#[serial]
async fn test_hydrate_runs_once() {
  setup_tracing();
  let backend = MemoryStore::new();
  backend.insert(CART_STORAGE_KEY, codec::encode(&saved_cart()).unwrap());

  let store = CartStore::open(backend.clone(), CartStoreOptions::default()).await;
  store.clear_cart();
  store.flush().await;

  // A second hydrate must not resurrect anything.
  backend.insert(CART_STORAGE_KEY, codec::encode(&saved_cart()).unwrap());
  store.hydrate().await;
  assert!(store.items().is_empty());
}

#[tokio::test]
#[serial]
async fn test_stored_rows_are_repaired_on_load() {
  setup_tracing();
  let backend = MemoryStore::new();
  backend.insert(
    CART_STORAGE_KEY,
    r#"[
      {"id": 5, "title": "Sofa", "price": 10, "image_url": "", "quantity": 1, "stock": 9},
      {"id": "5", "title": "Sofa", "price": 10, "image_url": "", "quantity": 2, "stock": 9},
      {"id": "x", "title": "Ghost", "price": 10, "image_url": "", "quantity": 0, "stock": 9}
    ]"#,
  );

  let store = CartStore::open(backend, CartStoreOptions::default()).await;
  let items = store.items();
  assert_eq!(items.len(), 1);
  assert_eq!(items[0].quantity, 3);
}

#[tokio::test]
#[serial]
async fn test_custom_storage_key() {
  setup_tracing();
  let backend = MemoryStore::new();
  let options = CartStoreOptions {
    storage_key: "@cart:guest".to_string(),
  };
  let store = CartStore::open(backend.clone(), options).await;
  store.add_to_cart(sofa(), 1);
  store.flush().await;

  assert_eq!(store.storage_key(), "@cart:guest");
  assert!(backend.snapshot("@cart:guest").is_some());
  assert!(backend.snapshot(CART_STORAGE_KEY).is_none());
}
