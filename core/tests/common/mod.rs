// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::{
  atomic::{AtomicBool, AtomicUsize, Ordering},
  Arc,
};
use std::time::Duration;
use storefront_cart::{KeyValueStore, PersistenceError, ProductSnapshot};
use tracing::Level;

// --- Product fixtures ---
pub fn product(id: i64, price: i64, stock: i64) -> ProductSnapshot {
  ProductSnapshot::new(id, format!("Product {}", id), price, format!("https://cdn.example/{}.jpg", id), stock)
    .expect("fixture product must be valid")
}

pub fn sofa() -> ProductSnapshot {
  ProductSnapshot::new(5, "Sofa Minimalis", 100_000, "https://cdn.example/sofa.jpg", 10).unwrap()
}

pub fn table() -> ProductSnapshot {
  ProductSnapshot::new("meja-7", "Meja Kopi", 50_000, "https://cdn.example/meja.jpg", 3).unwrap()
}

// --- Backend doubles ---

/// Backend whose reads and/or writes can be switched to fail.
#[derive(Debug, Default)]
pub struct FlakyStore {
  pub fail_get: AtomicBool,
  pub fail_set: AtomicBool,
  pub value: Mutex<Option<String>>,
  pub set_calls: AtomicUsize,
}

impl FlakyStore {
  pub fn failing_reads() -> Arc<Self> {
    let store = Self::default();
    store.fail_get.store(true, Ordering::SeqCst);
    Arc::new(store)
  }

  pub fn failing_writes() -> Arc<Self> {
    let store = Self::default();
    store.fail_set.store(true, Ordering::SeqCst);
    Arc::new(store)
  }
}

#[async_trait]
impl KeyValueStore for FlakyStore {
  async fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
    if self.fail_get.load(Ordering::SeqCst) {
      return Err(PersistenceError::backend(key, anyhow::anyhow!("simulated read failure")));
    }
    Ok(self.value.lock().clone())
  }

  async fn set(&self, key: &str, value: String) -> Result<(), PersistenceError> {
    self.set_calls.fetch_add(1, Ordering::SeqCst);
    if self.fail_set.load(Ordering::SeqCst) {
      return Err(PersistenceError::backend(key, anyhow::anyhow!("simulated write failure")));
    }
    *self.value.lock() = Some(value);
    Ok(())
  }

  async fn remove(&self, _key: &str) -> Result<(), PersistenceError> {
    *self.value.lock() = None;
    Ok(())
  }
}

/// Backend recording every written blob. Writes take longer the earlier they
/// are issued, so any reordering would show up in `writes`.
#[derive(Debug, Default)]
pub struct RecordingStore {
  pub writes: Mutex<Vec<String>>,
  pub initial: Mutex<Option<String>>,
  pub read_delay: Mutex<Option<Duration>>,
}

#[async_trait]
impl KeyValueStore for RecordingStore {
  async fn get(&self, _key: &str) -> Result<Option<String>, PersistenceError> {
    let delay = *self.read_delay.lock();
    if let Some(delay) = delay {
      tokio::time::sleep(delay).await;
    }
    Ok(self.initial.lock().clone())
  }

  async fn set(&self, _key: &str, value: String) -> Result<(), PersistenceError> {
    let pending = 10u64.saturating_sub(self.writes.lock().len() as u64);
    tokio::time::sleep(Duration::from_millis(pending)).await;
    self.writes.lock().push(value);
    Ok(())
  }

  async fn remove(&self, _key: &str) -> Result<(), PersistenceError> {
    Ok(())
  }
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
