// core/src/persistence/mod.rs

//! Key-value persistence contract consumed by the cart store.
//!
//! Backends are treated as unreliable: the store logs their failures and
//! carries on with its in-memory state.

pub mod file;
pub mod memory;

use crate::error::PersistenceError;
use async_trait::async_trait;
use std::fmt::Debug;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Fixed key under which the whole serialized cart is stored.
pub const CART_STORAGE_KEY: &str = "@cart";

/// Asynchronous string blob store.
#[async_trait]
pub trait KeyValueStore: Send + Sync + Debug {
  /// Returns `Ok(None)` if nothing is stored under `key`.
  async fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;

  /// Inserts or replaces the value under `key`.
  async fn set(&self, key: &str, value: String) -> Result<(), PersistenceError>;

  /// Removes `key`. Returns `Ok(())` even if nothing was stored.
  async fn remove(&self, key: &str) -> Result<(), PersistenceError>;
}

#[async_trait]
impl<T: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<T> {
  async fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
    (**self).get(key).await
  }

  async fn set(&self, key: &str, value: String) -> Result<(), PersistenceError> {
    (**self).set(key, value).await
  }

  async fn remove(&self, key: &str) -> Result<(), PersistenceError> {
    (**self).remove(key).await
  }
}
