// core/src/persistence/memory.rs
use super::KeyValueStore;
use crate::error::PersistenceError;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// In-process store. Clones share the same contents, so reopening a cart on a
/// clone behaves like an app restart against the same device storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore(Arc<Mutex<HashMap<String, String>>>);

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Synchronous peek, handy for assertions.
  pub fn snapshot(&self, key: &str) -> Option<String> {
    self.0.lock().get(key).cloned()
  }

  pub fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
    self.0.lock().insert(key.into(), value.into());
  }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
  async fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
    Ok(self.0.lock().get(key).cloned())
  }

  async fn set(&self, key: &str, value: String) -> Result<(), PersistenceError> {
    self.0.lock().insert(key.to_owned(), value);
    Ok(())
  }

  async fn remove(&self, key: &str) -> Result<(), PersistenceError> {
    self.0.lock().remove(key);
    Ok(())
  }
}
