// core/src/error.rs
use crate::id::ProductId;
use anyhow::Error as AnyhowError;
use thiserror::Error;

/// Failures raised by a [`KeyValueStore`](crate::persistence::KeyValueStore) backend.
///
/// The cart store never propagates these to mutation callers; they are logged
/// and swallowed by the hydration step and the persistence writer.
#[derive(Debug, Error)]
pub enum PersistenceError {
  #[error("Storage backend failed for key '{key}'. Source: {source}")]
  Backend {
    key: String,
    #[source]
    source: AnyhowError,
  },

  #[error("Storage I/O failed for key '{key}': {source}")]
  Io {
    key: String,
    #[source]
    source: std::io::Error,
  },

  #[error("Stored value for key '{key}' is not valid UTF-8")]
  Encoding { key: String },
}

impl PersistenceError {
  pub fn backend(key: impl Into<String>, source: impl Into<AnyhowError>) -> Self {
    PersistenceError::Backend {
      key: key.into(),
      source: source.into(),
    }
  }

  pub fn key(&self) -> &str {
    match self {
      PersistenceError::Backend { key, .. } | PersistenceError::Io { key, .. } | PersistenceError::Encoding { key } => key,
    }
  }
}

#[derive(Debug, Error)]
pub enum CartError {
  #[error("Invalid product record: field '{field}' {reason}")]
  InvalidProduct { field: &'static str, reason: String },

  #[error("Product {id} is not in the cart")]
  NotInCart { id: ProductId },

  #[error("Insufficient stock: {available} available, {requested} requested")]
  InsufficientStock { available: u32, requested: u64 },

  #[error("Cart blob could not be (de)serialized: {0}")]
  Serialization(#[from] serde_json::Error),

  #[error("Persistence error: {0}")]
  Persistence(#[from] PersistenceError),
}

impl CartError {
  pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
    CartError::InvalidProduct {
      field,
      reason: reason.into(),
    }
  }
}

pub type CartResult<T, E = CartError> = std::result::Result<T, E>;
