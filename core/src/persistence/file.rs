// core/src/persistence/file.rs
use super::KeyValueStore;
use crate::error::PersistenceError;
use async_trait::async_trait;
use std::fmt::Write as _;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Directory-backed store: one file per key.
///
/// Keys are hex-encoded into file names, so `@cart` lives in `4063617274.json`.
/// Values are written to a temporary sibling and renamed into place.
#[derive(Debug, Clone)]
pub struct FileStore {
  root: PathBuf,
}

impl FileStore {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    FileStore { root: root.into() }
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  pub fn path_for(&self, key: &str) -> PathBuf {
    let mut name = String::with_capacity(key.len() * 2 + 5);
    for byte in key.as_bytes() {
      let _ = write!(name, "{:02x}", byte);
    }
    name.push_str(".json");
    self.root.join(name)
  }

  fn io_err(key: &str, source: std::io::Error) -> PersistenceError {
    PersistenceError::Io {
      key: key.to_owned(),
      source,
    }
  }
}

#[async_trait]
impl KeyValueStore for FileStore {
  #[instrument(name = "file_store::get", skip(self), level = "debug")]
  async fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
    match tokio::fs::read(self.path_for(key)).await {
      Ok(bytes) => String::from_utf8(bytes)
        .map(Some)
        .map_err(|_| PersistenceError::Encoding { key: key.to_owned() }),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
      Err(e) => Err(Self::io_err(key, e)),
    }
  }

  #[instrument(name = "file_store::set", skip(self, value), fields(bytes = value.len()), level = "debug")]
  async fn set(&self, key: &str, value: String) -> Result<(), PersistenceError> {
    tokio::fs::create_dir_all(&self.root)
      .await
      .map_err(|e| Self::io_err(key, e))?;

    let target = self.path_for(key);
    let staging = target.with_extension("json.tmp");
    tokio::fs::write(&staging, value.as_bytes())
      .await
      .map_err(|e| Self::io_err(key, e))?;
    tokio::fs::rename(&staging, &target)
      .await
      .map_err(|e| Self::io_err(key, e))?;

    debug!(path = %target.display(), "Value written.");
    Ok(())
  }

  #[instrument(name = "file_store::remove", skip(self), level = "debug")]
  async fn remove(&self, key: &str) -> Result<(), PersistenceError> {
    match tokio::fs::remove_file(self.path_for(key)).await {
      Ok(()) => Ok(()),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
      Err(e) => Err(Self::io_err(key, e)),
    }
  }
}
