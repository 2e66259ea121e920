// app/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use storefront_cart::CART_STORAGE_KEY;

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub database_url: String,

  // Where the device-local cart blob lives
  pub cart_storage_dir: PathBuf,
  pub cart_storage_key: String,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present
    Self::from_lookup(|name| env::var(name).ok())
  }

  /// Builds the config from any variable source; `from_env` passes the
  /// process environment.
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
    let get_env = |var_name: &str| {
      lookup(var_name).ok_or_else(|| AppError::Config(format!("Missing environment variable '{}'", var_name)))
    };

    let server_host = get_env("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let server_port = get_env("SERVER_PORT")
      .unwrap_or_else(|_| "8080".to_string())
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;
    let database_url = get_env("DATABASE_URL")?;

    let cart_storage_dir = PathBuf::from(get_env("CART_STORAGE_DIR").unwrap_or_else(|_| "./data".to_string()));
    let cart_storage_key = get_env("CART_STORAGE_KEY").unwrap_or_else(|_| CART_STORAGE_KEY.to_string());
    if cart_storage_key.trim().is_empty() {
      return Err(AppError::Config("CART_STORAGE_KEY must not be blank".to_string()));
    }

    tracing::info!("Application configuration loaded successfully.");

    Ok(Self {
      server_host,
      server_port,
      database_url,
      cart_storage_dir,
      cart_storage_key,
    })
  }
}
