// app/src/services/catalog.rs

//! Read-only access to the product data service.

use crate::errors::{AppError, Result};
use crate::models::{Category, Product};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{error, info, instrument};

#[async_trait]
pub trait ProductCatalog: Send + Sync {
  async fn list_products(&self) -> Result<Vec<Product>>;

  /// `Ok(None)` when no product has that id.
  async fn get_product(&self, id: i64) -> Result<Option<Product>>;

  async fn list_categories(&self) -> Result<Vec<Category>>;
}

const PRODUCT_COLUMNS: &str = "id, title, description, price, image_url, stock, category_id, sold, rating, discount, created_at";

/// Postgres-backed catalog using runtime-checked queries.
#[derive(Debug, Clone)]
pub struct PgCatalog {
  pool: PgPool,
}

impl PgCatalog {
  pub fn new(pool: PgPool) -> Self {
    PgCatalog { pool }
  }
}

#[async_trait]
impl ProductCatalog for PgCatalog {
  #[instrument(name = "catalog::list_products", skip(self))]
  async fn list_products(&self) -> Result<Vec<Product>> {
    let sql = format!("SELECT {} FROM products ORDER BY created_at DESC", PRODUCT_COLUMNS);
    let products: Vec<Product> = sqlx::query_as(&sql).fetch_all(&self.pool).await.map_err(|e| {
      error!("Failed to fetch products from database: {}", e);
      AppError::Sqlx(e)
    })?;
    info!("Fetched {} products.", products.len());
    Ok(products)
  }

  #[instrument(name = "catalog::get_product", skip(self))]
  async fn get_product(&self, id: i64) -> Result<Option<Product>> {
    let sql = format!("SELECT {} FROM products WHERE id = $1", PRODUCT_COLUMNS);
    sqlx::query_as(&sql)
      .bind(id)
      .fetch_optional(&self.pool)
      .await
      .map_err(|e| {
        error!("Database error while fetching product {}: {}", id, e);
        AppError::Sqlx(e)
      })
  }

  #[instrument(name = "catalog::list_categories", skip(self))]
  async fn list_categories(&self) -> Result<Vec<Category>> {
    sqlx::query_as("SELECT id, name FROM categories ORDER BY id ASC")
      .fetch_all(&self.pool)
      .await
      .map_err(|e| {
        error!("Failed to fetch categories from database: {}", e);
        AppError::Sqlx(e)
      })
  }
}

/// Fixed in-process catalog for handler and service tests.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
  pub products: Vec<Product>,
  pub categories: Vec<Category>,
}

#[cfg(test)]
impl InMemoryCatalog {
  pub fn new(products: Vec<Product>, categories: Vec<Category>) -> Self {
    InMemoryCatalog { products, categories }
  }
}

#[cfg(test)]
#[async_trait]
impl ProductCatalog for InMemoryCatalog {
  async fn list_products(&self) -> Result<Vec<Product>> {
    Ok(self.products.clone())
  }

  async fn get_product(&self, id: i64) -> Result<Option<Product>> {
    Ok(self.products.iter().find(|p| p.id == id).cloned())
  }

  async fn list_categories(&self) -> Result<Vec<Category>> {
    Ok(self.categories.clone())
  }
}
