// app/src/errors.rs

use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use storefront_cart::CartError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Insufficient stock: only {available} available, {requested} requested")]
  InsufficientStock { available: u32, requested: u64 },

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),

  #[error("Cart Error: {0}")]
  Cart(CartError),

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

// Stock and product-shape problems are caller mistakes, not server faults.
impl From<CartError> for AppError {
  fn from(err: CartError) -> Self {
    match err {
      CartError::InsufficientStock { available, requested } => AppError::InsufficientStock { available, requested },
      CartError::NotInCart { id } => AppError::NotFound(format!("Product {} is not in the cart.", id)),
      CartError::InvalidProduct { field, reason } => {
        AppError::Validation(format!("Product field '{}' {}", field, reason))
      }
      other => AppError::Cart(other),
    }
  }
}

impl From<anyhow::Error> for AppError {
  fn from(err: anyhow::Error) -> Self {
    AppError::Internal(err.to_string())
  }
}

impl ResponseError for AppError {
  fn error_response(&self) -> HttpResponse {
    tracing::error!(application_error = %self, "Responding with error");
    match self {
      AppError::Validation(m) => HttpResponse::BadRequest().json(json!({"error": m})),
      AppError::NotFound(m) => HttpResponse::NotFound().json(json!({"error": m})),
      AppError::InsufficientStock { available, requested } => HttpResponse::Conflict().json(json!({
        "error": "Insufficient stock",
        "available": available,
        "requested": requested
      })),
      AppError::Config(m) => {
        HttpResponse::InternalServerError().json(json!({"error": "Configuration issue", "detail": m}))
      }
      AppError::Sqlx(_) => HttpResponse::InternalServerError().json(json!({"error": "Database operation failed"})),
      AppError::Cart(e) => {
        HttpResponse::InternalServerError().json(json!({"error": "Cart operation failed", "detail": e.to_string()}))
      }
      AppError::Internal(m) => {
        HttpResponse::InternalServerError().json(json!({"error": "An internal error occurred", "detail": m}))
      }
    }
  }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
