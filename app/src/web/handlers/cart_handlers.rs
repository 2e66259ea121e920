// app/src/web/handlers/cart_handlers.rs

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use storefront_cart::{CartLineItem, CartSummary, ProductId};
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::services::cart_service;
use crate::state::AppState;

// --- Request / Response DTOs ---
#[derive(Deserialize, Debug)]
pub struct AddToCartRequestPayload {
  pub product_id: i64,
  pub quantity: i64,
}

#[derive(Deserialize, Debug)]
pub struct UpdateQuantityPayload {
  pub quantity: i64,
}

#[derive(Serialize, Debug)]
pub struct CartItemView {
  #[serde(flatten)]
  pub item: CartLineItem,
  pub subtotal: u64,
  pub at_stock_limit: bool,
}

impl From<CartLineItem> for CartItemView {
  fn from(item: CartLineItem) -> Self {
    CartItemView {
      subtotal: item.subtotal(),
      at_stock_limit: item.at_stock_limit(),
      item,
    }
  }
}

#[derive(Serialize, Debug)]
pub struct CartView {
  pub items: Vec<CartItemView>,
  pub summary: CartSummary,
}

fn cart_view(app_state: &AppState) -> CartView {
  // One read lock so items and summary describe the same cart.
  app_state.cart.with_items(|cart| CartView {
    items: cart.iter().cloned().map(CartItemView::from).collect(),
    summary: CartSummary::of(cart),
  })
}

// --- Handler Implementation ---

#[instrument(name = "handler::get_cart", skip(app_state))]
pub async fn get_cart_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  Ok(HttpResponse::Ok().json(cart_view(&app_state)))
}

#[instrument(
  name = "handler::add_to_cart",
  skip(app_state, req_payload),
  fields(product_id = %req_payload.product_id, quantity = %req_payload.quantity)
)]
pub async fn add_to_cart_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<AddToCartRequestPayload>,
) -> Result<HttpResponse, AppError> {
  let item = cart_service::add_product(
    app_state.catalog.as_ref(),
    &app_state.cart,
    req_payload.product_id,
    req_payload.quantity,
  )
  .await?;

  Ok(HttpResponse::Ok().json(json!({
      "message": "Item added to cart successfully.",
      "cartItem": CartItemView::from(item),
      "summary": app_state.cart.summary()
  })))
}

#[instrument(name = "handler::update_quantity", skip(app_state, path, req_payload))]
pub async fn update_quantity_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
  req_payload: web::Json<UpdateQuantityPayload>,
) -> Result<HttpResponse, AppError> {
  let id = ProductId::from(path.into_inner());
  cart_service::set_quantity(&app_state.cart, &id, req_payload.quantity)?;
  Ok(HttpResponse::Ok().json(cart_view(&app_state)))
}

#[instrument(name = "handler::increment", skip(app_state, path))]
pub async fn increment_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let id = ProductId::from(path.into_inner());
  cart_service::increment(&app_state.cart, &id)?;
  Ok(HttpResponse::Ok().json(cart_view(&app_state)))
}

#[instrument(name = "handler::decrement", skip(app_state, path))]
pub async fn decrement_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let id = ProductId::from(path.into_inner());
  cart_service::decrement(&app_state.cart, &id)?;
  Ok(HttpResponse::Ok().json(cart_view(&app_state)))
}

/// Direct delete, no confirmation. Removing an absent item is not an error.
#[instrument(name = "handler::remove_from_cart", skip(app_state, path))]
pub async fn remove_from_cart_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let id = ProductId::from(path.into_inner());
  let removed = app_state.cart.remove_from_cart(&id);
  info!(product_id = %id, removed, "Remove from cart handled.");
  Ok(HttpResponse::Ok().json(cart_view(&app_state)))
}

#[instrument(name = "handler::clear_cart", skip(app_state))]
pub async fn clear_cart_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  app_state.cart.clear_cart();
  Ok(HttpResponse::Ok().json(cart_view(&app_state)))
}
