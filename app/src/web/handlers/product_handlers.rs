// app/src/web/handlers/product_handlers.rs

use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::errors::AppError;
use crate::services::browse::{home_feed, ProductQuery};
use crate::state::AppState;

#[instrument(name = "handler::list_products", skip(app_state, query_params))]
pub async fn list_products_handler(
  app_state: web::Data<AppState>,
  query_params: web::Query<ProductQuery>,
) -> Result<HttpResponse, AppError> {
  let query = query_params.into_inner();
  let products = query.apply(app_state.catalog.list_products().await?);

  info!("Listing {} products after filters.", products.len());

  Ok(HttpResponse::Ok().json(json!({
      "products": products,
      "count": products.len(),
      "active_filters": query.active_filter_count()
  })))
}

/// Featured, popular and newest sections of the home screen.
#[instrument(name = "handler::home", skip(app_state))]
pub async fn home_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let feed = home_feed(&app_state.catalog.list_products().await?);
  info!(
    featured = feed.featured.len(),
    popular = feed.popular.len(),
    newest = feed.newest.len(),
    "Built home feed."
  );
  Ok(HttpResponse::Ok().json(feed))
}

#[instrument(name = "handler::get_product", skip(app_state, path), fields(product_id = %path.as_ref()))]
pub async fn get_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
  let product_id = path.into_inner();

  match app_state.catalog.get_product(product_id).await? {
    Some(product) => {
      // Units of this product already in the cart, for the detail screen's quantity picker.
      let in_cart = app_state.cart.get(product_id).map_or(0, |item| item.quantity);
      Ok(HttpResponse::Ok().json(json!({
          "product": product,
          "in_cart": in_cart
      })))
    }
    None => {
      warn!("Product with ID {} not found.", product_id);
      Err(AppError::NotFound(format!("Product with ID {} not found.", product_id)))
    }
  }
}

#[instrument(name = "handler::list_categories", skip(app_state))]
pub async fn list_categories_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let categories = app_state.catalog.list_categories().await?;
  Ok(HttpResponse::Ok().json(json!({ "categories": categories })))
}
