// app/src/web/routes.rs

use actix_web::web;

use crate::state::AppState;
use crate::web::handlers::{cart_handlers, product_handlers};

async fn health_check_handler(app_state: web::Data<AppState>) -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({
    "status": "ok",
    "cart_hydrated": app_state.cart.is_hydrated(),
    "cart_storage_key": app_state.config.cart_storage_key
  }))
}

pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg.service(
    web::scope("/api/v1")
      .route("/health", web::get().to(health_check_handler))
      .route("/home", web::get().to(product_handlers::home_handler))
      .route("/categories", web::get().to(product_handlers::list_categories_handler))
      .service(
        web::scope("/products")
          .route("", web::get().to(product_handlers::list_products_handler))
          .route("/{product_id}", web::get().to(product_handlers::get_product_handler)),
      )
      .service(
        web::scope("/cart")
          .route("", web::get().to(cart_handlers::get_cart_handler))
          .route("", web::delete().to(cart_handlers::clear_cart_handler))
          .route("/items", web::post().to(cart_handlers::add_to_cart_handler))
          .route("/items/{product_id}", web::put().to(cart_handlers::update_quantity_handler))
          .route("/items/{product_id}", web::delete().to(cart_handlers::remove_from_cart_handler))
          .route(
            "/items/{product_id}/increment",
            web::post().to(cart_handlers::increment_handler),
          )
          .route(
            "/items/{product_id}/decrement",
            web::post().to(cart_handlers::decrement_handler),
          ),
      ),
  );
}
