// app/src/state.rs
use crate::config::AppConfig;
use crate::services::catalog::ProductCatalog;
use std::sync::Arc;
use storefront_cart::CartStore;

#[derive(Clone)]
pub struct AppState {
  pub catalog: Arc<dyn ProductCatalog>,
  pub cart: CartStore,
  pub config: Arc<AppConfig>,
}
