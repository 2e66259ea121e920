// core/src/store.rs
use crate::cart::Cart;
use crate::codec;
use crate::error::CartResult;
use crate::id::ProductId;
use crate::item::CartLineItem;
use crate::persistence::{KeyValueStore, CART_STORAGE_KEY};
use crate::product::ProductSnapshot;
use crate::writer::PersistenceWriter;
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{watch, OnceCell};
use tracing::{debug, error, info, instrument, warn};

#[derive(Debug, Clone)]
pub struct CartStoreOptions {
  /// Key of the single blob holding the whole cart.
  pub storage_key: String,
}

impl Default for CartStoreOptions {
  fn default() -> Self {
    CartStoreOptions {
      storage_key: CART_STORAGE_KEY.to_string(),
    }
  }
}

/// Aggregates published to subscribers after every change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CartSummary {
  pub line_items: usize,
  pub units: u64,
  pub total: u64,
}

impl CartSummary {
  pub fn of(cart: &Cart) -> Self {
    CartSummary {
      line_items: cart.len(),
      units: cart.item_count(),
      total: cart.total(),
    }
  }
}

#[derive(Debug, Default)]
struct CartState {
  cart: Cart,
  hydrated: bool,
}

#[derive(Debug)]
struct Inner {
  state: RwLock<CartState>,
  adapter: Arc<dyn KeyValueStore>,
  storage_key: String,
  writer: PersistenceWriter,
  summary_tx: watch::Sender<CartSummary>,
  hydration: OnceCell<()>,
}

/// Shared handle to the application's cart.
///
/// Mutations are synchronous: the in-memory cart reflects them as soon as the
/// call returns. Once hydrated, every mutation also queues a write of the
/// whole cart, applied in mutation order by a background task. Storage
/// failures are logged and never reach the caller.
///
/// Cloning the handle is cheap and every clone sees the same cart. The
/// internal lock is never held across an `.await`.
#[derive(Debug, Clone)]
pub struct CartStore {
  inner: Arc<Inner>,
}

impl CartStore {
  /// Creates an empty, not yet hydrated store and starts its persistence
  /// writer. Must be called from within a Tokio runtime.
  pub fn new<S>(adapter: S, options: CartStoreOptions) -> Self
  where
    S: KeyValueStore + 'static,
  {
    let adapter: Arc<dyn KeyValueStore> = Arc::new(adapter);
    let writer = PersistenceWriter::spawn(Arc::clone(&adapter), options.storage_key.clone());
    let (summary_tx, _) = watch::channel(CartSummary::default());

    CartStore {
      inner: Arc::new(Inner {
        state: RwLock::new(CartState::default()),
        adapter,
        storage_key: options.storage_key,
        writer,
        summary_tx,
        hydration: OnceCell::new(),
      }),
    }
  }

  /// [`CartStore::new`] followed by [`CartStore::hydrate`].
  pub async fn open<S>(adapter: S, options: CartStoreOptions) -> Self
  where
    S: KeyValueStore + 'static,
  {
    let store = Self::new(adapter, options);
    store.hydrate().await;
    store
  }

  /// Loads the persisted cart, once. Later calls return immediately; calls
  /// racing the first one wait for it to finish.
  pub async fn hydrate(&self) {
    self.inner.hydration.get_or_init(|| self.load_persisted()).await;
  }

  #[instrument(name = "cart_store::hydrate", skip(self), fields(key = %self.inner.storage_key))]
  async fn load_persisted(&self) {
    let loaded = match self.inner.adapter.get(&self.inner.storage_key).await {
      Ok(Some(blob)) => match codec::decode(&blob) {
        Ok(items) => Some(Cart::from_items(items)),
        Err(e) => {
          warn!(error = %e, "Stored cart is unreadable; starting with an empty cart.");
          None
        }
      },
      Ok(None) => {
        debug!("No stored cart found.");
        None
      }
      Err(e) => {
        error!(error = %e, "Error loading cart; starting with an empty cart.");
        None
      }
    };

    let mut state = self.inner.state.write();
    if let Some(cart) = loaded {
      info!(line_items = cart.len(), "Loaded cart from storage.");
      state.cart = cart;
    }
    state.hydrated = true;
    self.inner.summary_tx.send_replace(CartSummary::of(&state.cart));
  }

  pub fn is_hydrated(&self) -> bool {
    self.inner.state.read().hydrated
  }

  pub fn storage_key(&self) -> &str {
    &self.inner.storage_key
  }

  /// Applies `op` under the write lock, then queues the resulting cart for
  /// persistence if hydration has completed.
  fn mutate<R>(&self, op: &'static str, f: impl FnOnce(&mut Cart) -> R) -> R {
    let mut state = self.inner.state.write();
    let result = f(&mut state.cart);
    self.commit(op, &state);
    result
  }

  /// Like `mutate`, but the check and the change run under the same write
  /// guard. An `Err` from `f` must leave the cart untouched; nothing is
  /// persisted or published in that case.
  pub fn try_mutate<R>(&self, op: &'static str, f: impl FnOnce(&mut Cart) -> CartResult<R>) -> CartResult<R> {
    let mut state = self.inner.state.write();
    let result = f(&mut state.cart)?;
    self.commit(op, &state);
    Ok(result)
  }

  fn commit(&self, op: &'static str, state: &CartState) {
    if state.hydrated {
      match codec::encode(state.cart.items()) {
        Ok(blob) => self.inner.writer.save(blob, state.cart.len()),
        Err(e) => error!(op, error = %e, "Could not serialize cart; skipping write."),
      }
    } else {
      debug!(op, "Cart not hydrated yet; change kept in memory only.");
    }

    self.inner.summary_tx.send_replace(CartSummary::of(&state.cart));
  }

  /// Adds `quantity` units of `product`, merging into an existing row.
  /// Stock is not enforced; run [`CartStore::check_add`] first when the
  /// caller wants to warn about it.
  pub fn add_to_cart(&self, product: ProductSnapshot, quantity: u32) {
    debug!(product_id = %product.id, title = %product.title, quantity, "Adding to cart.");
    self.mutate("add_to_cart", |cart| cart.add(product, quantity));
  }

  /// Removes the row for `id`, if any. The (possibly unchanged) cart is
  /// persisted either way.
  pub fn remove_from_cart(&self, id: impl Into<ProductId>) -> bool {
    let id = id.into();
    debug!(product_id = %id, "Removing from cart.");
    self.mutate("remove_from_cart", |cart| cart.remove(&id))
  }

  /// Sets a row's quantity; `quantity <= 0` removes the row.
  pub fn update_quantity(&self, id: impl Into<ProductId>, quantity: i64) -> bool {
    let id = id.into();
    debug!(product_id = %id, quantity, "Updating quantity.");
    self.mutate("update_quantity", |cart| cart.set_quantity(&id, quantity))
  }

  pub fn clear_cart(&self) {
    debug!("Clearing entire cart.");
    self.mutate("clear_cart", Cart::clear);
  }

  /// Stock-checked add: refuses with `InsufficientStock` when the row would
  /// exceed the product's captured stock. Returns the resulting row.
  pub fn add_within_stock(&self, product: ProductSnapshot, quantity: u32) -> CartResult<CartLineItem> {
    debug!(product_id = %product.id, quantity, "Adding to cart within stock.");
    self.try_mutate("add_within_stock", |cart| cart.add_within_stock(product, quantity))
  }

  pub fn increment_within_stock(&self, id: impl Into<ProductId>) -> CartResult<CartLineItem> {
    let id = id.into();
    self.try_mutate("increment", |cart| cart.increment_within_stock(&id))
  }

  /// Stock-checked quantity update for a row already in the cart.
  /// `Ok(None)` means `quantity <= 0` removed the row.
  pub fn set_quantity_within_stock(&self, id: impl Into<ProductId>, quantity: i64) -> CartResult<Option<CartLineItem>> {
    let id = id.into();
    self.try_mutate("set_quantity", |cart| cart.set_quantity_within_stock(&id, quantity))
  }

  pub fn decrement(&self, id: impl Into<ProductId>) -> CartResult<Option<CartLineItem>> {
    let id = id.into();
    self.try_mutate("decrement", |cart| cart.decrement(&id))
  }

  pub fn cart_total(&self) -> u64 {
    self.inner.state.read().cart.total()
  }

  pub fn cart_items_count(&self) -> u64 {
    self.inner.state.read().cart.item_count()
  }

  pub fn summary(&self) -> CartSummary {
    CartSummary::of(&self.inner.state.read().cart)
  }

  /// Cloned snapshot of the line items, in cart order.
  pub fn items(&self) -> Vec<CartLineItem> {
    self.inner.state.read().cart.items().to_vec()
  }

  pub fn get(&self, id: impl Into<ProductId>) -> Option<CartLineItem> {
    let id = id.into();
    self.inner.state.read().cart.get(&id).cloned()
  }

  /// Runs `f` against the current cart under a read lock. `f` must not block
  /// or call back into this store's mutating methods.
  pub fn with_items<R>(&self, f: impl FnOnce(&Cart) -> R) -> R {
    f(&self.inner.state.read().cart)
  }

  pub fn check_add(&self, product: &ProductSnapshot, requested: u32) -> CartResult<()> {
    self.with_items(|cart| cart.check_add(product, requested))
  }

  pub fn check_quantity(&self, id: impl Into<ProductId>, target: i64) -> CartResult<()> {
    let id = id.into();
    self.with_items(|cart| cart.check_quantity(&id, target))
  }

  /// Receives a fresh [`CartSummary`] after hydration and every mutation.
  pub fn subscribe(&self) -> watch::Receiver<CartSummary> {
    self.inner.summary_tx.subscribe()
  }

  /// Resolves once every write queued before this call has been attempted.
  pub async fn flush(&self) {
    self.inner.writer.flush().await;
  }
}
