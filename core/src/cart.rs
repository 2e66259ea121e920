// core/src/cart.rs
use crate::error::{CartError, CartResult};
use crate::id::ProductId;
use crate::item::CartLineItem;
use crate::product::ProductSnapshot;

/// Ordered collection of line items, unique by [`ProductId`].
///
/// New products append; updates keep their position. No row ever holds a
/// quantity of zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
  items: Vec<CartLineItem>,
}

impl Cart {
  pub fn new() -> Self {
    Self::default()
  }

  /// Builds a cart from previously stored rows, dropping zero-quantity rows
  /// and folding duplicate ids into their first occurrence.
  pub fn from_items(raw: Vec<CartLineItem>) -> Self {
    let mut cart = Cart::new();
    for item in raw {
      if item.quantity == 0 {
        tracing::warn!(product_id = %item.id, "Dropping stored cart row with zero quantity.");
        continue;
      }
      match cart.position(&item.id) {
        Some(idx) => {
          tracing::warn!(product_id = %item.id, "Folding duplicate stored cart row.");
          let existing = &mut cart.items[idx];
          existing.quantity = existing.quantity.saturating_add(item.quantity);
        }
        None => cart.items.push(item),
      }
    }
    cart
  }

  fn position(&self, id: &ProductId) -> Option<usize> {
    self.items.iter().position(|item| &item.id == id)
  }

  pub fn get(&self, id: &ProductId) -> Option<&CartLineItem> {
    self.items.iter().find(|item| &item.id == id)
  }

  pub fn items(&self) -> &[CartLineItem] {
    &self.items
  }

  pub fn iter(&self) -> std::slice::Iter<'_, CartLineItem> {
    self.items.iter()
  }

  pub fn into_items(self) -> Vec<CartLineItem> {
    self.items
  }

  /// Number of distinct line items.
  pub fn len(&self) -> usize {
    self.items.len()
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  /// Adds `quantity` units of `product`. An existing row only has its
  /// quantity increased; its captured title/price/stock stay as they were.
  /// Stock is not enforced here, see [`Cart::check_add`].
  pub fn add(&mut self, product: ProductSnapshot, quantity: u32) {
    if quantity == 0 {
      tracing::debug!(product_id = %product.id, "Ignoring add of zero units.");
      return;
    }
    match self.position(&product.id) {
      Some(idx) => {
        let existing = &mut self.items[idx];
        existing.quantity = existing.quantity.saturating_add(quantity);
      }
      None => self.items.push(CartLineItem::from_snapshot(product, quantity)),
    }
  }

  /// Removes the row for `id`. Returns whether anything was removed.
  pub fn remove(&mut self, id: &ProductId) -> bool {
    let before = self.items.len();
    self.items.retain(|item| &item.id != id);
    self.items.len() != before
  }

  /// Sets the quantity of an existing row. `quantity <= 0` removes the row;
  /// an absent id is left absent. Returns whether the cart changed.
  pub fn set_quantity(&mut self, id: &ProductId, quantity: i64) -> bool {
    if quantity <= 0 {
      return self.remove(id);
    }
    let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
    match self.position(id) {
      Some(idx) if self.items[idx].quantity != quantity => {
        self.items[idx].quantity = quantity;
        true
      }
      _ => false,
    }
  }

  pub fn clear(&mut self) {
    self.items.clear();
  }

  /// Sum of `price * quantity` over every row.
  pub fn total(&self) -> u64 {
    self.items.iter().fold(0u64, |acc, item| acc.saturating_add(item.subtotal()))
  }

  /// Total units across all rows (not the number of rows).
  pub fn item_count(&self) -> u64 {
    self.items.iter().map(|item| u64::from(item.quantity)).sum()
  }

  /// Advisory check used before [`Cart::add`]: would the product's captured
  /// stock cover what is already in the cart plus `requested`?
  pub fn check_add(&self, product: &ProductSnapshot, requested: u32) -> CartResult<()> {
    let in_cart = self.get(&product.id).map_or(0, |item| u64::from(item.quantity));
    let wanted = in_cart + u64::from(requested);
    if wanted > u64::from(product.stock) {
      return Err(CartError::InsufficientStock {
        available: product.stock,
        requested: wanted,
      });
    }
    Ok(())
  }

  /// Advisory check used before [`Cart::set_quantity`] against the row's
  /// captured stock. Absent ids and removals always pass.
  pub fn check_quantity(&self, id: &ProductId, target: i64) -> CartResult<()> {
    let Some(item) = self.get(id) else {
      return Ok(());
    };
    if target > i64::from(item.stock) {
      return Err(CartError::InsufficientStock {
        available: item.stock,
        requested: u64::try_from(target).unwrap_or(u64::MAX),
      });
    }
    Ok(())
  }

  /// [`Cart::check_add`] and [`Cart::add`] as one step. Returns the row as it
  /// stands afterwards; on error the cart is untouched.
  pub fn add_within_stock(&mut self, product: ProductSnapshot, quantity: u32) -> CartResult<CartLineItem> {
    self.check_add(&product, quantity)?;
    let id = product.id.clone();
    self.add(product, quantity);
    self.get(&id).cloned().ok_or(CartError::NotInCart { id })
  }

  /// Raises an existing row by one unit unless it already sits at its
  /// captured stock.
  pub fn increment_within_stock(&mut self, id: &ProductId) -> CartResult<CartLineItem> {
    let idx = self.position(id).ok_or_else(|| CartError::NotInCart { id: id.clone() })?;
    let item = &mut self.items[idx];
    if !item.can_increment() {
      return Err(CartError::InsufficientStock {
        available: item.stock,
        requested: u64::from(item.quantity) + 1,
      });
    }
    item.quantity += 1;
    Ok(item.clone())
  }

  /// [`Cart::check_quantity`] and [`Cart::set_quantity`] as one step, for rows
  /// already in the cart. `Ok(None)` means the row was removed.
  pub fn set_quantity_within_stock(&mut self, id: &ProductId, quantity: i64) -> CartResult<Option<CartLineItem>> {
    if self.position(id).is_none() {
      return Err(CartError::NotInCart { id: id.clone() });
    }
    self.check_quantity(id, quantity)?;
    self.set_quantity(id, quantity);
    Ok(self.get(id).cloned())
  }

  /// Lowers an existing row by one unit; the last unit removes the row.
  pub fn decrement(&mut self, id: &ProductId) -> CartResult<Option<CartLineItem>> {
    let idx = self.position(id).ok_or_else(|| CartError::NotInCart { id: id.clone() })?;
    let target = i64::from(self.items[idx].quantity) - 1;
    self.set_quantity(id, target);
    Ok(self.get(id).cloned())
  }
}

impl<'a> IntoIterator for &'a Cart {
  type Item = &'a CartLineItem;
  type IntoIter = std::slice::Iter<'a, CartLineItem>;

  fn into_iter(self) -> Self::IntoIter {
    self.items.iter()
  }
}
