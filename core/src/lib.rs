// src/lib.rs

//! Storefront cart: the client-side shopping-cart state store.
//!
//! The store keeps an ordered list of line items (one per distinct product)
//! and offers:
//!  - Synchronous add / remove / set-quantity / clear, immediately visible to readers.
//!  - Derived totals (price sum and unit count) for the cart screen and badge.
//!  - One-time hydration from a key-value backend at startup.
//!  - Ordered, fire-and-forget persistence of the whole cart after every change.
//!  - Validated construction of the product projection that enters the cart.
//!  - Advisory stock checks for callers that want to warn before adding.

pub mod cart;
pub mod codec;
pub mod error;
pub mod id;
pub mod item;
pub mod persistence;
pub mod product;
pub mod store;
mod writer;

// --- Re-exports for the Public API ---

pub use crate::cart::Cart;
pub use crate::error::{CartError, CartResult, PersistenceError};
pub use crate::id::ProductId;
pub use crate::item::CartLineItem;
pub use crate::persistence::{FileStore, KeyValueStore, MemoryStore, CART_STORAGE_KEY};
pub use crate::product::{ProductRecord, ProductSnapshot};
pub use crate::store::{CartStore, CartStoreOptions, CartSummary};

/*
    Typical wiring:
    1. Pick a backend (`FileStore::new(dir)` on a device, `MemoryStore` in tests).
    2. `let cart = CartStore::open(backend, CartStoreOptions::default()).await;`
    3. Hand `cart.clone()` to whatever renders or mutates the cart.
    4. Build a `ProductSnapshot` from a data-service row and call `cart.add_to_cart(snapshot, qty)`.
    5. Before shutdown, `cart.flush().await` so the last write lands.
*/
