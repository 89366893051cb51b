//! Cart store and line item type.

use crate::cart::{CartTotals, CategoryOffer};
use crate::catalog::Book;
use crate::error::CommerceError;
use crate::ids::BookId;
use bazar_cache::{Cache, CacheError, KvStore};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Storage key holding the serialized cart.
pub const CART_ITEMS_KEY: &str = "cartItems";

fn default_quantity() -> i64 {
    1
}

/// A book snapshot in the cart.
///
/// Lines are never merged: adding the same book twice gives two lines.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    /// Book id.
    pub id: BookId,
    /// Title at the time of adding.
    pub title: String,
    /// Author at the time of adding.
    pub author: String,
    /// Price at the time of adding.
    #[serde(deserialize_with = "crate::catalog::deserialize_price")]
    pub price: f64,
    /// Topic, used as the discount category.
    pub topic: String,
    /// Always 1.
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

impl From<&Book> for CartItem {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
            author: book.author.clone(),
            price: book.price,
            topic: book.topic.clone(),
            quantity: 1,
        }
    }
}

/// The shopping cart, persisted under [`CART_ITEMS_KEY`] after every change.
#[derive(Debug)]
pub struct Cart<S> {
    cache: Cache<S>,
    items: Vec<CartItem>,
    offer: CategoryOffer,
}

impl<S: KvStore> Cart<S> {
    /// Rehydrate the cart from storage.
    ///
    /// A missing key gives an empty cart. Unreadable contents are logged and
    /// also give an empty cart; storage failures are returned.
    pub fn load(cache: Cache<S>) -> Result<Self, CommerceError> {
        let items = read_items(&cache)?;
        debug!(items = items.len(), "cart loaded");
        Ok(Self {
            cache,
            items,
            offer: CategoryOffer::STANDARD,
        })
    }

    /// Replace the discount rule used for totals.
    pub fn with_offer(mut self, offer: CategoryOffer) -> Self {
        self.offer = offer;
        self
    }

    /// Offer used for totals.
    pub fn offer(&self) -> &CategoryOffer {
        &self.offer
    }

    /// Lines in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Number of lines, shown as the cart badge.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append a snapshot of `book`.
    pub fn add(&mut self, book: &Book) -> Result<(), CommerceError> {
        self.items.push(CartItem::from(book));
        self.persist()
    }

    /// Remove the line at `index`.
    pub fn remove(&mut self, index: usize) -> Result<CartItem, CommerceError> {
        if index >= self.items.len() {
            return Err(CommerceError::ItemNotInCart(index));
        }
        let removed = self.items.remove(index);
        self.persist()?;
        Ok(removed)
    }

    /// Empty the cart.
    pub fn clear(&mut self) -> Result<(), CommerceError> {
        self.items.clear();
        self.persist()
    }

    /// Drop one line per purchased id, leaving everything else in order.
    ///
    /// Each id removes at most one line, so a book added twice with one
    /// successful purchase keeps its other line.
    pub fn remove_purchased(&mut self, purchased: &[BookId]) -> Result<(), CommerceError> {
        let mut pending: Vec<BookId> = purchased.to_vec();
        self.items.retain(|item| {
            match pending.iter().position(|id| *id == item.id) {
                Some(pos) => {
                    pending.swap_remove(pos);
                    false
                }
                None => true,
            }
        });
        self.persist()
    }

    /// Current pricing breakdown.
    pub fn totals(&self) -> CartTotals {
        CartTotals::calculate(&self.items, &self.offer)
    }

    /// Re-read the cart from storage, discarding the in-memory copy.
    /// Unreadable contents give an empty cart, as in [`load`](Self::load).
    pub fn reload(&mut self) -> Result<(), CommerceError> {
        self.items = read_items(&self.cache)?;
        Ok(())
    }

    fn persist(&self) -> Result<(), CommerceError> {
        self.cache.set(CART_ITEMS_KEY, &self.items)?;
        Ok(())
    }
}

fn read_items<S: KvStore>(cache: &Cache<S>) -> Result<Vec<CartItem>, CommerceError> {
    match cache.get::<Vec<CartItem>>(CART_ITEMS_KEY) {
        Ok(items) => Ok(items.unwrap_or_default()),
        Err(CacheError::Corrupt(e)) => {
            warn!(error = %e, "discarding unreadable cart contents");
            Ok(Vec::new())
        }
        Err(e) => Err(e.into()),
    }
}
