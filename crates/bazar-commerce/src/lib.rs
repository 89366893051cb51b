//! Bookstore domain types and logic for the Bazar storefront client.
//!
//! Everything in this crate is pure computation over data; network access
//! lives in `bazar-data` and persistence behind the `bazar-cache` port.
//!
//! - **Catalog**: Books, authors, stock labels, fallback recommendations
//! - **Cart**: Persisted cart store, category discount, totals
//! - **Checkout**: Form validation, purchase requests, result reconciliation
//! - **Search**: Navigation labels and result views
//! - **History**: Order history in every shape the order service returns
//!
//! # Example
//!
//! ```rust
//! use bazar_cache::{Cache, MemoryStore};
//! use bazar_commerce::prelude::*;
//!
//! let mut cart = Cart::load(Cache::new(MemoryStore::new())).unwrap();
//! for book in default_recommendations() {
//!     cart.add(&book).unwrap();
//! }
//!
//! // Two books share "undergraduate school", so that topic is discounted.
//! let totals = cart.totals();
//! assert_eq!(totals.applied_offers.len(), 1);
//! println!("Total: {}", totals.display_total());
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod history;
pub mod search;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{
        default_recommendations, filter_authors, filter_books, Author, Book, NewAuthorForm,
        NewBookForm, StockLabel, StockRequest, StockUpdate,
    };

    // Cart
    pub use crate::cart::{AppliedOffer, Cart, CartItem, CartTotals, CategoryOffer};

    // Checkout
    pub use crate::checkout::{
        CheckoutForm, CheckoutMode, CheckoutReport, FieldError, FormField, PurchaseOutcome,
        PurchaseRequest, PurchaseResponse, ValidatedCheckout,
    };

    // Search
    pub use crate::search::{HomeView, SearchTarget, SearchView};

    // History
    pub use crate::history::{HistoryEntry, HistoryRows, Order, OrderItem, OrderSummary};
}
