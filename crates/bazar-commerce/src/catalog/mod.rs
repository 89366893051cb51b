//! Book catalog module.
//!
//! Contains the server-owned book and author records, the stock-adjustment
//! request, new-entry drafts, list filters and the fixed fallback
//! recommendations.

mod book;
mod draft;
mod filter;
mod price;
mod stock;

pub use book::{default_recommendations, Author, Book, StockLabel, LOW_STOCK_THRESHOLD, SUMMARY_CHARS};
pub use draft::{
    is_valid_isbn, normalize_isbn, EntryCreated, EntryError, EntryField, NewAuthor, NewAuthorForm,
    NewBook, NewBookForm,
};
pub use filter::{filter_authors, filter_books};
pub use stock::{StockRequest, StockUpdate};

pub(crate) use price::deserialize as deserialize_price;
