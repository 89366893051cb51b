//! Book and author types.

use crate::ids::BookId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Books with fewer copies than this are flagged as running out.
pub const LOW_STOCK_THRESHOLD: i64 = 5;

/// Number of description characters shown on a book card.
pub const SUMMARY_CHARS: usize = 100;

/// A book as served by the catalog.
///
/// The client treats `quantity` as advisory: it is decremented locally after a
/// purchase and only corrected on the next fetch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Book {
    /// Catalog id.
    pub id: BookId,
    /// Title.
    pub title: String,
    /// Author display name.
    pub author: String,
    /// Long description.
    #[serde(default)]
    pub description: String,
    /// Unit price.
    #[serde(deserialize_with = "crate::catalog::deserialize_price")]
    pub price: f64,
    /// Topic, used as the discount category.
    pub topic: String,
    /// Copies in stock.
    #[serde(default)]
    pub quantity: i64,
}

impl Book {
    /// Price rounded for display.
    pub fn display_price(&self) -> Money {
        Money::from_decimal(self.price, Currency::USD)
    }

    /// Check if stock is below [`LOW_STOCK_THRESHOLD`].
    pub fn is_low_stock(&self) -> bool {
        self.quantity < LOW_STOCK_THRESHOLD
    }

    /// Stock badge for cards and detail views.
    pub fn stock_label(&self) -> StockLabel {
        if self.is_low_stock() {
            StockLabel::Low(self.quantity)
        } else {
            StockLabel::InStock(self.quantity)
        }
    }

    /// Description cut to [`SUMMARY_CHARS`] characters followed by an ellipsis.
    pub fn summary(&self) -> String {
        let cut: String = self.description.chars().take(SUMMARY_CHARS).collect();
        format!("{}...", cut)
    }

    /// Optimistically account for one copy sold.
    pub fn record_purchase(&mut self) {
        self.quantity = (self.quantity - 1).max(0);
    }

    /// Take the stock level reported by the server after an update.
    pub fn sync_stock(&mut self, server: &Book) {
        self.quantity = server.quantity;
    }
}

/// Stock badge shown next to the price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockLabel {
    /// Below the low-stock threshold.
    Low(i64),
    /// Comfortably in stock.
    InStock(i64),
}

impl StockLabel {
    /// Whether this label should be highlighted.
    pub fn is_low(&self) -> bool {
        matches!(self, StockLabel::Low(_))
    }
}

impl fmt::Display for StockLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StockLabel::Low(n) => write!(f, "Only {} left!", n),
            StockLabel::InStock(n) => write!(f, "{} in stock", n),
        }
    }
}

/// An author record from `GET /api/authors`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Author {
    /// Catalog id, when the backend provides one.
    #[serde(default)]
    pub id: Option<u64>,
    /// Display name.
    pub name: String,
    /// Short biography.
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
}

/// Recommendations shown on the home view when the catalog is unreachable
/// or has nothing to recommend.
pub fn default_recommendations() -> Vec<Book> {
    vec![
        Book {
            id: BookId::new(1),
            title: "Distributed Systems: Principles and Paradigms".to_string(),
            author: "Andrew S. Tanenbaum".to_string(),
            description: "This book covers the principles, advanced concepts, and technologies \
                of distributed systems in detail, including communication, replication, fault \
                tolerance, and security."
                .to_string(),
            price: 79.99,
            topic: "distributed systems".to_string(),
            quantity: 10,
        },
        Book {
            id: BookId::new(2),
            title: "Database System Concepts".to_string(),
            author: "Abraham Silberschatz".to_string(),
            description: "Database System Concepts provides a comprehensive introduction to \
                database systems, covering database design, query languages, transaction \
                processing, and more."
                .to_string(),
            price: 89.99,
            topic: "undergraduate school".to_string(),
            quantity: 15,
        },
        Book {
            id: BookId::new(3),
            title: "Computer Networks".to_string(),
            author: "Andrew S. Tanenbaum".to_string(),
            description: "This classic textbook provides a comprehensive look at the \
                architecture, principles, and technologies of computer networks, from the \
                physical layer to the application layer."
                .to_string(),
            price: 69.99,
            topic: "undergraduate school".to_string(),
            quantity: 8,
        },
    ]
}
