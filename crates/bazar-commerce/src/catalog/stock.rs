//! Stock adjustment requests.

use crate::catalog::Book;
use crate::error::CommerceError;
use crate::ids::BookId;
use serde::{Deserialize, Serialize};

/// Body of `POST /api/catalog/add-stock`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRequest {
    /// Book to restock.
    pub item_id: BookId,
    /// Copies to add. Always positive.
    pub quantity: i64,
}

impl StockRequest {
    /// Create a request, rejecting non-positive quantities.
    pub fn new(item_id: BookId, quantity: i64) -> Result<Self, CommerceError> {
        if quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(quantity.to_string()));
        }
        Ok(Self { item_id, quantity })
    }

    /// Parse a quantity typed by the user.
    pub fn parse(item_id: BookId, input: &str) -> Result<Self, CommerceError> {
        let quantity = input
            .trim()
            .parse::<i64>()
            .map_err(|_| CommerceError::InvalidQuantity(input.trim().to_string()))?;
        Self::new(item_id, quantity)
    }
}

/// Response of `POST /api/catalog/add-stock`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StockUpdate {
    /// Whether the catalog accepted the update.
    #[serde(default)]
    pub success: bool,
    /// The book after the update.
    #[serde(default)]
    pub book: Option<Book>,
    /// Server message.
    #[serde(default)]
    pub message: Option<String>,
}
