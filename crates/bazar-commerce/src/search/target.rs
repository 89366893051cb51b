//! Resolution of navigation labels into catalog queries.

use crate::ids::BookId;
use serde::{Deserialize, Serialize};

/// Label that shows the featured best seller.
pub const BEST_SELLERS: &str = "best sellers";
/// Label that browses recent titles.
pub const NEW_RELEASES: &str = "new releases";
/// Label that browses discounted titles.
pub const SPECIAL_OFFERS: &str = "special offers";

/// Book featured under [`BEST_SELLERS`].
pub const BEST_SELLER_ID: BookId = BookId::new(5);

/// What a search label turns into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchTarget {
    /// Fetch one book by id and feature it.
    Featured(BookId),
    /// Search the catalog by topic.
    Term(String),
}

impl SearchTarget {
    /// Map a label to a query.
    ///
    /// The three navigation labels are matched exactly; anything else is
    /// searched as typed.
    pub fn resolve(label: &str) -> Self {
        match label {
            BEST_SELLERS => SearchTarget::Featured(BEST_SELLER_ID),
            NEW_RELEASES => SearchTarget::Term("distributed systems".to_string()),
            SPECIAL_OFFERS => SearchTarget::Term("undergraduate school".to_string()),
            other => SearchTarget::Term(other.to_string()),
        }
    }

    /// The search term, if this is a topic search.
    pub fn term(&self) -> Option<&str> {
        match self {
            SearchTarget::Term(t) => Some(t),
            SearchTarget::Featured(_) => None,
        }
    }
}
