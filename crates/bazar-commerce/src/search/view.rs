//! Result views for search and the home page.

use crate::catalog::{default_recommendations, Book};
use std::fmt;

pub const BEST_SELLERS_HEADING: &str = "Best Sellers";
pub const RECOMMENDED_HEADING: &str = "Recommended For You";
pub const NO_RESULTS_MESSAGE: &str = "No books found for this topic.";
pub const FEATURED_UNAVAILABLE_MESSAGE: &str = "Best seller information not available.";

/// Outcome of a search, ready to render.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchView {
    /// Topic search with at least one hit.
    Results { heading: String, books: Vec<Book> },
    /// Topic search with no hits.
    NoResults { heading: String },
    /// The featured best seller; `None` when the catalog had no record.
    Featured { book: Option<Book> },
    /// The request failed; shown inline in place of results.
    Error { message: String },
}

impl SearchView {
    /// Build the view for a topic search as the user labelled it.
    pub fn from_results(label: &str, books: Vec<Book>) -> Self {
        let heading = format!("Search Results for \"{}\"", label);
        if books.is_empty() {
            SearchView::NoResults { heading }
        } else {
            SearchView::Results { heading, books }
        }
    }

    pub fn search_error(err: impl fmt::Display) -> Self {
        SearchView::Error {
            message: format!("Error searching for books: {}", err),
        }
    }

    pub fn featured_error(err: impl fmt::Display) -> Self {
        SearchView::Error {
            message: format!("Error loading best seller information: {}", err),
        }
    }

    pub fn heading(&self) -> Option<&str> {
        match self {
            SearchView::Results { heading, .. } | SearchView::NoResults { heading } => {
                Some(heading.as_str())
            }
            SearchView::Featured { .. } => Some(BEST_SELLERS_HEADING),
            SearchView::Error { .. } => None,
        }
    }

    /// Books to render as cards.
    pub fn books(&self) -> &[Book] {
        match self {
            SearchView::Results { books, .. } => books.as_slice(),
            SearchView::Featured { book: Some(book) } => std::slice::from_ref(book),
            _ => &[],
        }
    }

    /// Placeholder text when there is nothing to render.
    pub fn message(&self) -> Option<&str> {
        match self {
            SearchView::NoResults { .. } => Some(NO_RESULTS_MESSAGE),
            SearchView::Featured { book: None } => Some(FEATURED_UNAVAILABLE_MESSAGE),
            SearchView::Error { message } => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, SearchView::Error { .. })
    }
}

/// Books shown on the home page.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeView {
    pub books: Vec<Book>,
    /// True when the built-in recommendations are shown instead of the
    /// catalog's.
    pub fallback: bool,
}

impl HomeView {
    pub fn heading(&self) -> &'static str {
        RECOMMENDED_HEADING
    }

    /// Use the catalog's recommendations, or the built-in ones when the
    /// request failed or returned nothing.
    pub fn from_recommended<E>(result: Result<Vec<Book>, E>) -> Self {
        match result {
            Ok(books) if !books.is_empty() => HomeView {
                books,
                fallback: false,
            },
            _ => HomeView {
                books: default_recommendations(),
                fallback: true,
            },
        }
    }
}
