//! Client-side list filtering.

use crate::catalog::{Author, Book};

fn matches(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Books whose title or author contains `term`, ignoring case. A blank term
/// keeps every book.
pub fn filter_books<'a>(books: &'a [Book], term: &str) -> Vec<&'a Book> {
    let term = term.trim().to_lowercase();
    books
        .iter()
        .filter(|b| matches(&b.title, &term) || matches(&b.author, &term))
        .collect()
}

/// Authors whose name contains `term`, ignoring case.
pub fn filter_authors<'a>(authors: &'a [Author], term: &str) -> Vec<&'a Author> {
    let term = term.trim().to_lowercase();
    authors.iter().filter(|a| matches(&a.name, &term)).collect()
}
