//! Search, home page and book detail components.

use crate::notify::Notifier;
use crate::StorefrontError;
use bazar_commerce::catalog::{
    filter_authors, filter_books, Author, Book, EntryCreated, NewAuthorForm, NewBookForm,
    StockRequest,
};
use bazar_commerce::checkout::{PurchaseRequest, PurchaseResponse};
use bazar_commerce::ids::BookId;
use bazar_commerce::search::{HomeView, SearchTarget, SearchView};
use bazar_data::BazarApi;
use std::sync::Arc;
use tracing::{debug, warn};

pub const BOOK_UNAVAILABLE_MESSAGE: &str = "Book information not available";

/// Catalog browsing backed by the storefront API.
#[derive(Clone)]
pub struct CatalogView {
    api: BazarApi,
    notifier: Arc<dyn Notifier>,
}

impl CatalogView {
    pub fn new(api: BazarApi, notifier: Arc<dyn Notifier>) -> Self {
        Self { api, notifier }
    }

    /// Run a search for a navigation label or free text.
    ///
    /// Failures are rendered inline rather than toasted.
    pub async fn search(&self, label: &str) -> SearchView {
        match SearchTarget::resolve(label) {
            SearchTarget::Featured(id) => match self.api.info(id).await {
                Ok(book) => SearchView::Featured { book },
                Err(e) => {
                    warn!(book_id = %id, error = %e, "featured book lookup failed");
                    SearchView::featured_error(e)
                }
            },
            SearchTarget::Term(term) => match self.api.search(&term).await {
                Ok(books) => {
                    debug!(label, term = %term, results = books.len(), "search rendered");
                    SearchView::from_results(label, books)
                }
                Err(e) => {
                    warn!(term = %term, error = %e, "search failed");
                    SearchView::search_error(e)
                }
            },
        }
    }

    /// Recommendations for the home page, never empty.
    pub async fn home(&self) -> HomeView {
        let view = HomeView::from_recommended(self.api.recommended().await);
        if view.fallback {
            debug!("showing default recommendations");
        }
        view
    }

    /// Load one book for the detail view, toasting on failure.
    pub async fn details(&self, id: BookId) -> Option<Book> {
        match self.api.info(id).await {
            Ok(Some(book)) => Some(book),
            Ok(None) => {
                self.notifier.error(BOOK_UNAVAILABLE_MESSAGE);
                None
            }
            Err(e) => {
                self.notifier
                    .error(&format!("Error loading book details: {}", e));
                None
            }
        }
    }

    /// Buy a single copy from the detail view.
    ///
    /// On success the local copy loses one unit of stock; the next fetch
    /// corrects it if the server disagrees.
    pub async fn purchase(
        &self,
        book: &mut Book,
        shipping_address: &str,
        payment_method: &str,
    ) -> Result<PurchaseResponse, StorefrontError> {
        let request = PurchaseRequest::checked_single(shipping_address, payment_method)?;

        let response = match self.api.purchase(book.id, &request).await {
            Ok(resp) if resp.success => resp,
            Ok(resp) => {
                let message = resp
                    .message
                    .unwrap_or_else(|| "Purchase could not be completed".to_string());
                self.notifier.error(&message);
                return Err(bazar_data::FetchError::Application(message).into());
            }
            Err(e) => {
                self.notifier.error(&e.to_string());
                return Err(e.into());
            }
        };

        book.record_purchase();
        self.notifier
            .success(&format!("Successfully purchased \"{}\"!", book.title));
        if let Some(savings) = response.savings_message() {
            self.notifier.info(&savings);
        }
        Ok(response)
    }

    /// Add copies to a book's stock from user input.
    ///
    /// The quantity is checked before anything is sent.
    pub async fn add_stock(&self, book: &mut Book, input: &str) -> Result<i64, StorefrontError> {
        let request = match StockRequest::parse(book.id, input) {
            Ok(req) => req,
            Err(e) => {
                self.notifier.error("Please enter a valid quantity");
                return Err(e.into());
            }
        };

        match self.api.add_stock(&request).await {
            Ok(update) => {
                if let Some(server) = &update.book {
                    book.sync_stock(server);
                }
                self.notifier.success(&format!(
                    "Added {} copies of \"{}\" to stock",
                    request.quantity, book.title
                ));
                Ok(book.quantity)
            }
            Err(e) => {
                self.notifier.error(&format!("Error updating stock: {}", e));
                Err(e.into())
            }
        }
    }

    /// Add a book to the catalog from the add-book form.
    pub async fn create_book(&self, form: &NewBookForm) -> Result<EntryCreated, StorefrontError> {
        let book = match form.validate() {
            Ok(book) => book,
            Err(e) => {
                self.notifier.error(&e.to_string());
                return Err(e.into());
            }
        };

        match self.api.create_book(&book).await {
            Ok(created) => {
                self.notifier.success("Book added successfully!");
                Ok(created)
            }
            Err(e) => {
                self.notifier.error(&format!("Failed to add book: {}", e));
                Err(e.into())
            }
        }
    }

    /// Add an author from the add-author form.
    pub async fn create_author(
        &self,
        form: &NewAuthorForm,
    ) -> Result<EntryCreated, StorefrontError> {
        let author = match form.validate() {
            Ok(author) => author,
            Err(e) => {
                self.notifier.error(&e.to_string());
                return Err(e.into());
            }
        };

        match self.api.create_author(&author).await {
            Ok(created) => {
                self.notifier.success("Author added successfully");
                Ok(created)
            }
            Err(e) => {
                self.notifier.error(&format!("Failed to add author: {}", e));
                Err(e.into())
            }
        }
    }

    pub async fn books(&self) -> Vec<Book> {
        self.api.books().await
    }

    pub async fn authors(&self) -> Vec<Author> {
        self.api.authors().await
    }

    /// Books whose title or author contains `term`; all of them when blank.
    pub async fn books_matching(&self, term: &str) -> Vec<Book> {
        let books = self.books().await;
        filter_books(&books, term).into_iter().cloned().collect()
    }

    /// Authors whose name contains `term`; all of them when blank.
    pub async fn authors_matching(&self, term: &str) -> Vec<Author> {
        let authors = self.authors().await;
        filter_authors(&authors, term).into_iter().cloned().collect()
    }
}
