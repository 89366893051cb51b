//! Typed client for the storefront API.

use crate::{FetchClient, FetchError};
use bazar_commerce::catalog::{
    Author, Book, EntryCreated, NewAuthor, NewBook, StockRequest, StockUpdate,
};
use bazar_commerce::checkout::{PurchaseRequest, PurchaseResponse};
use bazar_commerce::history::{HistoryPayload, HistoryRows, OrderDetail};
use bazar_commerce::ids::{BookId, OrderId, UserId};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

#[derive(Deserialize)]
struct BooksBody {
    #[serde(default)]
    books: Vec<Book>,
}

#[derive(Deserialize)]
struct BookBody {
    #[serde(default)]
    book: Option<Book>,
}

/// A list endpoint that may or may not wrap its array.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListBody<T> {
    Bare(Vec<T>),
    Books {
        books: Vec<T>,
    },
    Authors {
        authors: Vec<T>,
    },
}

impl<T> ListBody<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            ListBody::Bare(v) | ListBody::Books { books: v } | ListBody::Authors { authors: v } => v,
        }
    }
}

/// Endpoints of the storefront gateway.
#[derive(Debug, Clone)]
pub struct BazarApi {
    client: FetchClient,
}

impl BazarApi {
    pub fn new(client: FetchClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &FetchClient {
        &self.client
    }

    /// `GET /api/search/:term`
    pub async fn search(&self, term: &str) -> Result<Vec<Book>, FetchError> {
        let body: BooksBody = self.client.get(&["api", "search", term]).send_json().await?;
        debug!(term, results = body.books.len(), "search complete");
        Ok(body.books)
    }

    /// `GET /api/search/recommended`
    pub async fn recommended(&self) -> Result<Vec<Book>, FetchError> {
        let body: BooksBody = self
            .client
            .get(&["api", "search", "recommended"])
            .send_json()
            .await?;
        Ok(body.books)
    }

    /// `GET /api/info/:id`. `Ok(None)` when the catalog has no record.
    pub async fn info(&self, id: BookId) -> Result<Option<Book>, FetchError> {
        let id = id.to_string();
        let body: BookBody = self.client.get(&["api", "info", &id]).send_json().await?;
        Ok(body.book)
    }

    /// `GET /api/books`. Failures are logged and give an empty list.
    pub async fn books(&self) -> Vec<Book> {
        self.list(&["api", "books"]).await
    }

    /// `GET /api/authors`. Failures are logged and give an empty list.
    pub async fn authors(&self) -> Vec<Author> {
        self.list(&["api", "authors"]).await
    }

    async fn list<T: DeserializeOwned>(&self, segments: &[&str]) -> Vec<T> {
        match self.client.get(segments).send_json::<ListBody<T>>().await {
            Ok(body) => body.into_vec(),
            Err(e) => {
                warn!(path = %segments.join("/"), error = %e, "list request failed");
                Vec::new()
            }
        }
    }

    /// `POST /api/purchase/:id` under the client's retry policy.
    ///
    /// HTTP failures carry the server's `message` when it sent one. A 2xx
    /// body with `success = false` is returned as is.
    pub async fn purchase(
        &self,
        id: BookId,
        request: &PurchaseRequest,
    ) -> Result<PurchaseResponse, FetchError> {
        self.post_purchase(id, request, false).await
    }

    /// `POST /api/purchase/:id` sent exactly once. Cart checkout uses this
    /// so a line the server already committed is never bought again.
    pub async fn purchase_once(
        &self,
        id: BookId,
        request: &PurchaseRequest,
    ) -> Result<PurchaseResponse, FetchError> {
        self.post_purchase(id, request, true).await
    }

    async fn post_purchase(
        &self,
        id: BookId,
        request: &PurchaseRequest,
        once: bool,
    ) -> Result<PurchaseResponse, FetchError> {
        let id_str = id.to_string();
        let mut builder = self.client.post(&["api", "purchase", &id_str]).json(request);
        if once {
            builder = builder.once();
        }
        let response: PurchaseResponse = builder.send_json().await?;
        debug!(book_id = %id, success = response.success, once, "purchase answered");
        Ok(response)
    }

    /// `POST /api/catalog/add-stock`
    pub async fn add_stock(&self, request: &StockRequest) -> Result<StockUpdate, FetchError> {
        let update: StockUpdate = self
            .client
            .post(&["api", "catalog", "add-stock"])
            .json(request)
            .send_json()
            .await?;
        if !update.success {
            return Err(FetchError::Application(
                update
                    .message
                    .unwrap_or_else(|| "Stock update could not be completed".to_string()),
            ));
        }
        Ok(update)
    }

    /// `POST /api/books`, sent once.
    pub async fn create_book(&self, book: &NewBook) -> Result<EntryCreated, FetchError> {
        let created = self.create(&["api", "books"], book, "Book could not be added").await?;
        debug!(isbn = %book.isbn, "book created");
        Ok(created)
    }

    /// `POST /api/authors`, sent once.
    pub async fn create_author(&self, author: &NewAuthor) -> Result<EntryCreated, FetchError> {
        let created = self
            .create(&["api", "authors"], author, "Author could not be added")
            .await?;
        debug!(name = %author.name, "author created");
        Ok(created)
    }

    async fn create<B: serde::Serialize>(
        &self,
        segments: &[&str],
        body: &B,
        fallback: &str,
    ) -> Result<EntryCreated, FetchError> {
        let created: EntryCreated = self
            .client
            .post(segments)
            .json(body)
            .once()
            .send_json()
            .await?;
        if !created.success {
            return Err(FetchError::Application(
                created.message.unwrap_or_else(|| fallback.to_string()),
            ));
        }
        Ok(created)
    }

    /// `GET /api/orders`
    pub async fn orders(&self) -> Result<HistoryRows, FetchError> {
        let payload: HistoryPayload = self.client.get(&["api", "orders"]).send_json().await?;
        Ok(payload.into_rows())
    }

    /// `GET /api/orders/:id`
    pub async fn order_detail(&self, id: &OrderId) -> Result<OrderDetail, FetchError> {
        self.client
            .get(&["api", "orders", id.as_str()])
            .send_json()
            .await
    }

    /// `GET /api/purchase-history[?user_id=]`
    pub async fn purchase_history(&self, user_id: Option<&UserId>) -> Result<HistoryRows, FetchError> {
        let query: Vec<(&str, &str)> = user_id
            .map(|u| vec![("user_id", u.as_str())])
            .unwrap_or_default();
        let payload: HistoryPayload = self
            .client
            .get(&["api", "purchase-history"])
            .query(&query)
            .send_json()
            .await?;
        Ok(payload.into_rows())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockReply, MockTransport};
    use crate::{Method, RetryPolicy};
    use serde_json::json;
    use std::sync::Arc;

    fn api(mock: &MockTransport) -> BazarApi {
        let client = FetchClient::new("http://localhost:5005", Arc::new(mock.clone()))
            .unwrap()
            .with_retry(RetryPolicy::none());
        BazarApi::new(client)
    }

    fn book_json(id: u64, topic: &str) -> serde_json::Value {
        json!({"id": id, "title": format!("Book {id}"), "author": "A",
               "description": "d", "price": 10.0, "topic": topic, "quantity": 3})
    }

    #[tokio::test]
    async fn test_search_encodes_term() {
        let mock = MockTransport::new();
        mock.get_json(
            "/api/search/distributed%20systems",
            json!({"books": [book_json(1, "distributed systems")]}),
        );
        let books = api(&mock).search("distributed systems").await.unwrap();
        assert_eq!(books.len(), 1);
    }

    #[tokio::test]
    async fn test_search_server_error_has_message() {
        let mock = MockTransport::new();
        mock.on(
            Method::Get,
            "/api/search/db",
            MockReply::status(500, json!({"error": "catalog unavailable", "books": []})),
        );
        let err = api(&mock).search("db").await.unwrap_err();
        assert_eq!(err.to_string(), "catalog unavailable");
    }

    #[tokio::test]
    async fn test_info_missing_book() {
        let mock = MockTransport::new();
        mock.get_json("/api/info/5", json!({"book": null}));
        assert_eq!(api(&mock).info(BookId::new(5)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_lists_degrade_to_empty() {
        let mock = MockTransport::new();
        mock.get_json("/api/books", json!([book_json(1, "x"), book_json(2, "y")]));
        mock.on(Method::Get, "/api/authors", MockReply::network_error());

        let api = api(&mock);
        assert_eq!(api.books().await.len(), 2);
        assert!(api.authors().await.is_empty());
    }

    #[tokio::test]
    async fn test_wrapped_author_list() {
        let mock = MockTransport::new();
        mock.get_json("/api/authors", json!({"authors": [{"name": "Tanenbaum"}]}));
        let authors = api(&mock).authors().await;
        assert_eq!(authors[0].name, "Tanenbaum");
    }

    #[tokio::test]
    async fn test_purchase_rejection_message() {
        let mock = MockTransport::new();
        mock.on(
            Method::Post,
            "/api/purchase/4",
            MockReply::status(400, json!({"success": false, "message": "Book is out of stock"})),
        );
        let err = api(&mock)
            .purchase(BookId::new(4), &PurchaseRequest::single("12 Main Street", "PayPal"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Book is out of stock");
    }

    #[tokio::test]
    async fn test_add_stock_application_failure() {
        let mock = MockTransport::new();
        mock.post_json("/api/catalog/add-stock", json!({"success": false, "message": "nope"}));
        let req = StockRequest::new(BookId::new(1), 2).unwrap();
        let err = api(&mock).add_stock(&req).await.unwrap_err();
        assert_eq!(err, FetchError::Application("nope".into()));
    }

    fn new_book() -> NewBook {
        NewBook {
            isbn: "9780132392273".into(),
            title: "Distributed Systems".into(),
            author_id: 4,
            price: 79.99,
            pages: Some(700),
            quantity: 5,
            description: None,
            cover_url: None,
        }
    }

    #[tokio::test]
    async fn test_create_book_posts_draft() {
        let mock = MockTransport::new();
        mock.post_json(
            "/api/books",
            json!({"success": true, "book": book_json(9, "distributed systems")}),
        );
        let created = api(&mock).create_book(&new_book()).await.unwrap();
        assert_eq!(created.book.unwrap().id, BookId::new(9));

        let body = mock.requests()[0].body.clone().unwrap();
        assert_eq!(body["isbn"], "9780132392273");
        assert_eq!(body["author_id"], 4);
        assert!(body.get("description").is_none());
    }

    #[tokio::test]
    async fn test_create_is_not_retried() {
        let mock = MockTransport::new();
        mock.on(Method::Post, "/api/authors", MockReply::status(503, json!({"error": "down"})))
            .on(Method::Post, "/api/authors", MockReply::ok(json!({"success": true})));
        let client = FetchClient::new("http://localhost:5005", Arc::new(mock.clone()))
            .unwrap()
            .with_retry(RetryPolicy::new(3).with_backoff(crate::BackoffStrategy::None));
        let author = NewAuthor {
            name: "Kleppmann".into(),
            age: 40,
        };

        let err = BazarApi::new(client).create_author(&author).await.unwrap_err();
        assert_eq!(err.status(), Some(503));
        assert_eq!(mock.count("/api/authors"), 1);
    }

    #[tokio::test]
    async fn test_create_book_application_failure() {
        let mock = MockTransport::new();
        mock.post_json("/api/books", json!({"success": false}));
        let err = api(&mock).create_book(&new_book()).await.unwrap_err();
        assert_eq!(err, FetchError::Application("Book could not be added".into()));
    }

    #[tokio::test]
    async fn test_purchase_history_query() {
        let mock = MockTransport::new();
        mock.get_json("/api/purchase-history", json!({"orders": []}));
        let user = UserId::new("reader-7");
        api(&mock).purchase_history(Some(&user)).await.unwrap();
        api(&mock).purchase_history(None).await.unwrap();

        let requests = mock.requests();
        assert!(requests[0].url.ends_with("/api/purchase-history?user_id=reader-7"));
        assert!(requests[1].url.ends_with("/api/purchase-history"));
    }
}
