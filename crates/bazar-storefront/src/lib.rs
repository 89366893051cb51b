//! Storefront components for the Bazar bookstore client.
//!
//! Each component receives its collaborators through its constructor: the
//! typed API client, a [`Notifier`] for toasts, a [`KvStore`] for durable
//! state and, for reports, a [`DownloadTrigger`]. [`Storefront`] wires them
//! together over one store.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use bazar_cache::MemoryStore;
//! use bazar_data::{BazarApi, FetchClient, ReportUrls, ReqwestTransport};
//! use bazar_storefront::{Download, DownloadTrigger, RecordingNotifier, Storefront, StorefrontError};
//!
//! struct PrintLink;
//!
//! #[async_trait::async_trait]
//! impl DownloadTrigger for PrintLink {
//!     async fn trigger(&self, download: Download) -> Result<(), StorefrontError> {
//!         println!("{}", download.url);
//!         Ok(())
//!     }
//! }
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = Arc::new(ReqwestTransport::new(Duration::from_secs(5))?);
//! let api = BazarApi::new(FetchClient::new("http://localhost:5005", transport)?);
//! let urls = ReportUrls::new("http://localhost:5002")?;
//!
//! let mut store = Storefront::new(
//!     api,
//!     urls,
//!     MemoryStore::new(),
//!     Arc::new(RecordingNotifier::new()),
//!     Arc::new(PrintLink),
//! )?;
//! let view = store.catalog.search("databases").await;
//! if let Some(book) = view.books().first() {
//!     store.cart.add(book)?;
//! }
//! # Ok(())
//! # }
//! ```

mod cart;
mod catalog;
mod error;
mod history;
mod notify;
mod reports;

pub use cart::{CartController, CartSummary};
pub use catalog::{CatalogView, BOOK_UNAVAILABLE_MESSAGE};
pub use error::StorefrontError;
pub use history::{HistoryState, HistoryView, EMPTY_HISTORY_MESSAGE, HISTORY_ERROR_MESSAGE};
pub use notify::{
    Notifier, RecordingNotifier, Toast, ToastLevel, DEFAULT_TOAST_DURATION, LONG_TOAST_DURATION,
};
pub use reports::{Download, DownloadMode, DownloadTrigger, ReportsController};

use bazar_cache::{Cache, KvStore, Session};
use bazar_commerce::cart::Cart;
use bazar_commerce::ids::UserId;
use bazar_data::{BazarApi, ReportUrls};
use std::sync::Arc;

/// All storefront components sharing one store and one notifier.
pub struct Storefront<S> {
    pub catalog: CatalogView,
    pub cart: CartController<S>,
    pub history: HistoryView,
    pub reports: ReportsController,
    cache: Cache<S>,
}

impl<S: KvStore + Clone> Storefront<S> {
    /// Rehydrate the cart from `store` and build every component.
    pub fn new(
        api: BazarApi,
        report_urls: ReportUrls,
        store: S,
        notifier: Arc<dyn Notifier>,
        trigger: Arc<dyn DownloadTrigger>,
    ) -> Result<Self, StorefrontError> {
        let cart = Cart::load(Cache::new(store.clone()))?;
        Ok(Self {
            catalog: CatalogView::new(api.clone(), notifier.clone()),
            cart: CartController::new(cart, api.clone(), notifier.clone()),
            history: HistoryView::new(api),
            reports: ReportsController::new(report_urls, trigger, notifier),
            cache: Cache::new(store),
        })
    }

    pub fn session(&self) -> Result<Session, StorefrontError> {
        Ok(Session::load(&self.cache)?)
    }

    pub fn save_session(&self, session: &Session) -> Result<(), StorefrontError> {
        Ok(session.save(&self.cache)?)
    }

    /// Order history for the session's user, or all orders when unknown.
    pub async fn load_history(&self) -> Result<HistoryState, StorefrontError> {
        let session = self.session()?;
        let user = session.user_id.map(UserId::new);
        Ok(self.history.load(user.as_ref()).await)
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        CartController, CatalogView, Download, DownloadMode, DownloadTrigger, HistoryState,
        HistoryView, Notifier, ReportsController, Storefront, StorefrontError, Toast, ToastLevel,
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bazar_cache::MemoryStore;
    use bazar_data::mock::MockTransport;
    use bazar_data::{FetchClient, RetryPolicy};
    use serde_json::json;

    struct NoDownloads;

    #[async_trait]
    impl DownloadTrigger for NoDownloads {
        async fn trigger(&self, _download: Download) -> Result<(), StorefrontError> {
            Ok(())
        }
    }

    fn storefront(mock: &MockTransport, store: MemoryStore) -> Storefront<MemoryStore> {
        let client = FetchClient::new("http://localhost:5005", Arc::new(mock.clone()))
            .unwrap()
            .with_retry(RetryPolicy::none());
        Storefront::new(
            BazarApi::new(client),
            ReportUrls::new("http://localhost:5002").unwrap(),
            store,
            Arc::new(RecordingNotifier::new()),
            Arc::new(NoDownloads),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_history_scoped_to_session_user() {
        let mock = MockTransport::new();
        mock.get_json("/api/purchase-history", json!([]));
        let store = MemoryStore::new();
        let front = storefront(&mock, store);

        front
            .save_session(&Session {
                user_id: Some("reader-3".into()),
                is_admin: false,
            })
            .unwrap();
        assert_eq!(front.load_history().await.unwrap(), HistoryState::Empty);
        assert!(mock.requests()[0].url.ends_with("/api/purchase-history?user_id=reader-3"));
    }

    #[tokio::test]
    async fn test_cart_shared_through_store() {
        let mock = MockTransport::new();
        mock.get_json(
            "/api/search/databases",
            json!({"books": [{"id": 4, "title": "DB", "author": "A", "price": 12.0,
                              "topic": "databases", "quantity": 2}]}),
        );
        let store = MemoryStore::new();
        let mut front = storefront(&mock, store.clone());

        let view = front.catalog.search("databases").await;
        front.cart.add(&view.books()[0]).unwrap();

        let reopened = storefront(&mock, store);
        assert_eq!(reopened.cart.summary().badge, 1);
    }
}
