//! HTTP client utilities for the Bazar storefront client.
//!
//! [`FetchClient`] binds a base URL, a [`Transport`] and a [`RetryPolicy`];
//! [`BazarApi`] puts typed endpoints on top of it and [`ReportUrls`] builds
//! links into the separate reporting service.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use bazar_data::{BazarApi, FetchClient, ReqwestTransport, RetryPolicy};
//!
//! # async fn run() -> Result<(), bazar_data::FetchError> {
//! let transport = Arc::new(ReqwestTransport::new(Duration::from_secs(5))?);
//! let client = FetchClient::new("http://localhost:5005", transport)?
//!     .with_retry(RetryPolicy::default());
//! let api = BazarApi::new(client);
//!
//! for book in api.search("distributed systems").await? {
//!     println!("{} ({})", book.title, book.display_price());
//! }
//! # Ok(())
//! # }
//! ```

mod api;
mod client;
mod error;
mod reports;
mod request;
mod response;
mod retry;
mod transport;

#[cfg(any(test, feature = "test-util"))]
pub mod mock;

pub use api::BazarApi;
pub use client::{ClientRequestBuilder, FetchClient};
pub use error::FetchError;
pub use reports::{ReportFormat, ReportKind, ReportUrls};
pub use request::{Method, Request, RequestBuilder};
pub use response::Response;
pub use retry::{BackoffStrategy, RetryPolicy};
pub use transport::{ReqwestTransport, Transport};
