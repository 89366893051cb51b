//! Base-URL bound HTTP client with retry.

use crate::{FetchError, Method, Request, RequestBuilder, Response, RetryPolicy, Transport};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// HTTP client for one backend.
///
/// Paths are given as segments and percent-encoded individually, so a search
/// term containing `/` or `?` stays a single segment.
#[derive(Clone)]
pub struct FetchClient {
    base_url: Url,
    transport: Arc<dyn Transport>,
    retry: RetryPolicy,
    default_headers: HashMap<String, String>,
}

impl std::fmt::Debug for FetchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchClient")
            .field("base_url", &self.base_url.as_str())
            .field("retry", &self.retry)
            .finish()
    }
}

impl FetchClient {
    /// Create a client for `base_url`. Retries are off until
    /// [`with_retry`](Self::with_retry) is called.
    pub fn new(base_url: &str, transport: Arc<dyn Transport>) -> Result<Self, FetchError> {
        let base_url = parse_base(base_url)?;
        Ok(Self {
            base_url,
            transport,
            retry: RetryPolicy::none(),
            default_headers: HashMap::new(),
        })
    }

    /// Set the retry policy used by every request.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Add a default header that will be included in all requests.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Build `base/segment/segment?query`.
    pub fn url(&self, segments: &[&str], query: &[(&str, &str)]) -> Result<Url, FetchError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// Create a GET request.
    pub fn get(&self, segments: &[&str]) -> ClientRequestBuilder<'_> {
        self.request(Method::Get, segments)
    }

    /// Create a POST request.
    pub fn post(&self, segments: &[&str]) -> ClientRequestBuilder<'_> {
        self.request(Method::Post, segments)
    }

    /// Create a request with a custom method.
    pub fn request(&self, method: Method, segments: &[&str]) -> ClientRequestBuilder<'_> {
        let url = self.url(segments, &[]);
        let builder = url.map(|url| {
            let mut builder = RequestBuilder::new(method, url.to_string());
            for (key, value) in &self.default_headers {
                builder = builder.header(key.clone(), value.clone());
            }
            builder.accept("application/json")
        });
        ClientRequestBuilder {
            client: self,
            builder,
            retry: None,
        }
    }

    /// Send a prepared request, retrying 5xx responses and network
    /// failures according to the client's policy. The last response is
    /// returned even if it is still a 5xx.
    pub async fn execute(&self, request: Request) -> Result<Response, FetchError> {
        self.execute_with(request, &self.retry).await
    }

    /// Like [`execute`](Self::execute) with an explicit policy.
    pub async fn execute_with(
        &self,
        request: Request,
        retry: &RetryPolicy,
    ) -> Result<Response, FetchError> {
        let mut attempt = 0;
        loop {
            match self.transport.send(request.clone()).await {
                Ok(resp) if retry.should_retry_status(resp.status, attempt) => {
                    let delay = retry.delay(attempt);
                    warn!(
                        url = %request.url,
                        status = resp.status,
                        retries_left = retry.max_retries - attempt,
                        delay_ms = delay.as_millis() as u64,
                        "server error, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Ok(resp) => {
                    debug!(
                        method = request.method.as_str(),
                        url = %request.url,
                        status = resp.status,
                        attempt,
                        "request complete"
                    );
                    return Ok(resp);
                }
                Err(e) if retry.should_retry(&e, attempt) => {
                    let delay = retry.delay(attempt);
                    warn!(
                        url = %request.url,
                        error = %e,
                        retries_left = retry.max_retries - attempt,
                        delay_ms = delay.as_millis() as u64,
                        "fetch failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
            attempt += 1;
        }
    }
}

fn parse_base(base_url: &str) -> Result<Url, FetchError> {
    let url = Url::parse(base_url.trim())
        .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", base_url, e)))?;
    if url.cannot_be_a_base() {
        return Err(FetchError::InvalidUrl(base_url.to_string()));
    }
    Ok(url)
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder<'a> {
    client: &'a FetchClient,
    builder: Result<RequestBuilder, FetchError>,
    retry: Option<RetryPolicy>,
}

impl<'a> ClientRequestBuilder<'a> {
    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.map(|b| b.header(key, value));
        self
    }

    /// Append query parameters.
    pub fn query(mut self, pairs: &[(&str, &str)]) -> Self {
        if pairs.is_empty() {
            return self;
        }
        self.builder = self.builder.and_then(|b| b.query(pairs));
        self
    }

    /// Send this request at most once, whatever the client's policy.
    /// For requests that must not be repeated, such as a purchase the
    /// server may already have committed.
    pub fn once(mut self) -> Self {
        self.retry = Some(RetryPolicy::none());
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: Serialize + ?Sized>(mut self, value: &T) -> Self {
        self.builder = self.builder.and_then(|b| b.json(value));
        self
    }

    /// Send the request and return the response, whatever its status.
    pub async fn send(self) -> Result<Response, FetchError> {
        let request = self.builder?.build();
        match &self.retry {
            Some(retry) => self.client.execute_with(request, retry).await,
            None => self.client.execute(request).await,
        }
    }

    /// Send the request and decode a 2xx JSON body.
    pub async fn send_json<T: DeserializeOwned>(self) -> Result<T, FetchError> {
        self.send().await?.error_for_status()?.json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockReply, MockTransport};
    use crate::BackoffStrategy;
    use serde_json::json;

    fn client(mock: &MockTransport) -> FetchClient {
        FetchClient::new("http://localhost:5005", Arc::new(mock.clone()))
            .unwrap()
            .with_retry(RetryPolicy::new(3).with_backoff(BackoffStrategy::None))
    }

    #[test]
    fn test_url_encodes_segments() {
        let mock = MockTransport::new();
        let c = client(&mock);
        let url = c.url(&["api", "search", "c++/rust?"], &[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5005/api/search/c++%2Frust%3F");
    }

    #[test]
    fn test_url_with_base_path_and_query() {
        let mock = MockTransport::new();
        let c = FetchClient::new("http://reports:5002/bazar/", Arc::new(mock)).unwrap();
        let url = c
            .url(&["api", "reports"], &[("format", "pdf"), ("user_id", "u 1")])
            .unwrap();
        assert_eq!(url.as_str(), "http://reports:5002/bazar/api/reports?format=pdf&user_id=u+1");
    }

    #[test]
    fn test_invalid_base_url() {
        let mock = MockTransport::new();
        assert!(matches!(
            FetchClient::new("not a url", Arc::new(mock)),
            Err(FetchError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_retries_server_errors_then_succeeds() {
        let mock = MockTransport::new();
        mock.on(Method::Get, "/api/info/1", MockReply::status(503, json!({})))
            .on(Method::Get, "/api/info/1", MockReply::network_error())
            .on(Method::Get, "/api/info/1", MockReply::ok(json!({"book": null})));

        let resp = client(&mock).get(&["api", "info", "1"]).send().await.unwrap();
        assert!(resp.is_success());
        assert_eq!(mock.count("/api/info/1"), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_retries() {
        let mock = MockTransport::new();
        mock.on(Method::Get, "/api/orders", MockReply::status(500, json!({"error": "db down"})));

        let err = client(&mock)
            .get(&["api", "orders"])
            .send_json::<serde_json::Value>()
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.to_string(), "db down");
        assert_eq!(mock.count("/api/orders"), 4);
    }

    #[tokio::test]
    async fn test_does_not_retry_client_errors() {
        let mock = MockTransport::new();
        mock.on(Method::Get, "/api/info/99", MockReply::status(404, json!({"message": "Book not found"})));

        let resp = client(&mock).get(&["api", "info", "99"]).send().await.unwrap();
        assert_eq!(resp.status, 404);
        assert_eq!(mock.count("/api/info/99"), 1);
    }

    #[tokio::test]
    async fn test_network_error_surfaces_after_retries() {
        let mock = MockTransport::new();
        mock.on(Method::Get, "/api/books", MockReply::network_error());

        let err = client(&mock).get(&["api", "books"]).send().await.unwrap_err();
        assert!(matches!(err, FetchError::Network(_)));
        assert_eq!(mock.count("/api/books"), 4);
    }

    #[tokio::test]
    async fn test_json_body_and_query_are_sent() {
        let mock = MockTransport::new();
        mock.post_json("/api/catalog/add-stock", json!({"success": true}));

        client(&mock)
            .post(&["api", "catalog", "add-stock"])
            .query(&[("source", "cli")])
            .json(&json!({"item_id": 3, "quantity": 2}))
            .send()
            .await
            .unwrap();

        let recorded = &mock.requests()[0];
        assert_eq!(recorded.method, Method::Post);
        assert!(recorded.url.ends_with("?source=cli"));
        assert_eq!(recorded.body, Some(json!({"item_id": 3, "quantity": 2})));
    }

    #[tokio::test]
    async fn test_once_ignores_client_retry_policy() {
        let mock = MockTransport::new();
        mock.on(Method::Post, "/api/purchase/1", MockReply::status(502, json!({})))
            .on(Method::Post, "/api/purchase/1", MockReply::ok(json!({"success": true})));

        let resp = client(&mock)
            .post(&["api", "purchase", "1"])
            .json(&json!({"shipping_address": "12 Main Street"}))
            .once()
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status, 502);
        assert_eq!(mock.count("/api/purchase/1"), 1);
    }
}
