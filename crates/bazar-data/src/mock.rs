//! Scripted in-memory transport for tests.
//!
//! Replies are registered per method and path. Each route serves its replies
//! in order and then keeps repeating the last one. Every request is recorded.

use crate::{FetchError, Method, Request, Response, Transport};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A canned reply.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Respond with a JSON body.
    Json(u16, serde_json::Value),
    /// Respond with raw bytes.
    Bytes(u16, Vec<u8>),
    /// Fail without a response.
    Fail(FetchError),
    /// Wait, then produce the inner reply.
    Delayed(Duration, Box<MockReply>),
}

impl MockReply {
    pub fn ok(body: serde_json::Value) -> Self {
        MockReply::Json(200, body)
    }

    pub fn status(status: u16, body: serde_json::Value) -> Self {
        MockReply::Json(status, body)
    }

    pub fn network_error() -> Self {
        MockReply::Fail(FetchError::Network("connection refused".into()))
    }

    pub fn after(self, delay: Duration) -> Self {
        MockReply::Delayed(delay, Box::new(self))
    }
}

/// A request as seen by the mock.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: Method,
    /// Full URL, including the query string.
    pub url: String,
    /// Path component only.
    pub path: String,
    /// Body decoded as JSON, when there was one.
    pub body: Option<serde_json::Value>,
}

#[derive(Debug, Default)]
struct MockState {
    routes: HashMap<(Method, String), VecDeque<MockReply>>,
    requests: Vec<RecordedRequest>,
}

/// Scripted transport. Clones share routes and the request log.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply for `method` on `path` (e.g. `/api/search/databases`).
    ///
    /// `path` is matched against the percent-encoded request path.
    pub fn on(&self, method: Method, path: &str, reply: MockReply) -> &Self {
        if let Ok(mut state) = self.state.lock() {
            state
                .routes
                .entry((method, path.to_string()))
                .or_default()
                .push_back(reply);
        }
        self
    }

    /// Shorthand for a `GET` route answering 200 with `body`.
    pub fn get_json(&self, path: &str, body: serde_json::Value) -> &Self {
        self.on(Method::Get, path, MockReply::ok(body))
    }

    /// Shorthand for a `POST` route answering 200 with `body`.
    pub fn post_json(&self, path: &str, body: serde_json::Value) -> &Self {
        self.on(Method::Post, path, MockReply::ok(body))
    }

    /// Every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state
            .lock()
            .map(|s| s.requests.clone())
            .unwrap_or_default()
    }

    /// Number of requests received for `path`.
    pub fn count(&self, path: &str) -> usize {
        self.requests().iter().filter(|r| r.path == path).count()
    }

    fn next_reply(&self, method: Method, path: &str) -> Option<MockReply> {
        let mut state = self.state.lock().ok()?;
        let queue = state.routes.get_mut(&(method, path.to_string()))?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }

    fn record(&self, request: &Request, path: &str) {
        let body = request.json_body();
        if let Ok(mut state) = self.state.lock() {
            state.requests.push(RecordedRequest {
                method: request.method,
                url: request.url.clone(),
                path: path.to_string(),
                body,
            });
        }
    }
}

fn path_of(url: &str) -> String {
    reqwest::Url::parse(url)
        .map(|u| u.path().to_string())
        .unwrap_or_else(|_| url.to_string())
}

async fn resolve(reply: MockReply) -> Result<Response, FetchError> {
    let mut reply = reply;
    loop {
        match reply {
            MockReply::Json(status, body) => {
                let mut headers = HashMap::new();
                headers.insert("Content-Type".to_string(), "application/json".to_string());
                return Ok(Response::new(status, headers, body.to_string().into_bytes()));
            }
            MockReply::Bytes(status, body) => {
                return Ok(Response::new(status, HashMap::new(), body));
            }
            MockReply::Fail(err) => return Err(err),
            MockReply::Delayed(delay, inner) => {
                tokio::time::sleep(delay).await;
                reply = *inner;
            }
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: Request) -> Result<Response, FetchError> {
        let path = path_of(&request.url);
        self.record(&request, &path);

        match self.next_reply(request.method, &path) {
            Some(reply) => resolve(reply).await,
            None => resolve(MockReply::status(
                404,
                serde_json::json!({"message": format!("no route for {} {}", request.method.as_str(), path)}),
            ))
            .await,
        }
    }
}
