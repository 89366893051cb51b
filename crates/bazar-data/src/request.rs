//! Outgoing requests.

use crate::FetchError;
use serde::Serialize;
use std::collections::HashMap;

/// The two verbs the bookstore API uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        }
    }
}

/// A fully-resolved request handed to a [`Transport`](crate::Transport).
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub body: Option<Vec<u8>>,
}

impl Request {
    /// The body decoded as JSON, if there is one.
    pub fn json_body<T: serde::de::DeserializeOwned>(&self) -> Option<T> {
        self.body
            .as_deref()
            .and_then(|body| serde_json::from_slice(body).ok())
    }
}

/// Accumulates headers and an optional JSON body for one request.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    method: Method,
    url: String,
    headers: HashMap<String, String>,
    body: Option<Vec<u8>>,
}

impl RequestBuilder {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Serialize `value` as the body and mark it as JSON.
    pub fn json<T: Serialize + ?Sized>(self, value: &T) -> Result<Self, FetchError> {
        let body = serde_json::to_vec(value)?;
        let mut builder = self.header("Content-Type", "application/json");
        builder.body = Some(body);
        Ok(builder)
    }

    /// Append `pairs` to the URL's query string, percent-encoded.
    pub fn query(mut self, pairs: &[(&str, &str)]) -> Result<Self, FetchError> {
        if pairs.is_empty() {
            return Ok(self);
        }
        let mut url = reqwest::Url::parse(&self.url)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", self.url, e)))?;
        url.query_pairs_mut().extend_pairs(pairs);
        self.url = url.into();
        Ok(self)
    }

    pub fn accept(self, content_type: impl Into<String>) -> Self {
        self.header("Accept", content_type)
    }

    pub fn build(self) -> Request {
        Request {
            method: self.method,
            url: self.url,
            headers: self.headers,
            body: self.body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_body_sets_content_type() {
        let req = RequestBuilder::new(Method::Post, "http://localhost/api/purchase/1")
            .json(&serde_json::json!({"shipping_address": "12 Main Street"}))
            .unwrap()
            .build();
        assert_eq!(req.headers.get("Content-Type").map(String::as_str), Some("application/json"));
        let body: serde_json::Value = req.json_body().unwrap();
        assert_eq!(body["shipping_address"], "12 Main Street");
    }

    #[test]
    fn test_get_has_no_body() {
        let req = RequestBuilder::new(Method::Get, "http://localhost/api/books")
            .accept("application/json")
            .build();
        assert_eq!(req.body, None);
        assert_eq!(req.json_body::<serde_json::Value>(), None);
        assert_eq!(req.headers.get("Accept").map(String::as_str), Some("application/json"));
    }

    #[test]
    fn test_query_appends_encoded_pairs() {
        let req = RequestBuilder::new(Method::Get, "http://localhost/api/purchase-history?page=1")
            .query(&[("user_id", "reader 7")])
            .unwrap()
            .build();
        assert_eq!(req.url, "http://localhost/api/purchase-history?page=1&user_id=reader+7");

        let unchanged = RequestBuilder::new(Method::Get, "http://localhost/api/orders")
            .query(&[])
            .unwrap()
            .build();
        assert_eq!(unchanged.url, "http://localhost/api/orders");
    }

    #[test]
    fn test_query_on_relative_url_is_invalid() {
        let err = RequestBuilder::new(Method::Get, "/api/orders")
            .query(&[("user_id", "7")])
            .unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl(_)));
    }

    #[test]
    fn test_method_strings() {
        assert_eq!(Method::Get.as_str(), "GET");
        assert_eq!(reqwest::Method::from(Method::Post), reqwest::Method::POST);
    }
}
