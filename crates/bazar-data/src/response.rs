//! Incoming responses and how their failures are worded.

use crate::FetchError;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;

/// A buffered HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

/// The catalog service explains failures in `message`, the reporting
/// service in `error`.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl Response {
    pub fn new(status: u16, headers: HashMap<String, String>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        serde_json::from_slice(&self.body).map_err(|e| FetchError::Parse(e.to_string()))
    }

    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    /// What to show the user for a failed response: the body's `message`,
    /// else its `error`, else `Error: <status> <reason>`.
    pub fn error_message(&self) -> String {
        let explained = serde_json::from_slice::<ErrorBody>(&self.body)
            .ok()
            .and_then(|body| {
                let non_empty = |msg: &String| !msg.is_empty();
                body.message.filter(non_empty).or(body.error.filter(non_empty))
            });
        if let Some(msg) = explained {
            return msg;
        }
        match reqwest::StatusCode::from_u16(self.status)
            .ok()
            .and_then(|s| s.canonical_reason())
        {
            Some(reason) => format!("Error: {} {}", self.status, reason),
            None => format!("Error: {}", self.status),
        }
    }

    /// Turn a non-2xx response into [`FetchError::Http`].
    pub fn error_for_status(self) -> Result<Self, FetchError> {
        if self.is_success() {
            return Ok(self);
        }
        Err(FetchError::Http {
            status: self.status,
            message: self.error_message(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(status: u16, body: &[u8]) -> Response {
        Response::new(status, HashMap::new(), body.to_vec())
    }

    #[test]
    fn test_json_parse_failure_is_parse_error() {
        let value: serde_json::Value = reply(200, br#"{"books": []}"#).json().unwrap();
        assert_eq!(value["books"], serde_json::json!([]));
        assert!(matches!(
            reply(200, b"<html>").json::<serde_json::Value>(),
            Err(FetchError::Parse(_))
        ));
    }

    #[test]
    fn test_error_message_prefers_body_message() {
        let resp = reply(400, br#"{"success": false, "message": "Book is out of stock"}"#);
        assert_eq!(resp.error_message(), "Book is out of stock");

        let resp = reply(500, br#"{"error": "connection refused", "books": []}"#);
        assert_eq!(resp.error_message(), "connection refused");

        let resp = reply(500, br#"{"message": "", "error": "render failed"}"#);
        assert_eq!(resp.error_message(), "render failed");
    }

    #[test]
    fn test_error_message_falls_back_to_status() {
        assert_eq!(reply(502, b"bad gateway").error_message(), "Error: 502 Bad Gateway");
        assert_eq!(reply(404, b"{}").error_message(), "Error: 404 Not Found");
        assert_eq!(reply(599, b"").error_message(), "Error: 599");
    }

    #[test]
    fn test_error_for_status() {
        assert!(reply(204, b"").error_for_status().is_ok());
        let err = reply(404, br#"{"message": "Book not found"}"#)
            .error_for_status()
            .unwrap_err();
        assert_eq!(
            err,
            FetchError::Http {
                status: 404,
                message: "Book not found".into()
            }
        );
    }
}
