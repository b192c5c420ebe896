//! HTTP Response representation for handlers

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::error::HandlerError;

/// Represents an outgoing HTTP response.
///
/// # Quick Reference
///
/// | Method | Status | Use Case |
/// |--------|--------|----------|
/// | `ok(body)` | 200 | Successful JSON response |
/// | `json(status, body)` | any | JSON response with a custom status |
/// | `bad_request(msg)` | 400 | Invalid input |
/// | `internal_error(msg)` | 500 | Server error |
/// | `gateway_timeout(msg)` | 504 | Handler took too long |
///
/// JSON constructors return `Result` because the body is serialized eagerly;
/// a failure is handed back to the caller instead of producing an empty body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    /// HTTP status code
    pub status: u16,

    /// Response headers
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// Response body
    #[serde(default)]
    pub body: Option<String>,
}

pub const CONTENT_TYPE: &str = "Content-Type";
pub const APPLICATION_JSON: &str = "application/json";

impl Response {
    /// Create a new response with the given status code (no body).
    ///
    /// # Example
    /// ```ignore
    /// Response::new(204) // 204 No Content
    /// ```
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Create a 200 OK response with JSON body.
    ///
    /// # Example
    /// ```ignore
    /// Response::ok(json!({"message": "Success"}))?
    /// Response::ok(&my_struct)? // If my_struct implements Serialize
    /// ```
    pub fn ok<T: Serialize>(body: T) -> Result<Self, HandlerError> {
        Self::json(200, body)
    }

    /// Create a JSON response with a custom status code.
    pub fn json<T: Serialize>(status: u16, body: T) -> Result<Self, HandlerError> {
        let body = serde_json::to_string(&body)?;

        Ok(Self::new(status)
            .with_header(CONTENT_TYPE, APPLICATION_JSON)
            .with_body(body))
    }

    /// JSON error body of the form `{"error": message}`.
    ///
    /// Infallible: a `Value` built from a string always renders.
    pub fn error(status: u16, message: impl Into<String>) -> Self {
        let body = Value::Object(
            [("error".to_string(), Value::String(message.into()))]
                .into_iter()
                .collect(),
        );

        Self::new(status)
            .with_header(CONTENT_TYPE, APPLICATION_JSON)
            .with_body(body.to_string())
    }

    /// Create a 400 Bad Request response.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::error(400, message)
    }

    /// Create a 500 Internal Server Error response.
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::error(500, message)
    }

    /// Create a 504 Gateway Timeout response.
    pub fn gateway_timeout(message: impl Into<String>) -> Self {
        Self::error(504, message)
    }

    /// Add a header to the response (builder pattern).
    ///
    /// # Example
    /// ```ignore
    /// Response::ok(json!({"data": "value"}))?
    ///     .with_header("Cache-Control", "max-age=3600")
    /// ```
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set the body (builder pattern).
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Get a header value (case-insensitive lookup).
    pub fn header(&self, key: &str) -> Option<&String> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v)
    }

    /// Check if the response carries a JSON content type.
    pub fn is_json(&self) -> bool {
        self.header(CONTENT_TYPE)
            .map(|ct| ct.contains(APPLICATION_JSON))
            .unwrap_or(false)
    }
}

impl Default for Response {
    fn default() -> Self {
        Self::new(200)
    }
}
