//! HTTP response value type produced by mock handlers.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Response returned by a mock route handler.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Response {
    /// HTTP status code (100-599)
    pub status: u16,
    /// Response headers
    #[serde(skip_serializing_if = "HashMap::is_empty", default)]
    pub headers: HashMap<String, String>,
    /// Response body
    pub body: String,
}

impl Response {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: String::new(),
        }
    }

    /// A `200 OK` plain-text response.
    pub fn text(body: impl Into<String>) -> Self {
        Self::new(200)
            .with_header("Content-Type", "text/plain")
            .with_body(body)
    }

    /// A `200 OK` JSON response.
    pub fn json(body: &Value) -> Self {
        // Serializing a Value cannot fail
        let body = serde_json::to_string(body).expect("valid JSON value");
        Self::new(200)
            .with_header("Content-Type", "application/json")
            .with_body(body)
    }

    /// The response served when a rule matches an URL but none of the
    /// declared routes accepts the request.
    pub fn not_found() -> Self {
        Self::new(404)
    }

    /// Add a response header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Set the response body.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }
}
