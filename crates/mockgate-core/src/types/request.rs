//! HTTP request value type used for dispatch and matching.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use url::Url;

/// HTTP method for route matching
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

/// An intercepted HTTP request.
///
/// `url` is the full request target as the client issued it, either an
/// absolute URL (`http://example.com/posts?page=1`) or a bare
/// path-and-query (`/posts?page=1`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// HTTP method
    pub method: HttpMethod,
    /// Request target as issued by the client
    pub url: String,
    /// Request headers
    pub headers: HashMap<String, String>,
    /// Request body, if any
    pub body: Option<String>,
}

impl Request {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Add a request header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Set the request body.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Split the request target into path and raw query string.
    ///
    /// Absolute URLs are parsed; anything that does not parse as an
    /// absolute URL is treated as a bare path-and-query target.
    pub fn path_and_query(&self) -> (String, Option<String>) {
        if let Ok(parsed) = Url::parse(&self.url) {
            return (
                parsed.path().to_string(),
                parsed.query().map(str::to_string),
            );
        }

        match self.url.split_once('?') {
            Some((path, query)) => (path.to_string(), Some(query.to_string())),
            None => (self.url.clone(), None),
        }
    }
}
