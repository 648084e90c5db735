//! In-memory request source.

use crate::ports::RequestSource;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A request whose parameter containers are held as JSON values.
///
/// Useful for tests, and as the conversion target for framework request
/// types.
///
/// # Examples
///
/// ```
/// use paramguard::adapters::RawRequest;
/// use paramguard::ports::RequestSource;
/// use serde_json::json;
///
/// let request = RawRequest::new()
///     .with_query(json!({ "page": "2" }))
///     .with_header(json!({ "x-request-id": "abc" }));
/// assert_eq!(request.query()["page"], json!("2"));
/// assert_eq!(request.body(), &json!({}));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRequest {
    #[serde(default = "empty_object")]
    query: Value,
    #[serde(default = "empty_object")]
    body: Value,
    #[serde(default = "empty_object", alias = "params")]
    path: Value,
    #[serde(default = "empty_object", alias = "headers")]
    header: Value,
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

impl Default for RawRequest {
    fn default() -> Self {
        Self::new()
    }
}

impl RawRequest {
    /// Creates a request with four empty containers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            query: empty_object(),
            body: empty_object(),
            path: empty_object(),
            header: empty_object(),
        }
    }

    /// Sets the query-string parameters.
    #[must_use]
    pub fn with_query(mut self, query: Value) -> Self {
        self.query = query;
        self
    }

    /// Sets the parsed body.
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = body;
        self
    }

    /// Sets the route path parameters.
    #[must_use]
    pub fn with_path_params(mut self, path: Value) -> Self {
        self.path = path;
        self
    }

    /// Sets the headers.
    #[must_use]
    pub fn with_header(mut self, header: Value) -> Self {
        self.header = header;
        self
    }
}

impl RequestSource for RawRequest {
    fn query(&self) -> &Value {
        &self.query
    }

    fn body(&self) -> &Value {
        &self.body
    }

    fn path_params(&self) -> &Value {
        &self.path
    }

    fn header(&self) -> &Value {
        &self.header
    }
}
