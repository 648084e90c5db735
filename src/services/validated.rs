//! Read access to a successfully validated request.

use crate::domain::{ParsedParams, RequestParams};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// The outcome of a successful validation call.
///
/// Holds the untouched raw snapshot and the parsed tree of coerced values.
/// Reads go through dotted paths such as `query.age`; parsed reads fall back
/// to the default bucket by the path's last segment, so `get("age")` finds a
/// field regardless of the container it came from when it has no natural
/// path.
///
/// # Examples
///
/// ```
/// use paramguard::adapters::{HandlerDefinition, RawRequest, StandardRuleLibrary};
/// use paramguard::domain::Rule;
/// use paramguard::services::RequestValidator;
/// use serde_json::json;
/// use std::sync::Arc;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let handler = HandlerDefinition::new().rules("age", [Rule::new("isInt", "must be an integer")]);
/// let request = RawRequest::new().with_query(json!({ "age": "17" }));
/// let validator = RequestValidator::new(Arc::new(StandardRuleLibrary::new()));
///
/// let params = validator.validate(&handler, &request).await.expect("valid request");
/// assert_eq!(params.get("query.age"), Some(&json!(17)));
/// assert_eq!(params.get("age"), None);
/// assert_eq!(params.get_raw("query.age"), Some(&json!("17")));
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedParams {
    data: RequestParams,
    parsed: ParsedParams,
}

impl ValidatedParams {
    pub(crate) const fn new(data: RequestParams, parsed: ParsedParams) -> Self {
        Self { data, parsed }
    }

    /// Reads a coerced value from the parsed tree, falling back to the
    /// default bucket.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Value> {
        self.parsed.get(path)
    }

    /// Reads a value from the untouched raw snapshot, without fallback.
    #[must_use]
    pub fn get_raw(&self, path: &str) -> Option<&Value> {
        self.data.get(path)
    }

    /// Reads from the parsed tree when `uses_parsed_tree` is set, and from
    /// the raw snapshot otherwise.
    #[must_use]
    pub fn get_with(&self, path: &str, uses_parsed_tree: bool) -> Option<&Value> {
        if uses_parsed_tree {
            self.get(path)
        } else {
            self.get_raw(path)
        }
    }

    /// Reads a coerced value and deserializes it into `T`.
    ///
    /// Returns `Ok(None)` when nothing is found at `path`.
    ///
    /// # Errors
    ///
    /// Returns the deserialization error when the stored value does not fit
    /// `T`.
    pub fn get_as<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, serde_json::Error> {
        self.get(path)
            .cloned()
            .map(serde_json::from_value)
            .transpose()
    }

    /// Returns `true` when `path` resolves in the parsed tree.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Returns the raw snapshot.
    #[must_use]
    pub const fn data(&self) -> &RequestParams {
        &self.data
    }

    /// Returns the parsed tree.
    #[must_use]
    pub const fn parsed(&self) -> &ParsedParams {
        &self.parsed
    }

    /// Splits into the raw snapshot and the parsed tree.
    #[must_use]
    pub fn into_parts(self) -> (RequestParams, ParsedParams) {
        (self.data, self.parsed)
    }
}
