//! Request parameter containers: the raw snapshot and the parsed tree.

use super::{
    error::ParseParamSourceError,
    path::{read_path, split_path, write_path},
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::{fmt, str::FromStr};

/// One of the four request containers a field value can come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamSource {
    /// Query-string parameters.
    Query,
    /// Parsed request body.
    Body,
    /// Route path parameters.
    Path,
    /// Request headers.
    Header,
}

impl ParamSource {
    /// All sources in default resolution priority.
    pub const ALL: [Self; 4] = [Self::Query, Self::Body, Self::Path, Self::Header];

    /// Returns the container name used as the first path segment.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Body => "body",
            Self::Path => "path",
            Self::Header => "header",
        }
    }
}

impl fmt::Display for ParamSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParamSource {
    type Err = ParseParamSourceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "query" => Ok(Self::Query),
            "body" => Ok(Self::Body),
            "path" => Ok(Self::Path),
            "header" => Ok(Self::Header),
            other => Err(ParseParamSourceError(other.to_owned())),
        }
    }
}

/// Deep copy of the four request containers taken at the start of a
/// validation call.
///
/// The snapshot is never mutated after capture; custom validators and raw
/// reads observe the request exactly as received.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestParams {
    tree: Value,
}

impl RequestParams {
    /// Builds a snapshot from the four containers.
    ///
    /// Missing (`null`) containers are normalised to empty objects.
    #[must_use]
    pub fn new(query: Value, body: Value, path: Value, header: Value) -> Self {
        let mut map = Map::new();
        for (source, container) in ParamSource::ALL.into_iter().zip([query, body, path, header]) {
            let normalised = if container.is_null() {
                Value::Object(Map::new())
            } else {
                container
            };
            map.insert(source.as_str().to_owned(), normalised);
        }
        Self {
            tree: Value::Object(map),
        }
    }

    /// Returns one whole container.
    #[must_use]
    pub fn container(&self, source: ParamSource) -> Option<&Value> {
        self.tree.get(source.as_str())
    }

    /// Returns the value of `field` in `source`, if defined.
    #[must_use]
    pub fn lookup(&self, source: ParamSource, field: &str) -> Option<&Value> {
        read_path(&self.tree, &[source.as_str(), field])
    }

    /// Reads a dotted path such as `query.age` or `body.items.0`.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Value> {
        read_path(&self.tree, &split_path(path))
    }

    /// Returns the snapshot as one JSON object keyed by container name.
    #[must_use]
    pub const fn as_value(&self) -> &Value {
        &self.tree
    }
}

/// Per-call tree of coerced values mirroring the raw containers.
///
/// Rule-chain fields resolved from a container are written back at the same
/// path; fields without a natural path land in the default bucket keyed by
/// field name.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedParams {
    tree: Value,
    default_bucket: String,
}

impl ParsedParams {
    /// Starts a parsed tree as a second deep copy of the raw snapshot.
    #[must_use]
    pub fn from_snapshot(snapshot: &RequestParams, default_bucket: impl Into<String>) -> Self {
        Self {
            tree: snapshot.as_value().clone(),
            default_bucket: default_bucket.into(),
        }
    }

    /// Writes a coerced value back at `source.field`.
    pub fn write(&mut self, source: ParamSource, field: &str, value: Value) {
        write_path(&mut self.tree, &[source.as_str(), field], value);
    }

    /// Writes a value under the default bucket keyed by `field`.
    pub fn write_default(&mut self, field: &str, value: Value) {
        write_path(&mut self.tree, &[self.default_bucket.as_str(), field], value);
    }

    /// Reads a dotted path, falling back to the default bucket.
    ///
    /// When the direct lookup yields nothing (absent or `null`), only the
    /// final path segment is retried against the default bucket.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Value> {
        let segments = split_path(path);
        match read_path(&self.tree, &segments) {
            Some(value) if !value.is_null() => Some(value),
            _ => segments
                .last()
                .and_then(|key| read_path(&self.tree, &[self.default_bucket.as_str(), *key])),
        }
    }

    /// Returns the values held in the default bucket.
    #[must_use]
    pub fn default_bucket(&self) -> Option<&Value> {
        self.tree.get(&self.default_bucket)
    }

    /// Returns the whole tree.
    #[must_use]
    pub const fn as_value(&self) -> &Value {
        &self.tree
    }

    /// Consumes the tree, returning the underlying JSON value.
    #[must_use]
    pub fn into_value(self) -> Value {
        self.tree
    }
}
