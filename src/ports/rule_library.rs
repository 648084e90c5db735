//! Port for the primitive rule library.
//!
//! Rules delegate their checks to named string predicates supplied by an
//! external library. The engine only needs to ask whether a predicate exists
//! and to run it against a stringified value.

use serde_json::Value;

/// Named string predicates backing [`crate::domain::Rule`] checks.
#[cfg_attr(test, mockall::automock)]
pub trait RuleLibrary: Send + Sync {
    /// Runs the predicate `name` against `input` with the rule's extra
    /// parameters.
    ///
    /// Returns `None` when no predicate with that name exists.
    fn check(&self, name: &str, input: &str, params: &[Value]) -> Option<bool>;

    /// Returns `true` when a predicate named `name` exists.
    fn supports(&self, name: &str) -> bool;
}
