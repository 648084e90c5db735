//! Error types for handler configuration and request validation.
//!
//! Two channels are kept apart: [`ConfigurationError`] reports a malformed
//! handler definition and aborts before any request data is examined, while
//! [`AggregateValidationError`] carries every per-field rejection collected
//! while validating one request.

use std::fmt;
use thiserror::Error;

/// Fatal errors in a handler's field declarations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    /// A rule array contains an element that is not a rule.
    #[error("field '{field}' declares a rule array with a non-rule element at index {index}")]
    NonRuleElement {
        /// The offending field name.
        field: String,
        /// Position of the first non-rule element.
        index: usize,
    },

    /// A member is named like a custom validator but is neither callable nor
    /// a rule array.
    #[error("field '{field}' is named like a custom validator but is not callable")]
    NotCallable {
        /// The offending member name.
        field: String,
    },

    /// A rule references a predicate unknown to the rule library.
    #[error("field '{field}' uses unknown rule '{rule}'")]
    UnknownRule {
        /// The field declaring the rule.
        field: String,
        /// The unrecognised rule name.
        rule: String,
    },

    /// A data-driven handler definition could not be read.
    #[error("invalid handler definition: {0}")]
    InvalidDefinition(String),
}

impl ConfigurationError {
    /// Creates an invalid definition error.
    #[must_use]
    pub fn invalid_definition(reason: impl Into<String>) -> Self {
        Self::InvalidDefinition(reason.into())
    }
}

/// Failure raised by a custom validator.
///
/// The message is optional; validators that fail without one are reported
/// with the engine's generic invalid-parameter message.
#[derive(Debug, Clone, Default, Error, PartialEq, Eq)]
#[error("{}", .message.as_deref().unwrap_or("custom validation failed"))]
pub struct CustomValidatorError {
    message: Option<String>,
}

impl CustomValidatorError {
    /// Creates a failure carrying a fully formed message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }

    /// Creates a failure without a message.
    #[must_use]
    pub const fn silent() -> Self {
        Self { message: None }
    }

    /// Returns the message, if the validator supplied a non-empty one.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|message| !message.is_empty())
    }
}

/// How a failing field was declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// An ordered chain of primitive rules.
    RuleChain,
    /// An asynchronous custom validator.
    Custom,
}

/// One rejected field in an aggregate failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFailure {
    field: String,
    kind: FieldKind,
    message: String,
    separator: String,
}

impl FieldFailure {
    /// Creates a failure for a rule-chain field.
    #[must_use]
    pub fn rule_chain(
        field: impl Into<String>,
        message: impl Into<String>,
        separator: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            kind: FieldKind::RuleChain,
            message: message.into(),
            separator: separator.into(),
        }
    }

    /// Creates a failure for a custom validator field.
    #[must_use]
    pub fn custom(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind: FieldKind::Custom,
            message: message.into(),
            separator: String::new(),
        }
    }

    /// Returns the field name.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Returns how the field was declared.
    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Returns the bare failure message, without any field prefix.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Renders the reported entry.
    ///
    /// Rule-chain failures are prefixed with the field name; custom
    /// validators already produce a complete message and are left bare.
    #[must_use]
    pub fn render(&self) -> String {
        match self.kind {
            FieldKind::RuleChain => format!("{}{}{}", self.field, self.separator, self.message),
            FieldKind::Custom => self.message.clone(),
        }
    }
}

impl fmt::Display for FieldFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Every field failure found while validating one request.
///
/// Entries keep discovery order. The error is only constructed when at least
/// one field failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("request validation failed: {}", format_failures(.failures))]
pub struct AggregateValidationError {
    failures: Vec<FieldFailure>,
}

fn format_failures(failures: &[FieldFailure]) -> String {
    failures
        .iter()
        .map(FieldFailure::render)
        .collect::<Vec<_>>()
        .join("; ")
}

impl AggregateValidationError {
    /// Wraps the collected failures.
    ///
    /// Returns `None` when `failures` is empty, since an empty aggregate is
    /// not a failure.
    #[must_use]
    pub fn from_failures(failures: Vec<FieldFailure>) -> Option<Self> {
        if failures.is_empty() {
            None
        } else {
            Some(Self { failures })
        }
    }

    /// Returns the individual failures in discovery order.
    #[must_use]
    pub fn failures(&self) -> &[FieldFailure] {
        &self.failures
    }

    /// Returns the rendered message of every failure in discovery order.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.failures.iter().map(FieldFailure::render).collect()
    }

    /// Returns the number of failed fields.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.failures.len()
    }

    /// Returns `true` when no field failed, which a constructed aggregate never
    /// reports.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Errors returned by the one-shot validation entry point.
#[derive(Debug, Clone, Error)]
pub enum RequestValidationError {
    /// The handler declaration is malformed.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// One or more fields rejected the request.
    #[error(transparent)]
    Rejected(#[from] AggregateValidationError),
}

impl RequestValidationError {
    /// Returns the aggregate failure when the request itself was rejected.
    #[must_use]
    pub const fn rejection(&self) -> Option<&AggregateValidationError> {
        match self {
            Self::Rejected(aggregate) => Some(aggregate),
            Self::Configuration(_) => None,
        }
    }
}

/// Error returned while parsing a parameter source name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown parameter source: {0}")]
pub struct ParseParamSourceError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_chain_failure_is_prefixed_with_field_name() {
        let failure = FieldFailure::rule_chain("age", "must be an integer", " ");
        assert_eq!(failure.render(), "age must be an integer");
    }

    #[test]
    fn custom_failure_is_left_bare() {
        let failure = FieldFailure::custom("validatePassword", "passwords differ");
        assert_eq!(failure.render(), "passwords differ");
    }

    #[test]
    fn aggregate_requires_at_least_one_failure() {
        assert!(AggregateValidationError::from_failures(Vec::new()).is_none());
    }

    #[test]
    fn aggregate_display_joins_rendered_entries() {
        let aggregate = AggregateValidationError::from_failures(vec![
            FieldFailure::rule_chain("age", "field is required", " "),
            FieldFailure::custom("validateToken", "token expired"),
        ])
        .expect("non-empty failures");
        assert_eq!(
            aggregate.to_string(),
            "request validation failed: age field is required; token expired"
        );
        assert_eq!(aggregate.len(), 2);
    }

    #[test]
    fn empty_custom_message_is_treated_as_missing() {
        assert_eq!(CustomValidatorError::new("").message(), None);
        assert_eq!(CustomValidatorError::silent().message(), None);
    }
}
