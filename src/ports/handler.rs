//! Port through which handlers describe their validated fields.
//!
//! A handler lists its own members in declaration order and may name a
//! parent handler whose members it inherits. Members are either rule arrays,
//! custom validator methods, or plain values that the engine ignores.

use crate::domain::{CustomValidatorError, RequestParams, Rule};
use async_trait::async_trait;
use serde_json::Value;
use std::{fmt, sync::Arc};

/// Prefix shared by every custom validator member name.
pub const CUSTOM_VALIDATOR_PREFIX: &str = "validate";

/// Returns `true` when `name` follows the custom validator convention:
/// the `validate` prefix immediately followed by an uppercase letter.
///
/// # Examples
///
/// ```
/// use paramguard::ports::is_custom_validator_name;
///
/// assert!(is_custom_validator_name("validatePassword"));
/// assert!(!is_custom_validator_name("validate"));
/// assert!(!is_custom_validator_name("validatepassword"));
/// assert!(!is_custom_validator_name("password"));
/// ```
#[must_use]
pub fn is_custom_validator_name(name: &str) -> bool {
    name.strip_prefix(CUSTOM_VALIDATOR_PREFIX)
        .and_then(|rest| rest.chars().next())
        .is_some_and(|first| first.is_ascii_uppercase())
}

/// Imperative validation logic attached to a handler.
///
/// The validator receives the untouched raw snapshot of the request. It
/// succeeds by returning `Ok(())` and rejects by returning an error, which
/// may carry the message reported to the caller.
#[async_trait]
pub trait CustomValidator: Send + Sync {
    /// Validates the raw request parameters.
    ///
    /// # Errors
    ///
    /// Returns [`CustomValidatorError`] when the request is rejected.
    async fn validate(&self, data: &RequestParams) -> Result<(), CustomValidatorError>;
}

/// One element of a declared array member.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// A rule.
    Rule(Rule),
    /// Anything else; its presence makes the array a configuration error.
    Other(Value),
}

impl From<Rule> for Element {
    fn from(rule: Rule) -> Self {
        Self::Rule(rule)
    }
}

/// A member declared directly on a handler.
#[derive(Clone)]
pub enum Member {
    /// An array; a rule-chain field when every element is a rule.
    Array(Vec<Element>),
    /// A custom validator method.
    Method(Arc<dyn CustomValidator>),
    /// A plain value with no validation role.
    Value(Value),
}

impl Member {
    /// Builds a rule array member.
    #[must_use]
    pub fn rules(rules: impl IntoIterator<Item = Rule>) -> Self {
        Self::Array(rules.into_iter().map(Element::Rule).collect())
    }

    /// Builds a custom validator member.
    #[must_use]
    pub fn method(validator: impl CustomValidator + 'static) -> Self {
        Self::Method(Arc::new(validator))
    }
}

impl fmt::Debug for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Array(elements) => f.debug_tuple("Array").field(elements).finish(),
            Self::Method(_) => f.write_str("Method(..)"),
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
        }
    }
}

/// A handler's own members in declaration order.
#[derive(Debug, Clone, Default)]
pub struct HandlerMembers {
    entries: Vec<(String, Member)>,
}

impl HandlerMembers {
    /// Creates an empty member list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a rule-chain field.
    #[must_use]
    pub fn rules(self, name: impl Into<String>, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.member(name, Member::rules(rules))
    }

    /// Declares a custom validator method.
    #[must_use]
    pub fn method(self, name: impl Into<String>, validator: impl CustomValidator + 'static) -> Self {
        self.member(name, Member::method(validator))
    }

    /// Declares a plain value.
    #[must_use]
    pub fn value(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.member(name, Member::Value(value.into()))
    }

    /// Declares an arbitrary member.
    #[must_use]
    pub fn member(mut self, name: impl Into<String>, member: Member) -> Self {
        self.entries.push((name.into(), member));
        self
    }

    /// Iterates members in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Member)> {
        self.entries
            .iter()
            .map(|(name, member)| (name.as_str(), member))
    }

    /// Returns the number of declared members.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when nothing is declared.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Member)> for HandlerMembers {
    fn from_iter<I: IntoIterator<Item = (String, Member)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// A request handler that declares validated fields.
///
/// Inheritance is expressed through [`RequestHandler::parent`]: a handler
/// that extends another returns it, and field discovery walks the chain from
/// the most derived handler to the root.
pub trait RequestHandler: Send + Sync {
    /// Returns the members declared directly on this handler.
    fn members(&self) -> HandlerMembers;

    /// Returns the handler this one extends, if any.
    fn parent(&self) -> Option<&dyn RequestHandler> {
        None
    }
}
