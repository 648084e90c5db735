//! Rule declarations and ordered rule chains.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Canonical name of the optional-field sentinel rule.
pub const OPTIONAL_RULE: &str = "isOptional";

/// Short alias accepted for the optional-field sentinel rule.
pub const OPTIONAL_RULE_ALIAS: &str = "optional";

/// A single named check bound to a failure message.
///
/// The name selects a predicate from the rule library; the extra parameters
/// are passed to it verbatim after the checked value. Rules are immutable
/// once built.
///
/// # Examples
///
/// ```
/// use paramguard::domain::Rule;
/// use serde_json::json;
///
/// let rule = Rule::new("isLength", "too short").with_param(json!({ "min": 6 }));
/// assert_eq!(rule.name(), "isLength");
/// assert_eq!(rule.params(), &[json!({ "min": 6 })]);
///
/// let optional = Rule::optional(json!(18));
/// assert!(optional.is_optional());
/// assert_eq!(optional.default_value(), Some(&json!(18)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    name: String,
    #[serde(default, alias = "msg")]
    message: String,
    #[serde(default)]
    params: Vec<Value>,
}

impl Rule {
    /// Creates a rule without extra parameters.
    #[must_use]
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            params: Vec::new(),
        }
    }

    /// Creates the optional sentinel carrying the value used when the field
    /// is absent.
    #[must_use]
    pub fn optional(default: impl Into<Value>) -> Self {
        Self::new(OPTIONAL_RULE, "").with_param(default)
    }

    /// Appends one extra parameter.
    #[must_use]
    pub fn with_param(mut self, param: impl Into<Value>) -> Self {
        self.params.push(param.into());
        self
    }

    /// Appends several extra parameters in order.
    #[must_use]
    pub fn with_params<I, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.params.extend(params.into_iter().map(Into::into));
        self
    }

    /// Returns the predicate name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the configured failure message, which may be empty.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the extra predicate parameters.
    #[must_use]
    pub fn params(&self) -> &[Value] {
        &self.params
    }

    /// Returns `true` for the optional-field sentinel.
    #[must_use]
    pub fn is_optional(&self) -> bool {
        self.name == OPTIONAL_RULE || self.name == OPTIONAL_RULE_ALIAS
    }

    /// Returns the first extra parameter, which the optional sentinel uses as
    /// the absent-field default.
    #[must_use]
    pub fn default_value(&self) -> Option<&Value> {
        self.params.first()
    }

    /// Returns the coercion this rule implies for validated values.
    #[must_use]
    pub fn type_hint(&self) -> Option<TypeHint> {
        match self.name.as_str() {
            "isInt" => Some(TypeHint::Int),
            "isFloat" => Some(TypeHint::Float),
            "isBoolean" => Some(TypeHint::Boolean),
            _ => None,
        }
    }
}

/// Target type for the final coercion of a validated value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeHint {
    /// Parse as an integer.
    Int,
    /// Parse as a floating point number.
    Float,
    /// Coerce to the value's truthiness.
    Boolean,
}

/// Ordered rules for one field, evaluated fail-fast.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleChain {
    rules: Vec<Rule>,
}

impl RuleChain {
    /// Creates a chain preserving declaration order.
    #[must_use]
    pub fn new(rules: impl IntoIterator<Item = Rule>) -> Self {
        Self {
            rules: rules.into_iter().collect(),
        }
    }

    /// Returns the rules in declaration order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Returns the first optional sentinel, if any.
    #[must_use]
    pub fn optional_rule(&self) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.is_optional())
    }

    /// Returns the first type-indicating rule's coercion, if any.
    #[must_use]
    pub fn type_hint(&self) -> Option<TypeHint> {
        self.rules.iter().find_map(Rule::type_hint)
    }

    /// Returns `true` when the chain declares no rules.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl FromIterator<Rule> for RuleChain {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        Self::new(iter)
    }
}
