//! Pass/fail results produced by rules and rule chains.

use serde_json::Value;

/// Result of evaluating a single rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    pass: bool,
    message: String,
}

impl RuleOutcome {
    /// A passing outcome with an empty message.
    #[must_use]
    pub const fn passed() -> Self {
        Self {
            pass: true,
            message: String::new(),
        }
    }

    /// A failing outcome carrying `message`.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            pass: false,
            message: message.into(),
        }
    }

    /// Returns `true` when the rule accepted the value.
    #[must_use]
    pub const fn is_pass(&self) -> bool {
        self.pass
    }

    /// Returns the failure message; empty for passing outcomes.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Consumes the outcome, returning its message.
    #[must_use]
    pub fn into_message(self) -> String {
        self.message
    }
}

/// Result of evaluating a whole rule chain for one field.
///
/// A passing outcome carries the coerced value; a failing one never does.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldOutcome {
    pass: bool,
    message: String,
    legal_value: Option<Value>,
}

impl FieldOutcome {
    /// A passing outcome holding the coerced value.
    ///
    /// `None` means the field was absent and its optional rule supplied no
    /// default.
    #[must_use]
    pub const fn passed(legal_value: Option<Value>) -> Self {
        Self {
            pass: true,
            message: String::new(),
            legal_value,
        }
    }

    /// A failing outcome carrying `message` and no value.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            pass: false,
            message: message.into(),
            legal_value: None,
        }
    }

    /// Returns `true` when every rule accepted the value.
    #[must_use]
    pub const fn is_pass(&self) -> bool {
        self.pass
    }

    /// Returns the failure message; empty for passing outcomes.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the coerced value of a passing outcome.
    #[must_use]
    pub const fn legal_value(&self) -> Option<&Value> {
        self.legal_value.as_ref()
    }

    /// Splits a passing outcome into its value, or a failing one into its
    /// message.
    ///
    /// # Errors
    ///
    /// Returns the failure message when the outcome did not pass.
    pub fn into_result(self) -> Result<Option<Value>, String> {
        if self.pass {
            Ok(self.legal_value)
        } else {
            Err(self.message)
        }
    }
}

impl From<RuleOutcome> for FieldOutcome {
    fn from(outcome: RuleOutcome) -> Self {
        Self {
            pass: outcome.pass,
            message: outcome.message,
            legal_value: None,
        }
    }
}
