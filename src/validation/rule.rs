//! Evaluation of a single rule against the rule library.

use super::coercion::stringify;
use crate::{
    domain::{Rule, RuleOutcome},
    ports::RuleLibrary,
};
use serde_json::Value;
use tracing::warn;

impl Rule {
    /// Checks one raw value against this rule.
    ///
    /// The optional sentinel always passes without consulting the library.
    /// Every other rule stringifies the value and runs the predicate of the
    /// same name with the rule's extra parameters. A rejection reports the
    /// rule's own message, or `fallback_message` when that is empty.
    #[must_use]
    pub fn validate<L>(&self, value: &Value, library: &L, fallback_message: &str) -> RuleOutcome
    where
        L: RuleLibrary + ?Sized,
    {
        if self.is_optional() {
            return RuleOutcome::passed();
        }

        let input = stringify(value);
        match library.check(self.name(), &input, self.params()) {
            Some(true) => RuleOutcome::passed(),
            Some(false) => RuleOutcome::failed(self.failure_message(fallback_message)),
            None => {
                warn!(rule = %self.name(), "rule is not provided by the rule library");
                RuleOutcome::failed(self.failure_message(fallback_message))
            }
        }
    }

    fn failure_message<'a>(&'a self, fallback: &'a str) -> &'a str {
        if self.message().is_empty() {
            fallback
        } else {
            self.message()
        }
    }
}
