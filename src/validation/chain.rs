//! Field-level evaluation of a rule chain.

use super::coercion::coerce;
use crate::{
    domain::{FieldOutcome, RuleChain},
    ports::{RuleLibrary, ValidatorConfig},
};
use serde_json::Value;

impl RuleChain {
    /// Evaluates the chain against a field's resolved value.
    ///
    /// An absent value (`None`) passes with the optional rule's default when
    /// the chain declares one, and fails with the required-field message
    /// otherwise. A present value is checked rule by rule in declaration
    /// order, stopping at the first rejection. When every rule passes the
    /// value is coerced by the first type-indicating rule, or passed through
    /// unchanged.
    #[must_use]
    pub fn evaluate<L>(&self, raw: Option<&Value>, library: &L, config: &ValidatorConfig) -> FieldOutcome
    where
        L: RuleLibrary + ?Sized,
    {
        let Some(value) = raw else {
            return self.optional_rule().map_or_else(
                || FieldOutcome::failed(config.required_message.as_str()),
                |optional| FieldOutcome::passed(optional.default_value().cloned()),
            );
        };

        if let Some(rejection) = self
            .rules()
            .iter()
            .map(|rule| rule.validate(value, library, &config.invalid_message))
            .find(|outcome| !outcome.is_pass())
        {
            return rejection.into();
        }

        FieldOutcome::passed(Some(coerce(value, self.type_hint())))
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        domain::{Rule, RuleChain},
        ports::{ValidatorConfig, rule_library::MockRuleLibrary},
    };
    use mockall::predicate::eq;
    use rstest::{fixture, rstest};
    use serde_json::{Value, json};

    #[fixture]
    fn config() -> ValidatorConfig {
        ValidatorConfig::default()
    }

    fn accepting_library() -> MockRuleLibrary {
        let mut library = MockRuleLibrary::new();
        library.expect_check().returning(|_, _, _| Some(true));
        library
    }

    #[rstest]
    fn absent_optional_field_passes_with_default(config: ValidatorConfig) {
        let chain = RuleChain::new([Rule::optional(json!("a@b.com")), Rule::new("isEmail", "")]);
        let outcome = chain.evaluate(None, &MockRuleLibrary::new(), &config);

        assert!(outcome.is_pass());
        assert_eq!(outcome.legal_value(), Some(&json!("a@b.com")));
    }

    #[rstest]
    fn absent_optional_field_without_default_passes_empty(config: ValidatorConfig) {
        let chain = RuleChain::new([Rule::new("isOptional", "")]);
        let outcome = chain.evaluate(None, &MockRuleLibrary::new(), &config);

        assert!(outcome.is_pass());
        assert_eq!(outcome.legal_value(), None);
    }

    #[rstest]
    fn absent_required_field_fails(config: ValidatorConfig) {
        let chain = RuleChain::new([Rule::new("isInt", "must be an integer")]);
        let outcome = chain.evaluate(None, &MockRuleLibrary::new(), &config);

        assert!(!outcome.is_pass());
        assert_eq!(outcome.message(), "field is required");
        assert_eq!(outcome.legal_value(), None);
    }

    #[rstest]
    fn evaluation_stops_at_first_rejection(config: ValidatorConfig) {
        let mut library = MockRuleLibrary::new();
        library
            .expect_check()
            .with(eq("alwaysFails"), mockall::predicate::always(), mockall::predicate::always())
            .times(1)
            .returning(|_, _, _| Some(false));
        library
            .expect_check()
            .with(eq("wouldPanicIfCalled"), mockall::predicate::always(), mockall::predicate::always())
            .never();

        let chain = RuleChain::new([
            Rule::new("alwaysFails", "first rule failed"),
            Rule::new("wouldPanicIfCalled", "second rule ran"),
        ]);
        let outcome = chain.evaluate(Some(&json!("x")), &library, &config);

        assert!(!outcome.is_pass());
        assert_eq!(outcome.message(), "first rule failed");
    }

    #[rstest]
    #[case("isInt", json!("42"), json!(42))]
    #[case("isFloat", json!("2.5"), json!(2.5))]
    #[case("isBoolean", json!("yes"), json!(true))]
    #[case("isLength", json!("17"), json!("17"))]
    fn passing_value_is_coerced_by_type_rule(
        config: ValidatorConfig,
        #[case] rule: &str,
        #[case] raw: Value,
        #[case] expected: Value,
    ) {
        let chain = RuleChain::new([Rule::new(rule, "")]);
        let outcome = chain.evaluate(Some(&raw), &accepting_library(), &config);

        assert!(outcome.is_pass());
        assert_eq!(outcome.legal_value(), Some(&expected));
    }

    #[rstest]
    fn empty_chain_passes_value_unchanged(config: ValidatorConfig) {
        let outcome = RuleChain::default().evaluate(Some(&json!("raw")), &MockRuleLibrary::new(), &config);

        assert!(outcome.is_pass());
        assert_eq!(outcome.legal_value(), Some(&json!("raw")));
    }

    #[rstest]
    fn optional_rule_is_skipped_when_value_is_present(config: ValidatorConfig) {
        let mut library = MockRuleLibrary::new();
        library
            .expect_check()
            .with(eq("isInt"), eq("17"), mockall::predicate::always())
            .times(1)
            .returning(|_, _, _| Some(true));

        let chain = RuleChain::new([Rule::new("isInt", ""), Rule::optional(18)]);
        let outcome = chain.evaluate(Some(&json!("17")), &library, &config);

        assert_eq!(outcome.legal_value(), Some(&json!(17)));
    }
}
