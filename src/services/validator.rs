//! Request validation orchestration.
//!
//! Provides [`RequestValidator`], which discovers a handler's fields once,
//! then validates requests field by field, writing coerced values into a
//! per-call parsed tree and collecting every failure into one aggregate
//! error.

use super::{
    discovery::{DiscoveredField, FieldDiscovery, FieldSpec},
    resolver::ParameterResolver,
    validated::ValidatedParams,
};
use crate::{
    domain::{
        AggregateValidationError, ConfigurationError, FieldFailure, ParsedParams, RequestParams,
        RequestValidationError, RuleChain,
    },
    ports::{CustomValidator, RequestHandler, RequestSource, RuleLibrary, ValidatorConfig},
};
use serde_json::Value;
use std::{future::Future, sync::Arc};
use tracing::{debug, warn};

/// A handler's discovered and verified fields, reusable across requests.
#[derive(Debug, Clone)]
pub struct PreparedHandler {
    fields: Vec<DiscoveredField>,
}

impl PreparedHandler {
    /// Returns the fields in discovery order.
    #[must_use]
    pub fn fields(&self) -> &[DiscoveredField] {
        &self.fields
    }

    /// Returns the number of discovered fields.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` when the handler declares no validated fields.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Per-call state threaded through field evaluation.
struct ValidationContext {
    data: RequestParams,
    parsed: ParsedParams,
    failures: Vec<FieldFailure>,
}

impl ValidationContext {
    fn new(data: RequestParams, config: &ValidatorConfig) -> Self {
        let parsed = ParsedParams::from_snapshot(&data, config.default_bucket.as_str());
        Self {
            data,
            parsed,
            failures: Vec::new(),
        }
    }

    fn finish(self) -> Result<ValidatedParams, AggregateValidationError> {
        match AggregateValidationError::from_failures(self.failures) {
            Some(aggregate) => {
                debug!(failures = aggregate.len(), "request rejected");
                Err(aggregate)
            }
            None => Ok(ValidatedParams::new(self.data, self.parsed)),
        }
    }
}

/// Validates requests against handler field declarations.
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
/// let handler = HandlerDefinition::new()
///     .rules("email", [Rule::optional("a@b.com"), Rule::new("isEmail", "must be email")])
///     .rules("age", [Rule::new("isInt", "must be an integer")]);
/// let validator = RequestValidator::new(Arc::new(StandardRuleLibrary::new()));
///
/// let request = RawRequest::new().with_body(json!({ "age": "x" }));
/// let error = validator
///     .validate(&handler, &request)
///     .await
///     .expect_err("age is not an integer");
/// let rejection = error.rejection().expect("rejected by fields");
/// assert_eq!(rejection.messages(), vec!["age must be an integer".to_owned()]);
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RequestValidator<L>
where
    L: RuleLibrary,
{
    library: Arc<L>,
    config: ValidatorConfig,
}

impl<L> RequestValidator<L>
where
    L: RuleLibrary,
{
    /// Creates a validator with default configuration.
    #[must_use]
    pub fn new(library: Arc<L>) -> Self {
        Self {
            library,
            config: ValidatorConfig::default(),
        }
    }

    /// Creates a validator with custom configuration.
    #[must_use]
    pub const fn with_config(library: Arc<L>, config: ValidatorConfig) -> Self {
        Self { library, config }
    }

    /// Returns the current configuration.
    #[must_use]
    pub const fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Discovers the handler's fields and checks every rule name against the
    /// rule library.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] when discovery finds a malformed
    /// member, or when a rule names a predicate the library does not provide.
    pub fn prepare(&self, handler: &dyn RequestHandler) -> Result<PreparedHandler, ConfigurationError> {
        let fields = FieldDiscovery::discover(handler)?;

        for field in &fields {
            if let FieldSpec::RuleChain(chain) = field.spec() {
                self.verify_rules(field.name(), chain)?;
            }
        }

        debug!(fields = fields.len(), "prepared handler");
        Ok(PreparedHandler { fields })
    }

    /// Validates a request against a prepared handler.
    ///
    /// The request containers are deep-copied before the returned future is
    /// first polled, so the request does not need to outlive the call.
    ///
    /// # Errors
    ///
    /// Returns [`AggregateValidationError`] listing every failed field in
    /// discovery order.
    pub fn validate_prepared<'a, R>(
        &'a self,
        prepared: &'a PreparedHandler,
        request: &R,
    ) -> impl Future<Output = Result<ValidatedParams, AggregateValidationError>> + Send + use<'a, L, R>
    where
        R: RequestSource + ?Sized,
    {
        self.validate_snapshot(prepared, request.snapshot())
    }

    /// Prepares `handler` and validates a request against it.
    ///
    /// # Errors
    ///
    /// Returns [`RequestValidationError::Configuration`] when the handler is
    /// malformed and [`RequestValidationError::Rejected`] when any field
    /// fails.
    pub fn validate<'a, R>(
        &'a self,
        handler: &dyn RequestHandler,
        request: &R,
    ) -> impl Future<Output = Result<ValidatedParams, RequestValidationError>> + Send + use<'a, L, R>
    where
        R: RequestSource + ?Sized,
    {
        let prepared = self.prepare(handler);
        let data = request.snapshot();
        async move {
            let handler = prepared?;
            Ok(self.validate_snapshot(&handler, data).await?)
        }
    }

    /// Validates an already captured raw snapshot against a prepared
    /// handler.
    ///
    /// Fields are evaluated one after another in discovery order. Custom
    /// validators observe only the raw snapshot, never values parsed by
    /// earlier fields.
    ///
    /// # Errors
    ///
    /// Returns [`AggregateValidationError`] listing every failed field in
    /// discovery order.
    pub async fn validate_snapshot(
        &self,
        prepared: &PreparedHandler,
        data: RequestParams,
    ) -> Result<ValidatedParams, AggregateValidationError> {
        let resolver = ParameterResolver::from_config(&self.config);
        let mut context = ValidationContext::new(data, &self.config);

        for field in prepared.fields() {
            match field.spec() {
                FieldSpec::Custom(validator) => {
                    self.check_custom(&mut context, field.name(), validator.as_ref())
                        .await;
                }
                FieldSpec::RuleChain(chain) => {
                    self.check_rules(&mut context, &resolver, field.name(), chain);
                }
            }
        }

        context.finish()
    }

    async fn check_custom(
        &self,
        context: &mut ValidationContext,
        name: &str,
        validator: &dyn CustomValidator,
    ) {
        match validator.validate(&context.data).await {
            Ok(()) => debug!(field = %name, "custom validator passed"),
            Err(err) => {
                let message = err
                    .message()
                    .map_or_else(|| self.config.invalid_message.clone(), ToOwned::to_owned);
                warn!(field = %name, %message, "custom validator rejected request");
                context.failures.push(FieldFailure::custom(name, message));
            }
        }
    }

    fn check_rules(
        &self,
        context: &mut ValidationContext,
        resolver: &ParameterResolver,
        name: &str,
        chain: &RuleChain,
    ) {
        let resolved = resolver.resolve(&context.data, name);
        let source = resolved.source();
        let outcome = chain.evaluate(resolved.value(), self.library.as_ref(), &self.config);

        match outcome.into_result() {
            Ok(legal_value) => {
                let value = legal_value.unwrap_or(Value::Null);
                match source {
                    Some(container) => context.parsed.write(container, name, value),
                    None => context.parsed.write_default(name, value),
                }
                debug!(field = %name, source = ?source, "field passed");
            }
            Err(message) => {
                debug!(field = %name, %message, "field rejected");
                context.failures.push(FieldFailure::rule_chain(
                    name,
                    message,
                    self.config.field_separator.as_str(),
                ));
            }
        }
    }

    fn verify_rules(&self, field: &str, chain: &RuleChain) -> Result<(), ConfigurationError> {
        chain
            .rules()
            .iter()
            .find(|rule| !rule.is_optional() && !self.library.supports(rule.name()))
            .map_or(Ok(()), |rule| {
                Err(ConfigurationError::UnknownRule {
                    field: field.to_owned(),
                    rule: rule.name().to_owned(),
                })
            })
    }
}
