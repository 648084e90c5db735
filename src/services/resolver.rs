//! Resolution of a field's raw value across the request containers.

use crate::{
    domain::{ParamSource, RequestParams},
    ports::{PresencePolicy, ValidatorConfig},
    validation::is_truthy,
};
use serde_json::Value;

/// A field value located in the raw snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedParam<'a> {
    value: Option<&'a Value>,
    source: Option<ParamSource>,
}

impl<'a> ResolvedParam<'a> {
    /// A field that no container provided.
    #[must_use]
    pub const fn absent() -> Self {
        Self {
            value: None,
            source: None,
        }
    }

    /// Returns the raw value, or `None` when the field is absent.
    #[must_use]
    pub const fn value(&self) -> Option<&'a Value> {
        self.value
    }

    /// Returns the container the value was found in.
    #[must_use]
    pub const fn source(&self) -> Option<ParamSource> {
        self.source
    }

    /// Returns the `[container, field]` path of the value, or an empty path
    /// when the field is absent.
    #[must_use]
    pub fn source_path<'f>(&self, field: &'f str) -> Vec<&'f str> {
        self.source
            .map(|source| vec![source.as_str(), field])
            .unwrap_or_default()
    }
}

/// Finds the first container providing a value for a field.
///
/// # Examples
///
/// ```
/// use paramguard::domain::{ParamSource, RequestParams};
/// use paramguard::ports::ValidatorConfig;
/// use paramguard::services::ParameterResolver;
/// use serde_json::{Value, json};
///
/// let data = RequestParams::new(
///     json!({ "id": "from-query" }),
///     json!({ "id": "from-body" }),
///     Value::Null,
///     Value::Null,
/// );
/// let resolver = ParameterResolver::from_config(&ValidatorConfig::default());
/// let resolved = resolver.resolve(&data, "id");
///
/// assert_eq!(resolved.source(), Some(ParamSource::Query));
/// assert_eq!(resolved.value(), Some(&json!("from-query")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterResolver {
    presence: PresencePolicy,
    priority: Vec<ParamSource>,
}

impl Default for ParameterResolver {
    fn default() -> Self {
        Self::from_config(&ValidatorConfig::default())
    }
}

impl ParameterResolver {
    /// Creates a resolver using the configured presence policy and
    /// container priority.
    #[must_use]
    pub fn from_config(config: &ValidatorConfig) -> Self {
        Self {
            presence: config.presence,
            priority: config.source_priority.clone(),
        }
    }

    /// Looks `field` up in each container in priority order.
    ///
    /// The first container whose value counts as provided wins. Under the
    /// default truthy policy, empty strings, `0` and `false` are skipped as
    /// if missing.
    #[must_use]
    pub fn resolve<'a>(&self, data: &'a RequestParams, field: &str) -> ResolvedParam<'a> {
        self.priority
            .iter()
            .find_map(|&source| {
                data.lookup(source, field)
                    .filter(|value| self.is_provided(value))
                    .map(|value| ResolvedParam {
                        value: Some(value),
                        source: Some(source),
                    })
            })
            .unwrap_or_else(ResolvedParam::absent)
    }

    fn is_provided(&self, value: &Value) -> bool {
        match self.presence {
            PresencePolicy::Truthy => is_truthy(value),
            PresencePolicy::Present => !value.is_null(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use serde_json::json;

    #[fixture]
    fn data() -> RequestParams {
        RequestParams::new(
            json!({ "shared": "q", "blank": "", "zero": 0 }),
            json!({ "shared": "b", "blank": "filled", "flag": false, "only_body": "b" }),
            json!({ "id": "7" }),
            json!({ "zero": "h" }),
        )
    }

    #[rstest]
    fn query_takes_priority_over_body(data: RequestParams) {
        let resolved = ParameterResolver::default().resolve(&data, "shared");
        assert_eq!(resolved.source(), Some(ParamSource::Query));
        assert_eq!(resolved.source_path("shared"), vec!["query", "shared"]);
    }

    #[rstest]
    #[case("only_body", Some(ParamSource::Body))]
    #[case("id", Some(ParamSource::Path))]
    #[case("blank", Some(ParamSource::Body))]
    #[case("zero", Some(ParamSource::Header))]
    #[case("flag", None)]
    #[case("missing", None)]
    fn falsy_values_are_skipped_by_default(
        data: RequestParams,
        #[case] field: &str,
        #[case] expected: Option<ParamSource>,
    ) {
        assert_eq!(ParameterResolver::default().resolve(&data, field).source(), expected);
    }

    #[rstest]
    fn absent_field_has_empty_path(data: RequestParams) {
        let resolved = ParameterResolver::default().resolve(&data, "missing");
        assert_eq!(resolved, ResolvedParam::absent());
        assert!(resolved.source_path("missing").is_empty());
    }

    #[rstest]
    #[case("blank", ParamSource::Query, json!(""))]
    #[case("zero", ParamSource::Query, json!(0))]
    #[case("flag", ParamSource::Body, json!(false))]
    fn present_policy_accepts_falsy_values(
        data: RequestParams,
        #[case] field: &str,
        #[case] source: ParamSource,
        #[case] value: Value,
    ) {
        let resolver = ParameterResolver::from_config(&ValidatorConfig::strict_presence());
        let resolved = resolver.resolve(&data, field);
        assert_eq!(resolved.source(), Some(source));
        assert_eq!(resolved.value(), Some(&value));
    }

    #[rstest]
    fn custom_priority_is_honoured(data: RequestParams) {
        let config = ValidatorConfig::default()
            .with_source_priority([ParamSource::Body, ParamSource::Query]);
        let resolved = ParameterResolver::from_config(&config).resolve(&data, "shared");
        assert_eq!(resolved.value(), Some(&json!("b")));
    }
}
