//! Data-driven handler definitions.
//!
//! A [`HandlerDefinition`] declares members explicitly, either in code or
//! from a JSON object, and can extend another definition. It is the
//! lightweight alternative to implementing
//! [`RequestHandler`](crate::ports::RequestHandler) on a dedicated type.

use crate::{
    domain::{ConfigurationError, Rule},
    ports::{CustomValidator, Element, HandlerMembers, Member, RequestHandler},
};
use serde_json::Value;

/// A handler assembled from explicit member declarations.
///
/// # Examples
///
/// ```
/// use paramguard::adapters::HandlerDefinition;
/// use paramguard::domain::Rule;
/// use paramguard::ports::RequestHandler;
/// use serde_json::json;
///
/// let pagination = HandlerDefinition::new()
///     .rules("page", [Rule::new("isInt", "must be a page number"), Rule::optional(1)]);
/// let listing = HandlerDefinition::from_json(&json!({
///     "sort": [{ "name": "isIn", "message": "unknown sort key", "params": [["name", "date"]] }]
/// }))
/// .expect("valid definition")
/// .extends(pagination);
///
/// assert_eq!(listing.members().len(), 1);
/// assert!(listing.parent().is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct HandlerDefinition {
    members: HandlerMembers,
    parent: Option<Box<HandlerDefinition>>,
}

impl HandlerDefinition {
    /// Creates a definition with no members.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads members from a JSON object, keeping key order.
    ///
    /// Arrays become array members: elements that are objects carrying a
    /// string `name` are read as rules, anything else is kept as a non-rule
    /// element and rejected later by field discovery. Every other value
    /// becomes a plain value member.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidDefinition`] when `definition` is
    /// not a JSON object.
    pub fn from_json(definition: &Value) -> Result<Self, ConfigurationError> {
        let object = definition.as_object().ok_or_else(|| {
            ConfigurationError::invalid_definition("handler definition must be a JSON object")
        })?;

        let members = object
            .iter()
            .map(|(name, value)| (name.clone(), member_from_json(value)))
            .collect();
        Ok(Self {
            members,
            parent: None,
        })
    }

    /// Parses [`HandlerDefinition::from_json`] input from text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidDefinition`] when the text is not
    /// valid JSON or not an object.
    pub fn from_json_str(definition: &str) -> Result<Self, ConfigurationError> {
        let value: Value = serde_json::from_str(definition)
            .map_err(|err| ConfigurationError::invalid_definition(err.to_string()))?;
        Self::from_json(&value)
    }

    /// Declares a rule-chain field.
    #[must_use]
    pub fn rules(mut self, name: impl Into<String>, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.members = self.members.rules(name, rules);
        self
    }

    /// Declares a custom validator method.
    #[must_use]
    pub fn method(
        mut self,
        name: impl Into<String>,
        validator: impl CustomValidator + 'static,
    ) -> Self {
        self.members = self.members.method(name, validator);
        self
    }

    /// Declares a plain value member.
    #[must_use]
    pub fn value(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.members = self.members.value(name, value);
        self
    }

    /// Declares an arbitrary member.
    #[must_use]
    pub fn member(mut self, name: impl Into<String>, member: Member) -> Self {
        self.members = self.members.member(name, member);
        self
    }

    /// Makes this definition extend `parent`.
    ///
    /// When called more than once, the latest parent replaces the previous
    /// one.
    #[must_use]
    pub fn extends(mut self, parent: Self) -> Self {
        self.parent = Some(Box::new(parent));
        self
    }
}

impl RequestHandler for HandlerDefinition {
    fn members(&self) -> HandlerMembers {
        self.members.clone()
    }

    fn parent(&self) -> Option<&dyn RequestHandler> {
        self.parent
            .as_deref()
            .map(|parent| parent as &dyn RequestHandler)
    }
}

fn member_from_json(value: &Value) -> Member {
    match value {
        Value::Array(elements) => Member::Array(elements.iter().map(element_from_json).collect()),
        other => Member::Value(other.clone()),
    }
}

fn element_from_json(value: &Value) -> Element {
    let names_a_rule = value.get("name").is_some_and(Value::is_string);
    if names_a_rule && let Ok(rule) = serde_json::from_value::<Rule>(value.clone()) {
        return Element::Rule(rule);
    }
    Element::Other(value.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_members_keep_declaration_order() {
        let definition = HandlerDefinition::from_json(&json!({
            "zeta": [{ "name": "isInt" }],
            "alpha": [{ "name": "isEmail", "message": "bad email" }],
            "title": "not a field"
        }))
        .expect("valid definition");

        let names: Vec<&str> = definition.members.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["zeta", "alpha", "title"]);
    }

    #[test]
    fn json_rule_elements_are_parsed() {
        let definition = HandlerDefinition::from_json(&json!({
            "pwd": [{ "name": "isLength", "message": "too short", "params": [{ "min": 6 }] }]
        }))
        .expect("valid definition");

        let members = definition.members();
        let (_, member) = members.iter().next().expect("one member");
        match member {
            Member::Array(elements) => assert_eq!(
                elements,
                &vec![Element::Rule(
                    Rule::new("isLength", "too short").with_param(json!({ "min": 6 }))
                )]
            ),
            other => panic!("expected rule array, got {other:?}"),
        }
    }

    #[test]
    fn json_non_rule_elements_are_kept_for_discovery() {
        let definition =
            HandlerDefinition::from_json(&json!({ "tags": ["a", { "name": "isInt" }] }))
                .expect("valid definition");

        let members = definition.members();
        let (_, member) = members.iter().next().expect("one member");
        assert!(matches!(
            member,
            Member::Array(elements) if matches!(elements.first(), Some(Element::Other(_)))
        ));
    }

    #[test]
    fn non_object_definition_is_rejected() {
        assert!(matches!(
            HandlerDefinition::from_json(&json!(["isInt"])),
            Err(ConfigurationError::InvalidDefinition(_))
        ));
        assert!(matches!(
            HandlerDefinition::from_json_str("{ not json"),
            Err(ConfigurationError::InvalidDefinition(_))
        ));
    }
}
