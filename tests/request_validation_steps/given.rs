//! Given steps for request validation BDD scenarios.

use super::world::ValidationWorld;
use paramguard::{
    adapters::{FnValidator, HandlerDefinition},
    domain::{CustomValidatorError, ParamSource, Rule},
};
use rstest_bdd_macros::given;
use serde_json::{Value, json};

// ============================================================================
// Handlers
// ============================================================================

#[given("a handler requiring an integer age")]
fn handler_requiring_age(world: &mut ValidationWorld) -> Result<(), eyre::Report> {
    world.handler =
        HandlerDefinition::new().rules("age", [Rule::new("isInt", "must be an integer")]);
    Ok(())
}

#[given("a handler requiring an integer limit")]
fn handler_requiring_limit(world: &mut ValidationWorld) -> Result<(), eyre::Report> {
    world.handler = HandlerDefinition::new().rules("limit", [Rule::new("isInt", "must be a limit")]);
    Ok(())
}

#[given("a handler with an optional email defaulting to a@b.com")]
fn handler_with_optional_email(world: &mut ValidationWorld) -> Result<(), eyre::Report> {
    world.handler = HandlerDefinition::new().rules(
        "email",
        [
            Rule::optional("a@b.com"),
            Rule::new("isEmail", "must be an email address"),
        ],
    );
    Ok(())
}

#[given("a handler requiring a password of at least 6 characters")]
fn handler_requiring_password(world: &mut ValidationWorld) -> Result<(), eyre::Report> {
    world.handler = HandlerDefinition::new().rules(
        "pwd",
        [Rule::new("isLength", "must be at least 6 characters").with_param(json!({ "min": 6 }))],
    );
    Ok(())
}

#[given("a handler requiring an integer age, a name and an email address")]
fn handler_requiring_profile(world: &mut ValidationWorld) -> Result<(), eyre::Report> {
    world.handler = HandlerDefinition::new()
        .rules("age", [Rule::new("isInt", "must be an integer")])
        .rules("name", [Rule::new("isAlpha", "must be letters")])
        .rules("email", [Rule::new("isEmail", "must be an email address")]);
    Ok(())
}

#[given("a handler requiring a tenant header")]
fn handler_requiring_tenant(world: &mut ValidationWorld) -> Result<(), eyre::Report> {
    world.handler = HandlerDefinition::new().method(
        "validateTenant",
        FnValidator::new(|data| {
            data.get("header.tenant")
                .and_then(Value::as_str)
                .filter(|tenant| !tenant.is_empty())
                .map(|_| ())
                .ok_or_else(|| CustomValidatorError::new("tenant header is required"))
        }),
    );
    Ok(())
}

#[given("a handler using an unknown rule")]
fn handler_using_unknown_rule(world: &mut ValidationWorld) -> Result<(), eyre::Report> {
    world.handler = HandlerDefinition::new().rules("age", [Rule::new("isAgeLike", "")]);
    Ok(())
}

// ============================================================================
// Request parameters
// ============================================================================

#[given(r#"the query parameter "{field}" is "{value}""#)]
fn query_parameter(
    world: &mut ValidationWorld,
    field: String,
    value: String,
) -> Result<(), eyre::Report> {
    world.set_param(ParamSource::Query, field, Value::String(value));
    Ok(())
}

#[given(r#"the body parameter "{field}" is "{value}""#)]
fn body_parameter(
    world: &mut ValidationWorld,
    field: String,
    value: String,
) -> Result<(), eyre::Report> {
    world.set_param(ParamSource::Body, field, Value::String(value));
    Ok(())
}

#[given(r#"an empty body parameter "{field}""#)]
fn empty_body_parameter(world: &mut ValidationWorld, field: String) -> Result<(), eyre::Report> {
    world.set_param(ParamSource::Body, field, Value::String(String::new()));
    Ok(())
}

#[given(r#"the header "{field}" is "{value}""#)]
fn header_parameter(
    world: &mut ValidationWorld,
    field: String,
    value: String,
) -> Result<(), eyre::Report> {
    world.set_param(ParamSource::Header, field, Value::String(value));
    Ok(())
}
