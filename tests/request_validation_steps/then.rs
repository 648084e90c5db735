//! Then steps for request validation BDD scenarios.

use super::world::ValidationWorld;
use eyre::eyre;
use paramguard::{
    domain::{AggregateValidationError, RequestValidationError},
    services::ValidatedParams,
};
use rstest_bdd_macros::then;
use serde_json::{Value, json};

// ============================================================================
// Helper Functions
// ============================================================================

/// Extract the validated parameters, failing when the request was rejected.
fn accepted(world: &ValidationWorld) -> Result<&ValidatedParams, eyre::Report> {
    match world.outcome.as_ref() {
        Some(Ok(params)) => Ok(params),
        Some(Err(err)) => Err(eyre!("request was rejected: {err}")),
        None => Err(eyre!("request has not been validated")),
    }
}

/// Extract the aggregated rejection, failing for any other outcome.
fn rejection(world: &ValidationWorld) -> Result<&AggregateValidationError, eyre::Report> {
    match world.outcome.as_ref() {
        Some(Err(err)) => err
            .rejection()
            .ok_or_else(|| eyre!("expected field failures, got {err}")),
        Some(Ok(_)) => Err(eyre!("request was accepted")),
        None => Err(eyre!("request has not been validated")),
    }
}

/// Assert a condition, returning an error with the given message if false.
fn assert_that(condition: bool, message: impl Into<String>) -> Result<(), eyre::Report> {
    if condition {
        Ok(())
    } else {
        Err(eyre!(message.into()))
    }
}

// ============================================================================
// Then Steps
// ============================================================================

#[then("the request is accepted")]
fn request_accepted(world: &ValidationWorld) -> Result<(), eyre::Report> {
    accepted(world).map(|_| ())
}

#[then("the request is rejected with {count:usize} messages")]
fn request_rejected(world: &ValidationWorld, count: usize) -> Result<(), eyre::Report> {
    let aggregate = rejection(world)?;
    assert_that(
        aggregate.len() == count,
        format!("expected {count} messages, got {:?}", aggregate.messages()),
    )
}

#[then(r#"the rejection includes the message "{message}""#)]
fn rejection_includes(world: &ValidationWorld, message: String) -> Result<(), eyre::Report> {
    let messages = rejection(world)?.messages();
    assert_that(
        messages.contains(&message),
        format!("{message:?} not found in {messages:?}"),
    )
}

#[then(r#"the parsed value at "{path}" is the integer {value:i64}"#)]
fn parsed_integer(world: &ValidationWorld, path: String, value: i64) -> Result<(), eyre::Report> {
    let found = accepted(world)?.get(&path);
    assert_that(
        found == Some(&json!(value)),
        format!("expected {value} at {path}, got {found:?}"),
    )
}

#[then(r#"the parsed value at "{path}" is the string "{value}""#)]
fn parsed_string(world: &ValidationWorld, path: String, value: String) -> Result<(), eyre::Report> {
    let found = accepted(world)?.get(&path);
    assert_that(
        found == Some(&Value::String(value.clone())),
        format!("expected {value:?} at {path}, got {found:?}"),
    )
}

#[then(r#"the raw value at "{path}" is the string "{value}""#)]
fn raw_string(world: &ValidationWorld, path: String, value: String) -> Result<(), eyre::Report> {
    let found = accepted(world)?.get_raw(&path);
    assert_that(
        found == Some(&Value::String(value.clone())),
        format!("expected raw {value:?} at {path}, got {found:?}"),
    )
}

#[then("the handler is reported as misconfigured")]
fn handler_misconfigured(world: &ValidationWorld) -> Result<(), eyre::Report> {
    match world.outcome.as_ref() {
        Some(Err(RequestValidationError::Configuration(_))) => Ok(()),
        other => Err(eyre!("expected a configuration error, got {other:?}")),
    }
}
