//! World state for request validation BDD scenarios.

use paramguard::{
    adapters::{HandlerDefinition, RawRequest, StandardRuleLibrary},
    domain::{ParamSource, RequestValidationError},
    services::{RequestValidator, ValidatedParams},
};
use rstest::fixture;
use serde_json::{Map, Value};
use std::sync::Arc;

/// World state for request validation BDD tests.
pub struct ValidationWorld {
    pub validator: RequestValidator<StandardRuleLibrary>,
    pub handler: HandlerDefinition,
    pub query: Map<String, Value>,
    pub body: Map<String, Value>,
    pub path: Map<String, Value>,
    pub header: Map<String, Value>,
    pub outcome: Option<Result<ValidatedParams, RequestValidationError>>,
}

impl Default for ValidationWorld {
    fn default() -> Self {
        Self {
            validator: RequestValidator::new(Arc::new(StandardRuleLibrary::new())),
            handler: HandlerDefinition::new(),
            query: Map::new(),
            body: Map::new(),
            path: Map::new(),
            header: Map::new(),
            outcome: None,
        }
    }
}

impl ValidationWorld {
    /// Stores a raw parameter in the named container.
    pub fn set_param(&mut self, source: ParamSource, field: String, value: Value) {
        let container = match source {
            ParamSource::Query => &mut self.query,
            ParamSource::Body => &mut self.body,
            ParamSource::Path => &mut self.path,
            ParamSource::Header => &mut self.header,
        };
        container.insert(field, value);
    }

    /// Builds the request from the parameters gathered so far.
    pub fn request(&self) -> RawRequest {
        RawRequest::new()
            .with_query(Value::Object(self.query.clone()))
            .with_body(Value::Object(self.body.clone()))
            .with_path_params(Value::Object(self.path.clone()))
            .with_header(Value::Object(self.header.clone()))
    }
}

#[fixture]
pub fn world() -> ValidationWorld {
    ValidationWorld::default()
}

pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
