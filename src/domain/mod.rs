//! Domain model for request parameter validation.
//!
//! Pure value types: rules and rule chains, their outcomes, the request
//! parameter containers and the error taxonomy. Nothing here talks to the
//! rule library or the HTTP layer; those sit behind [`crate::ports`].

mod error;
mod outcome;
mod params;
mod path;
mod rule;

pub use error::{
    AggregateValidationError, ConfigurationError, CustomValidatorError, FieldFailure, FieldKind,
    ParseParamSourceError, RequestValidationError,
};
pub use outcome::{FieldOutcome, RuleOutcome};
pub use params::{ParamSource, ParsedParams, RequestParams};
pub use path::{read_path, split_path, write_path};
pub use rule::{OPTIONAL_RULE, OPTIONAL_RULE_ALIAS, Rule, RuleChain, TypeHint};
