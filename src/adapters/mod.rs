//! Adapter implementations of the validation ports.
//!
//! - [`StandardRuleLibrary`]: built-in string predicates
//! - [`RawRequest`]: in-memory request containers
//! - [`HandlerDefinition`]: data-driven handler declarations
//! - [`FnValidator`]: closure-backed custom validators

pub mod definition;
pub mod fn_validator;
pub mod raw_request;
pub mod standard_rules;

pub use definition::HandlerDefinition;
pub use fn_validator::FnValidator;
pub use raw_request::RawRequest;
pub use standard_rules::{Predicate, StandardRuleLibrary};
