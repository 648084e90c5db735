//! Orchestration services for request validation.
//!
//! - [`FieldDiscovery`] enumerates a handler hierarchy's validated fields
//! - [`ParameterResolver`] locates a field's raw value in the request
//! - [`RequestValidator`] runs every field and aggregates failures
//! - [`ValidatedParams`] exposes the validated values by dotted path

pub mod discovery;
pub mod resolver;
pub mod validated;
pub mod validator;

pub use discovery::{DiscoveredField, FieldDiscovery, FieldSpec};
pub use resolver::{ParameterResolver, ResolvedParam};
pub use validated::ValidatedParams;
pub use validator::{PreparedHandler, RequestValidator};
