//! Paramguard: declarative request validation.
//!
//! Handlers declare the parameters they accept as ordered rule chains and
//! custom validator methods. The engine discovers those declarations across
//! the handler's inheritance chain, resolves every field from the request's
//! query, body, path and header containers, applies the rules and coerces
//! accepted values. A successful call yields the raw snapshot alongside a
//! parsed tree; a failed call yields every field failure at once.
//!
//! # Architecture
//!
//! Paramguard follows hexagonal architecture principles:
//!
//! - **Domain**: Rules, parameter containers, outcomes and errors
//! - **Ports**: Traits for handlers, request sources and rule libraries
//! - **Adapters**: Standard predicates, JSON handler definitions and raw
//!   requests
//! - **Services**: Field discovery, parameter resolution and the validator
//!
//! # Modules
//!
//! - [`domain`]: Core value types
//! - [`validation`]: Rule evaluation and value coercion
//! - [`services`]: The [`services::RequestValidator`] engine

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
pub mod validation;

#[cfg(test)]
mod tests;
