//! Port trait definitions for request validation.
//!
//! Ports describe what the engine needs from its collaborators: a library
//! of primitive predicates, a request exposing parameter containers, and
//! handlers describing their fields. Adapters in [`crate::adapters`]
//! provide concrete implementations.

pub mod config;
pub mod handler;
pub mod request;
pub mod rule_library;

pub use config::{PresencePolicy, ValidatorConfig};
pub use handler::{
    CUSTOM_VALIDATOR_PREFIX, CustomValidator, Element, HandlerMembers, Member, RequestHandler,
    is_custom_validator_name,
};
pub use request::RequestSource;
pub use rule_library::RuleLibrary;
