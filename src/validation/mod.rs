//! Rule and rule-chain evaluation.
//!
//! Extends the domain [`Rule`](crate::domain::Rule) and
//! [`RuleChain`](crate::domain::RuleChain) types with evaluation against a
//! [`RuleLibrary`](crate::ports::RuleLibrary), and provides the value
//! coercion helpers shared by the engine.

mod chain;
pub mod coercion;
mod rule;

pub use coercion::{coerce, is_truthy, stringify};
