//! Step definitions and world state for request validation scenarios.

pub mod world;

mod given;
mod then;
mod when;
