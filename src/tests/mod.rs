//! Unit tests for field discovery and request validation.
//!
//! Tests are organised by component, covering happy paths, error cases and
//! edge cases of the public APIs.
