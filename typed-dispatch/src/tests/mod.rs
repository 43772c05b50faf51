//! Unit tests for registry, binding and dispatch

pub mod fixtures;
pub mod test_signature_binding;
pub mod test_value;
