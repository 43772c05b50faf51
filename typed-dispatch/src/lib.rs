//! Typed Dispatch
//!
//! Runtime multiple dispatch: a set of same-named overloads is bound into one
//! callable that, per call, tests the runtime types of its arguments and
//! invokes the first overload (in declaration order) whose parameter guards
//! all accept them.
//!
//! ## Architecture
//!
//! - **Type Registry**: named guard predicates; primitives plus registered classes
//! - **Signature Binder**: resolves each overload's parameter types once, eagerly
//! - **Dispatcher**: first-match resolution and the stable mismatch error
//!
//! ```
//! use typed_dispatch::{OverloadSet, TypeRegistry, Value};
//!
//! let registry = TypeRegistry::new();
//! let describe = registry
//!     .function(
//!         OverloadSet::new("Describe")
//!             .signature("num", |a: f64| format!("number {a}"))
//!             .signature("str", |a: String| format!("string {a:?}")),
//!     )
//!     .unwrap();
//!
//! assert_eq!(describe.call(&[Value::from(2)]).unwrap(), Value::from("number 2"));
//! assert_eq!(
//!     describe.call(&[Value::from(true)]).unwrap_err().to_string(),
//!     "TypeError: Unexpected type of argument in function Describe (expected: number, actual: boolean, index: 0)"
//! );
//! ```

#![allow(clippy::result_large_err)]

pub mod binder;
pub mod class;
pub mod dispatcher;
pub mod error;
pub mod param;
pub mod registry;
pub mod value;

#[cfg(test)]
#[path = "tests/mod.rs"]
mod tests;

// Re-export public API
pub use binder::{MethodDecl, Signature, SignatureBinder};
pub use class::{Class, ClassRef, Guard, GuardDecl, Predicate, TypeRef};
pub use dispatcher::{Dispatcher, OverloadSet};
pub use error::{CallError, ConfigurationError, SetupError, UnknownTypeError};
pub use param::{Overload, Param};
pub use registry::TypeRegistry;
pub use value::{Instance, NativeFunction, Value};
