//! Error types for registration, binding and dispatch.
//!
//! Setup failures (`ConfigurationError`, `UnknownTypeError`) surface while the
//! registry is populated or a dispatcher is built. `CallError` is the only
//! error a built dispatcher produces.

use miette::Diagnostic;
use thiserror::Error;

/// Misconfigured guards or overload declarations
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("Class {class} declares no type guard")]
    #[diagnostic(
        code(typed_dispatch::config::missing_guard),
        help("Return at least one `GuardDecl` from `Class::guards`")
    )]
    MissingGuard { class: String },

    #[error("Class {class} declares more than one type guard named {name}")]
    #[diagnostic(
        code(typed_dispatch::config::duplicate_guard),
        help("Give every additional guard its own name with `GuardDecl::named`")
    )]
    DuplicateGuard { class: String, name: String },

    #[error(
        "Signature of {function}.{method} lists {found} types but the method takes {expected} parameters"
    )]
    #[diagnostic(
        code(typed_dispatch::config::arity_mismatch),
        help("List exactly one type per declared parameter")
    )]
    ArityMismatch {
        function: String,
        method: String,
        expected: usize,
        found: usize,
    },

    #[error("Function {function} declares no overloads")]
    #[diagnostic(code(typed_dispatch::config::no_overloads))]
    NoOverloads { function: String },
}

/// A type reference that has no registry entry
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
#[error("Unknown type {name}")]
#[diagnostic(
    code(typed_dispatch::unknown_type),
    help("Register the type with `register_class` or `register_predicate` before binding")
)]
pub struct UnknownTypeError {
    pub name: String,
}

impl UnknownTypeError {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Any failure raised while populating the registry or building a dispatcher
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum SetupError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    UnknownType(#[from] UnknownTypeError),
}

/// Errors raised by invoking a dispatcher
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum CallError {
    /// No overload accepted the arguments. The message shape is stable;
    /// callers match on it.
    #[error(
        "TypeError: Unexpected type of argument in function {function} (expected: {expected}, actual: {actual}, index: {index})"
    )]
    #[diagnostic(code(typed_dispatch::call::unexpected_argument))]
    UnexpectedArgument {
        function: String,
        expected: String,
        actual: String,
        index: usize,
    },

    #[error(
        "Argument {index} of {function}.{method} passed the {expected} guard but could not be converted (actual: {actual})"
    )]
    #[diagnostic(
        code(typed_dispatch::call::conversion),
        help("The explicit type list admits values the typed parameter cannot hold")
    )]
    Conversion {
        function: String,
        method: String,
        expected: String,
        actual: String,
        index: usize,
    },
}

impl CallError {
    /// Create an unexpected argument error
    pub fn unexpected_argument(function: &str, expected: &str, actual: &str, index: usize) -> Self {
        Self::UnexpectedArgument {
            function: function.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
            index,
        }
    }
}

pub type Result<T, E = SetupError> = std::result::Result<T, E>;
