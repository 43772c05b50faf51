//! Type guards and references to registered types.
//!
//! A `Class` is any user type that can appear as a dispatch argument. It
//! declares one or more guards: predicates deciding whether an arbitrary
//! `Value` belongs to the type. Overload signatures refer to registered
//! types through `TypeRef`, either by name or by class.

use crate::value::Value;
use std::any::TypeId;
use std::fmt;
use std::sync::Arc;

/// A type predicate
pub type Predicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Name reported for the wildcard guard
pub const WILDCARD_NAME: &str = "any";

/// A user type that can be registered with a `TypeRegistry`
///
/// ```
/// use typed_dispatch::{Class, GuardDecl, Value};
///
/// struct Fish {
///     name: String,
/// }
///
/// impl Fish {
///     fn is_fish(value: &Value) -> bool {
///         value.downcast_ref::<Fish>().is_some()
///     }
/// }
///
/// impl Class for Fish {
///     const NAME: &'static str = "Fish";
///
///     fn guards() -> Vec<GuardDecl> {
///         vec![GuardDecl::new(Fish::is_fish)]
///     }
/// }
/// ```
pub trait Class: std::any::Any + Send + Sync {
    /// Default registry name of the class
    const NAME: &'static str;

    /// Guards declared by this class, in declaration order
    fn guards() -> Vec<GuardDecl>;
}

/// A guard declared on a class, optionally under an explicit type name
#[derive(Clone)]
pub struct GuardDecl {
    name: Option<String>,
    predicate: Predicate,
}

impl GuardDecl {
    /// Guard registered under the class name (or the registration alias)
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self {
            name: None,
            predicate: Arc::new(predicate),
        }
    }

    /// Guard registered under an explicit type name
    pub fn named<F>(name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self {
            name: Some(name.into()),
            predicate: Arc::new(predicate),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub(crate) fn into_parts(self) -> (Option<String>, Predicate) {
        (self.name, self.predicate)
    }
}

impl fmt::Debug for GuardDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuardDecl")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// A registry entry: a type name and its predicate
#[derive(Clone)]
pub struct Guard {
    name: String,
    predicate: Predicate,
    wildcard: bool,
}

impl Guard {
    pub(crate) fn new(name: String, predicate: Predicate) -> Self {
        Self {
            name,
            predicate,
            wildcard: false,
        }
    }

    /// The always-true guard used for parameters without type information.
    /// It is never stored in a registry.
    pub fn wildcard() -> Self {
        Self {
            name: WILDCARD_NAME.to_string(),
            predicate: Arc::new(|_| true),
            wildcard: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_wildcard(&self) -> bool {
        self.wildcard
    }

    /// Test whether `value` belongs to this type
    pub fn matches(&self, value: &Value) -> bool {
        self.wildcard || (self.predicate)(value)
    }
}

impl fmt::Debug for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard")
            .field("name", &self.name)
            .field("wildcard", &self.wildcard)
            .finish_non_exhaustive()
    }
}

/// Reference to a registered class, independent of the name it was registered under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassRef {
    id: TypeId,
    name: &'static str,
}

impl ClassRef {
    pub fn of<T: Class>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: T::NAME,
        }
    }

    pub(crate) fn id(&self) -> TypeId {
        self.id
    }

    /// The class's own name (not necessarily its registry name)
    pub fn class_name(&self) -> &'static str {
        self.name
    }
}

/// A type named in an overload signature
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// Registry name, e.g. `"number"` or `"Fish"`
    Name(String),
    /// Registered class, normalized to its registry name on resolution
    Class(ClassRef),
}

impl TypeRef {
    pub fn class<T: Class>() -> Self {
        TypeRef::Class(ClassRef::of::<T>())
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Name(name) => write!(f, "{name}"),
            TypeRef::Class(class) => write!(f, "{}", class.class_name()),
        }
    }
}

impl From<&str> for TypeRef {
    fn from(name: &str) -> Self {
        TypeRef::Name(name.to_string())
    }
}

impl From<String> for TypeRef {
    fn from(name: String) -> Self {
        TypeRef::Name(name)
    }
}

impl From<ClassRef> for TypeRef {
    fn from(class: ClassRef) -> Self {
        TypeRef::Class(class)
    }
}
