//! Type registry mapping type names to guard predicates
//!
//! The registry is populated during setup (primitives, classes, standalone
//! predicates) and is only read once dispatchers are built from it.
//! Registering while another thread resolves against the same registry is
//! not supported; the borrow checker enforces this for a single owner.

use crate::binder::SignatureBinder;
use crate::class::{Class, ClassRef, Guard, Predicate, TypeRef};
use crate::dispatcher::{Dispatcher, OverloadSet};
use crate::error::{ConfigurationError, Result, UnknownTypeError};
use crate::value::Value;
use indexmap::IndexMap;
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Registry of named type guards
#[derive(Clone)]
pub struct TypeRegistry {
    /// Guards by type name, in first-registration order
    guards: IndexMap<String, Guard>,
    /// Registry name of each registered class
    classes: HashMap<TypeId, String>,
}

impl TypeRegistry {
    /// Create a registry seeded with the primitive types
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register_primitives();
        registry
    }

    /// Create a registry without any entries
    pub fn empty() -> Self {
        Self {
            guards: IndexMap::new(),
            classes: HashMap::new(),
        }
    }

    fn register_primitives(&mut self) {
        self.register_primitive("undefined", Value::is_undefined);
        self.register_primitive("null", Value::is_null);
        self.register_primitive("boolean", |v| matches!(v, Value::Boolean(_)));
        self.register_primitive("number", |v| matches!(v, Value::Number(_)));
        self.register_primitive("string", |v| matches!(v, Value::String(_)));
        self.register_primitive("function", |v| matches!(v, Value::Function(_)));
        self.register_primitive("object", |v| {
            matches!(v, Value::Object(_) | Value::Array(_) | Value::Instance(_))
        });
        self.register_primitive("array", |v| matches!(v, Value::Array(_)));
        self.register_primitive("record", |v| matches!(v, Value::Object(_)));
    }

    fn register_primitive(&mut self, name: &str, predicate: fn(&Value) -> bool) {
        self.insert(name.to_string(), Arc::new(predicate));
    }

    fn insert(&mut self, name: String, predicate: Predicate) {
        let guard = Guard::new(name.clone(), predicate);
        if self.guards.insert(name.clone(), guard).is_some() {
            debug!(type_name = %name, "replaced type guard");
        } else {
            debug!(type_name = %name, "registered type guard");
        }
    }

    /// Register a standalone predicate under `name`. Re-registering a name
    /// replaces its predicate.
    pub fn register_predicate<F>(&mut self, name: impl Into<String>, predicate: F)
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.insert(name.into(), Arc::new(predicate));
    }

    /// Register every guard declared by `T`. Unnamed guards are registered
    /// under `T::NAME`.
    pub fn register_class<T: Class>(&mut self) -> Result<(), ConfigurationError> {
        self.register_class_guards::<T>(T::NAME)
    }

    /// Register every guard declared by `T`, registering unnamed guards under
    /// `alias` instead of the class name
    pub fn register_class_as<T: Class>(
        &mut self,
        alias: impl Into<String>,
    ) -> Result<(), ConfigurationError> {
        self.register_class_guards::<T>(&alias.into())
    }

    fn register_class_guards<T: Class>(&mut self, default_name: &str) -> Result<(), ConfigurationError> {
        let declared = T::guards();
        if declared.is_empty() {
            return Err(ConfigurationError::MissingGuard {
                class: T::NAME.to_string(),
            });
        }

        // Validate the whole class before touching the registry
        let mut entries: IndexMap<String, Predicate> = IndexMap::new();
        let mut class_name = None;
        for decl in declared {
            let (explicit, predicate) = decl.into_parts();
            let name = match explicit {
                Some(name) => name,
                None => {
                    class_name = Some(default_name.to_string());
                    default_name.to_string()
                }
            };
            if entries.contains_key(&name) {
                return Err(ConfigurationError::DuplicateGuard {
                    class: T::NAME.to_string(),
                    name,
                });
            }
            entries.insert(name, predicate);
        }

        for (name, predicate) in entries {
            self.insert(name, predicate);
        }

        let class = ClassRef::of::<T>();
        match class_name {
            Some(name) => {
                debug!(class = T::NAME, type_name = %name, "registered class");
                self.classes.insert(class.id(), name);
            }
            None => {
                debug!(class = T::NAME, "registered class with named guards only");
                self.classes.remove(&class.id());
            }
        }
        Ok(())
    }

    /// Look up the guard for a type name or registered class
    pub fn resolve(&self, type_ref: &TypeRef) -> Result<Guard, UnknownTypeError> {
        let name = match type_ref {
            TypeRef::Name(name) => name.as_str(),
            TypeRef::Class(class) => self
                .classes
                .get(&class.id())
                .map(String::as_str)
                .ok_or_else(|| UnknownTypeError::new(class.class_name()))?,
        };

        self.guards
            .get(name)
            .cloned()
            .ok_or_else(|| UnknownTypeError::new(name))
    }

    /// Check if a type name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.guards.contains_key(name)
    }

    /// Registered type names in registration order
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.guards.keys().map(String::as_str)
    }

    /// Name `T` was registered under, if any
    pub fn class_name<T: Class>(&self) -> Option<&str> {
        self.classes.get(&TypeId::of::<T>()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.guards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guards.is_empty()
    }

    /// Bind every overload of `overloads` and build its dispatcher.
    ///
    /// Unknown type references and malformed type lists fail here rather
    /// than on the first call.
    pub fn function(&self, overloads: OverloadSet) -> Result<Dispatcher> {
        let (name, methods) = overloads.into_parts();
        if methods.is_empty() {
            return Err(ConfigurationError::NoOverloads { function: name }.into());
        }

        let binder = SignatureBinder::new(self);
        let signatures = methods
            .into_iter()
            .map(|method| binder.bind(&name, method))
            .collect::<Result<Vec<_>>>()?;

        Ok(Dispatcher::new(name, signatures))
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("types", &self.guards.keys().collect::<Vec<_>>())
            .field("classes", &self.classes.len())
            .finish()
    }
}
