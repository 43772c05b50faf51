//! Signature binding
//!
//! Turns each declared overload method into a `Signature`: the ordered guards
//! its parameters must satisfy, resolved once against the registry.
//!
//! Two modes are supported, chosen per method:
//! - **Explicit**: the method carries a type list; each entry is resolved and
//!   the list length must equal the method's arity.
//! - **Implicit**: each parameter's declared type (if any) is resolved; a
//!   parameter without one becomes a wildcard.

use crate::class::{Guard, TypeRef};
use crate::error::{CallError, ConfigurationError, Result};
use crate::param::Body;
use crate::registry::TypeRegistry;
use crate::value::Value;
use std::fmt;
use tracing::debug;

/// An overload method as declared, before binding
pub struct MethodDecl {
    key: String,
    /// Declared type per parameter; `None` when the parameter has no nominal type
    declared: Vec<Option<TypeRef>>,
    explicit: Option<Vec<TypeRef>>,
    body: Body,
}

impl MethodDecl {
    pub(crate) fn new(
        key: String,
        declared: Vec<Option<TypeRef>>,
        explicit: Option<Vec<TypeRef>>,
        body: Body,
    ) -> Self {
        Self {
            key,
            declared,
            explicit,
            body,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Declared parameter count
    pub fn arity(&self) -> usize {
        self.declared.len()
    }
}

impl fmt::Debug for MethodDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodDecl")
            .field("key", &self.key)
            .field("declared", &self.declared)
            .field("explicit", &self.explicit)
            .finish_non_exhaustive()
    }
}

/// A bound overload: resolved parameter guards plus the body to invoke
#[derive(Clone)]
pub struct Signature {
    owner: String,
    method_key: String,
    params: Vec<Guard>,
    body: Body,
}

impl Signature {
    /// Name of the overload set this signature belongs to
    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn method_key(&self) -> &str {
        &self.method_key
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    pub fn param_types(&self) -> &[Guard] {
        &self.params
    }

    /// Registry names of the parameter types (`any` for wildcards)
    pub fn type_names(&self) -> Vec<&str> {
        self.params.iter().map(Guard::name).collect()
    }

    /// Index of the first argument rejected by its guard, or `None` if all pass.
    /// The caller is responsible for checking the arity first.
    pub fn first_mismatch(&self, args: &[Value]) -> Option<usize> {
        self.params
            .iter()
            .zip(args)
            .position(|(guard, arg)| !guard.matches(arg))
    }

    pub(crate) fn invoke(&self, args: &[Value]) -> std::result::Result<Value, CallError> {
        (self.body)(args)
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signature")
            .field("owner", &self.owner)
            .field("method_key", &self.method_key)
            .field("params", &self.type_names())
            .finish_non_exhaustive()
    }
}

/// Binds declared methods against a registry
pub struct SignatureBinder<'r> {
    registry: &'r TypeRegistry,
}

impl<'r> SignatureBinder<'r> {
    pub fn new(registry: &'r TypeRegistry) -> Self {
        Self { registry }
    }

    /// Bind one method of the overload set `owner`
    pub fn bind(&self, owner: &str, method: MethodDecl) -> Result<Signature> {
        let MethodDecl {
            key,
            declared,
            explicit,
            body,
        } = method;

        let params = match explicit {
            Some(types) => {
                if types.len() != declared.len() {
                    return Err(ConfigurationError::ArityMismatch {
                        function: owner.to_string(),
                        method: key,
                        expected: declared.len(),
                        found: types.len(),
                    }
                    .into());
                }
                types
                    .iter()
                    .map(|type_ref| self.registry.resolve(type_ref))
                    .collect::<std::result::Result<Vec<_>, _>>()?
            }
            None => declared
                .iter()
                .map(|declared| match declared {
                    Some(type_ref) => self.registry.resolve(type_ref),
                    None => Ok(Guard::wildcard()),
                })
                .collect::<std::result::Result<Vec<_>, _>>()?,
        };

        let signature = Signature {
            owner: owner.to_string(),
            method_key: key,
            params,
            body,
        };
        debug!(
            function = owner,
            method = signature.method_key(),
            params = ?signature.type_names(),
            "bound signature"
        );
        Ok(signature)
    }
}
