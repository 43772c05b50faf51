//! Overload sets and the dispatchers built from them
//!
//! An `OverloadSet` collects same-named methods in declaration order. A
//! `TypeRegistry` binds it into a `Dispatcher`, whose call-time resolution is:
//!
//! 1. Walk the signatures in declaration order, skipping any whose arity
//!    differs from the argument count.
//! 2. Test each argument against its parameter guard; the first signature
//!    whose guards all pass is invoked.
//! 3. Otherwise report the earliest failing position of the first
//!    arity-matching signature (or position 0 of the first signature when no
//!    arity matches).

use crate::binder::{MethodDecl, Signature};
use crate::class::TypeRef;
use crate::error::CallError;
use crate::param::{Body, Overload};
use crate::value::{NativeFunction, Value};
use std::sync::Arc;
use tracing::{debug, trace};

/// The dispatch target: a named, ordered collection of overload methods
#[derive(Debug)]
pub struct OverloadSet {
    name: String,
    methods: Vec<MethodDecl>,
}

impl OverloadSet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add an overload whose parameter types are taken from the closure's
    /// declared parameter types
    pub fn signature<F, Args>(mut self, key: impl Into<String>, body: F) -> Self
    where
        F: Overload<Args>,
    {
        let key: String = key.into();
        let body = body.into_body(&self.name, &key);
        self.methods
            .push(MethodDecl::new(key, F::declared_types(), None, body));
        self
    }

    /// Add an overload with an explicit type list, one entry per parameter
    pub fn signature_with<F, Args, I, T>(mut self, key: impl Into<String>, types: I, body: F) -> Self
    where
        F: Overload<Args>,
        I: IntoIterator<Item = T>,
        T: Into<TypeRef>,
    {
        let key: String = key.into();
        let types: Vec<TypeRef> = types.into_iter().map(Into::into).collect();
        let body = body.into_body(&self.name, &key);
        self.methods
            .push(MethodDecl::new(key, F::declared_types(), Some(types), body));
        self
    }

    /// Add an overload over raw arguments. Its `arity` parameters carry no
    /// type information and match any value.
    pub fn untyped<F, R>(mut self, key: impl Into<String>, arity: usize, raw: F) -> Self
    where
        F: Fn(&[Value]) -> R + Send + Sync + 'static,
        R: Into<Value>,
    {
        let body: Body =
            Arc::new(move |args: &[Value]| -> Result<Value, CallError> { Ok(raw(args).into()) });
        self.methods
            .push(MethodDecl::new(key.into(), vec![None; arity], None, body));
        self
    }

    /// Add an overload over raw arguments with an explicit type list. The
    /// list length must equal `arity`.
    pub fn untyped_with<F, R, I, T>(
        mut self,
        key: impl Into<String>,
        arity: usize,
        types: I,
        raw: F,
    ) -> Self
    where
        F: Fn(&[Value]) -> R + Send + Sync + 'static,
        R: Into<Value>,
        I: IntoIterator<Item = T>,
        T: Into<TypeRef>,
    {
        let types: Vec<TypeRef> = types.into_iter().map(Into::into).collect();
        let body: Body =
            Arc::new(move |args: &[Value]| -> Result<Value, CallError> { Ok(raw(args).into()) });
        self.methods
            .push(MethodDecl::new(key.into(), vec![None; arity], Some(types), body));
        self
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    pub(crate) fn into_parts(self) -> (String, Vec<MethodDecl>) {
        (self.name, self.methods)
    }
}

/// A callable built from an overload set
#[derive(Debug, Clone)]
pub struct Dispatcher {
    name: String,
    length: usize,
    table: Arc<[Signature]>,
}

impl Dispatcher {
    pub(crate) fn new(name: String, signatures: Vec<Signature>) -> Self {
        let length = signatures.iter().map(Signature::arity).max().unwrap_or(0);
        debug!(
            function = %name,
            overloads = signatures.len(),
            length,
            "built dispatcher"
        );
        Self {
            name,
            length,
            table: signatures.into(),
        }
    }

    /// Name of the overload set
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Largest arity among the signatures
    pub fn length(&self) -> usize {
        self.length
    }

    /// Bound signatures in declaration order
    pub fn signatures(&self) -> &[Signature] {
        &self.table
    }

    /// Find the signature a call with `args` would invoke
    pub fn select(&self, args: &[Value]) -> Result<&Signature, CallError> {
        // (signature index, failing position) of the first arity match
        let mut failure: Option<(usize, usize)> = None;

        for (index, signature) in self.table.iter().enumerate() {
            if signature.arity() != args.len() {
                trace!(
                    function = %self.name,
                    method = signature.method_key(),
                    arity = signature.arity(),
                    args = args.len(),
                    "skipped signature"
                );
                continue;
            }

            match signature.first_mismatch(args) {
                None => {
                    debug!(
                        function = %self.name,
                        method = signature.method_key(),
                        "resolved overload"
                    );
                    return Ok(signature);
                }
                Some(position) => {
                    trace!(
                        function = %self.name,
                        method = signature.method_key(),
                        position,
                        "signature rejected argument"
                    );
                    failure.get_or_insert((index, position));
                }
            }
        }

        let error = self.mismatch_error(args, failure);
        debug!(function = %self.name, %error, "no overload matched");
        Err(error)
    }

    fn mismatch_error(&self, args: &[Value], failure: Option<(usize, usize)>) -> CallError {
        let (signature, position) = match failure {
            Some((index, position)) => (self.table.get(index), position),
            None => (self.table.first(), 0),
        };

        let expected = signature
            .and_then(|s| s.param_types().get(position))
            .map(|guard| guard.name())
            .unwrap_or("undefined");
        let actual = args
            .get(position)
            .map(Value::type_name)
            .unwrap_or("undefined");

        CallError::unexpected_argument(&self.name, expected, actual, position)
    }

    /// Resolve and invoke the matching overload
    pub fn call(&self, args: &[Value]) -> Result<Value, CallError> {
        self.select(args)?.invoke(args)
    }

    /// Wrap the dispatcher as a function value
    pub fn into_value(self) -> Value {
        let name = self.name.clone();
        let arity = self.length;
        Value::Function(NativeFunction::new(name, arity, move |args| self.call(args)))
    }
}
