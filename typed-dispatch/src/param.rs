//! Declared parameter types of overload bodies.
//!
//! `Param` is the declared-type capture for a single parameter: it reports the
//! nominal type a typed closure parameter was written with, and converts a
//! matched argument into that parameter. `Overload` lifts closures of up to six
//! `Param` arguments into type-erased bodies.

use crate::class::{Class, ClassRef, TypeRef};
use crate::error::CallError;
use crate::value::{NativeFunction, Value};
use indexmap::IndexMap;
use std::sync::Arc;

/// Type-erased overload body
pub type Body = Arc<dyn Fn(&[Value]) -> Result<Value, CallError> + Send + Sync>;

/// A parameter type an overload closure can declare
pub trait Param: Sized {
    /// Nominal type of the parameter, or `None` when it carries no type
    /// information (the parameter then matches any value)
    fn declared_type() -> Option<TypeRef>;

    /// Convert an argument that passed the parameter's guard
    fn from_value(value: &Value) -> Option<Self>;
}

impl Param for Value {
    fn declared_type() -> Option<TypeRef> {
        None
    }

    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

impl Param for f64 {
    fn declared_type() -> Option<TypeRef> {
        Some("number".into())
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_number()
    }
}

impl Param for bool {
    fn declared_type() -> Option<TypeRef> {
        Some("boolean".into())
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

impl Param for String {
    fn declared_type() -> Option<TypeRef> {
        Some("string".into())
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

impl Param for Vec<Value> {
    fn declared_type() -> Option<TypeRef> {
        Some("array".into())
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Array(items) => Some(items.clone()),
            _ => None,
        }
    }
}

impl Param for IndexMap<String, Value> {
    fn declared_type() -> Option<TypeRef> {
        Some("record".into())
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(fields.clone()),
            _ => None,
        }
    }
}

impl Param for NativeFunction {
    fn declared_type() -> Option<TypeRef> {
        Some("function".into())
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Function(function) => Some(function.clone()),
            _ => None,
        }
    }
}

impl<T: Class> Param for Arc<T> {
    fn declared_type() -> Option<TypeRef> {
        Some(TypeRef::Class(ClassRef::of::<T>()))
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Instance(instance) => instance.downcast::<T>(),
            _ => None,
        }
    }
}

/// A closure usable as an overload body. `Args` is the tuple of its
/// parameter types.
pub trait Overload<Args>: Send + Sync + 'static {
    /// Declared type of each parameter, in order
    fn declared_types() -> Vec<Option<TypeRef>>;

    /// Erase the closure. `function` and `method` name it in conversion errors.
    fn into_body(self, function: &str, method: &str) -> Body;
}

fn convert<P: Param>(
    args: &[Value],
    index: usize,
    function: &str,
    method: &str,
) -> Result<P, CallError> {
    let value = args.get(index).unwrap_or(&Value::Undefined);
    P::from_value(value).ok_or_else(|| CallError::Conversion {
        function: function.to_string(),
        method: method.to_string(),
        expected: P::declared_type()
            .map(|t| t.to_string())
            .unwrap_or_else(|| crate::class::WILDCARD_NAME.to_string()),
        actual: value.type_name().to_string(),
        index,
    })
}

impl<F, R> Overload<()> for F
where
    F: Fn() -> R + Send + Sync + 'static,
    R: Into<Value>,
{
    fn declared_types() -> Vec<Option<TypeRef>> {
        Vec::new()
    }

    fn into_body(self, _function: &str, _method: &str) -> Body {
        Arc::new(move |_: &[Value]| -> Result<Value, CallError> { Ok((self)().into()) })
    }
}

macro_rules! impl_overload {
    ($($ty:ident $var:ident $index:tt),+) => {
        impl<F, R, $($ty,)+> Overload<($($ty,)+)> for F
        where
            F: Fn($($ty),+) -> R + Send + Sync + 'static,
            R: Into<Value>,
            $($ty: Param,)+
        {
            fn declared_types() -> Vec<Option<TypeRef>> {
                vec![$($ty::declared_type()),+]
            }

            fn into_body(self, function: &str, method: &str) -> Body {
                let function = function.to_string();
                let method = method.to_string();
                Arc::new(move |args: &[Value]| -> Result<Value, CallError> {
                    $(
                        let $var = convert::<$ty>(args, $index, &function, &method)?;
                    )+
                    Ok((self)($($var),+).into())
                })
            }
        }
    };
}

impl_overload!(A a 0);
impl_overload!(A a 0, B b 1);
impl_overload!(A a 0, B b 1, C c 2);
impl_overload!(A a 0, B b 1, C c 2, D d 3);
impl_overload!(A a 0, B b 1, C c 2, D d 3, E e 4);
impl_overload!(A a 0, B b 1, C c 2, D d 3, E e 4, G g 5);
