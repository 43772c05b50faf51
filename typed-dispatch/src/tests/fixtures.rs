//! Classes shared by the test modules

use crate::{Class, GuardDecl, Value};

#[derive(Debug)]
pub struct Fish {
    pub name: String,
}

impl Fish {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }

    pub fn is_fish(value: &Value) -> bool {
        value.downcast_ref::<Fish>().is_some()
    }
}

impl Class for Fish {
    const NAME: &'static str = "Fish";

    fn guards() -> Vec<GuardDecl> {
        vec![GuardDecl::new(Fish::is_fish)]
    }
}

/// Guards over the numeric field `a` of an object
pub struct Sign;

impl Sign {
    fn field(value: &Value) -> Option<f64> {
        value.get("a").and_then(Value::as_number)
    }

    pub fn is_zero(value: &Value) -> bool {
        Self::field(value) == Some(0.0)
    }

    pub fn is_negative(value: &Value) -> bool {
        Self::field(value).is_some_and(|a| a < 0.0)
    }
}

impl Class for Sign {
    const NAME: &'static str = "Sign";

    fn guards() -> Vec<GuardDecl> {
        vec![
            GuardDecl::named("zero", Sign::is_zero),
            GuardDecl::named("negative", Sign::is_negative),
        ]
    }
}

/// Declares no guard at all
pub struct Unguarded;

impl Class for Unguarded {
    const NAME: &'static str = "Unguarded";

    fn guards() -> Vec<GuardDecl> {
        Vec::new()
    }
}

/// Declares two guards that would both take the class name
pub struct Ambiguous;

impl Class for Ambiguous {
    const NAME: &'static str = "Ambiguous";

    fn guards() -> Vec<GuardDecl> {
        vec![GuardDecl::new(|_| true), GuardDecl::new(|_| false)]
    }
}

pub fn obj_a(a: i32) -> Value {
    Value::object([("a", a)])
}
