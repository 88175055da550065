use crate::runtime::error::{RuntimeError, RuntimeResult};
use std::fmt;

pub type BuiltinFn = fn(&[Value]) -> RuntimeResult<Value>;

#[derive(Clone, Debug)]
pub enum Value {
    /// Absent value. Only produced when a lenient evaluation swallows an error.
    Nil,
    Number(f64),
    Bool(bool),
    Builtin(Builtin),
}

#[derive(Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub func: BuiltinFn,
}

impl Builtin {
    pub fn new(name: &'static str, func: BuiltinFn) -> Self {
        Self { name, func }
    }

    pub fn call(&self, args: &[Value]) -> RuntimeResult<Value> {
        (self.func)(args)
    }
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builtin").field("name", &self.name).finish()
    }
}

impl PartialEq for Builtin {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Value {
    /// Booleans are themselves, `Nil` is false, everything else (zero included) is true.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Nil => false,
            Value::Number(_) | Value::Builtin(_) => true,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Number(_) => "number",
            Value::Bool(_) => "bool",
            Value::Builtin(_) => "builtin",
        }
    }

    pub fn as_number(&self, op: &'static str) -> RuntimeResult<f64> {
        match self {
            Value::Number(n) => Ok(*n),
            other => Err(RuntimeError::TypeMismatch {
                op,
                expected: "number",
                found: other.type_name(),
            }),
        }
    }

    /// Truncates toward zero. Out-of-range numbers saturate and NaN becomes 0.
    pub fn as_integer(&self, op: &'static str) -> RuntimeResult<i64> {
        self.as_number(op).map(|n| n as i64)
    }

    pub fn as_builtin(&self) -> RuntimeResult<&Builtin> {
        match self {
            Value::Builtin(builtin) => Ok(builtin),
            other => Err(RuntimeError::NotCallable {
                found: other.type_name(),
            }),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Builtin(a), Value::Builtin(b)) => a == b,
            _ => false,
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Number(v) => write!(f, "{v}"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Builtin(builtin) => write!(f, "<builtin {}>", builtin.name),
        }
    }
}
