use crate::runtime::{
    error::{RuntimeError, RuntimeResult},
    value::{Builtin, BuiltinFn, Value},
};

/// Every operator seeded into a fresh environment.
pub const BUILTINS: &[(&str, BuiltinFn)] = &[
    ("+", add),
    ("-", sub),
    ("*", mul),
    ("/", div),
    ("mod", modulo),
    ("&", bit_and),
    ("|", bit_or),
    ("^", bit_xor),
    ("&^", bit_clear),
    (">>", shift_right),
    ("<<", shift_left),
    ("=", equals),
    ("and", and),
    ("or", or),
];

pub fn builtins() -> impl Iterator<Item = Builtin> {
    BUILTINS
        .iter()
        .map(|&(name, func)| Builtin::new(name, func))
}

pub fn is_builtin_name(name: &str) -> bool {
    BUILTINS.iter().any(|(builtin, _)| *builtin == name)
}

fn expect_arity<'a>(
    name: &'static str,
    args: &'a [Value],
) -> RuntimeResult<(&'a Value, &'a Value)> {
    match args {
        [lhs, rhs] => Ok((lhs, rhs)),
        _ => Err(RuntimeError::ArityMismatch {
            name,
            expected: 2,
            received: args.len(),
        }),
    }
}

fn numeric(name: &'static str, args: &[Value], op: fn(f64, f64) -> f64) -> RuntimeResult<Value> {
    let (lhs, rhs) = expect_arity(name, args)?;
    Ok(Value::Number(op(lhs.as_number(name)?, rhs.as_number(name)?)))
}

fn integer(
    name: &'static str,
    args: &[Value],
    op: fn(i64, i64) -> RuntimeResult<i64>,
) -> RuntimeResult<Value> {
    let (lhs, rhs) = expect_arity(name, args)?;
    let result = op(lhs.as_integer(name)?, rhs.as_integer(name)?)?;
    Ok(Value::Number(result as f64))
}

fn add(args: &[Value]) -> RuntimeResult<Value> {
    numeric("+", args, |a, b| a + b)
}

fn sub(args: &[Value]) -> RuntimeResult<Value> {
    numeric("-", args, |a, b| a - b)
}

fn mul(args: &[Value]) -> RuntimeResult<Value> {
    numeric("*", args, |a, b| a * b)
}

// IEEE division: x/0 is infinite, 0/0 is NaN.
fn div(args: &[Value]) -> RuntimeResult<Value> {
    numeric("/", args, |a, b| a / b)
}

fn modulo(args: &[Value]) -> RuntimeResult<Value> {
    integer("mod", args, |a, b| {
        if b == 0 {
            return Err(RuntimeError::DivisionByZero { op: "mod" });
        }
        Ok(a.wrapping_rem(b))
    })
}

fn bit_and(args: &[Value]) -> RuntimeResult<Value> {
    integer("&", args, |a, b| Ok(a & b))
}

fn bit_or(args: &[Value]) -> RuntimeResult<Value> {
    integer("|", args, |a, b| Ok(a | b))
}

fn bit_xor(args: &[Value]) -> RuntimeResult<Value> {
    integer("^", args, |a, b| Ok(a ^ b))
}

fn bit_clear(args: &[Value]) -> RuntimeResult<Value> {
    integer("&^", args, |a, b| Ok(a & !b))
}

fn shift_count(op: &'static str, count: i64) -> RuntimeResult<u32> {
    if count < 0 {
        return Err(RuntimeError::InvalidShift { op, count });
    }
    Ok(u32::try_from(count).unwrap_or(u32::MAX))
}

fn shift_right(args: &[Value]) -> RuntimeResult<Value> {
    integer(">>", args, |a, b| {
        let count = shift_count(">>", b)?;
        Ok(a.checked_shr(count).unwrap_or(if a < 0 { -1 } else { 0 }))
    })
}

fn shift_left(args: &[Value]) -> RuntimeResult<Value> {
    integer("<<", args, |a, b| {
        let count = shift_count("<<", b)?;
        Ok(a.checked_shl(count).unwrap_or(0))
    })
}

fn equals(args: &[Value]) -> RuntimeResult<Value> {
    let (lhs, rhs) = expect_arity("=", args)?;
    Ok(Value::Bool(lhs == rhs))
}

// Both operands were already evaluated by the caller, so neither side short-circuits.
fn and(args: &[Value]) -> RuntimeResult<Value> {
    let (lhs, rhs) = expect_arity("and", args)?;
    Ok(Value::Bool(lhs.is_truthy() & rhs.is_truthy()))
}

fn or(args: &[Value]) -> RuntimeResult<Value> {
    let (lhs, rhs) = expect_arity("or", args)?;
    Ok(Value::Bool(lhs.is_truthy() | rhs.is_truthy()))
}
