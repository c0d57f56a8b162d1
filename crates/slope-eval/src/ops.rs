//! Operator semantics on runtime values.
//!
//! Booleans count as `0`/`1` wherever a number is expected. Integer
//! arithmetic is checked; `/` always goes through `f64`. Comparisons
//! between integers and floats are exact.

use crate::error::{EvalError, EvalResult};
use crate::value::{Value, MAX_VALUE_DEPTH};
use slope_types::ast::BinOp;
use std::cmp::Ordering;
use std::rc::Rc;

#[derive(Debug, Clone, Copy)]
enum Num {
    Int(i64),
    Float(f64),
}

impl Num {
    fn as_f64(self) -> f64 {
        match self {
            Num::Int(n) => n as f64,
            Num::Float(n) => n,
        }
    }
}

fn as_num(value: &Value) -> Option<Num> {
    match value {
        Value::Bool(b) => Some(Num::Int(i64::from(*b))),
        Value::Int(n) => Some(Num::Int(*n)),
        Value::Float(n) => Some(Num::Float(*n)),
        _ => None,
    }
}

fn unsupported(op: BinOp, lv: &Value, rv: &Value) -> EvalError {
    EvalError::TypeMismatch(format!(
        "unsupported operand type(s) for {}: '{}' and '{}'",
        op.symbol(),
        lv.type_name(),
        rv.type_name()
    ))
}

/// Apply a non-short-circuit binary operator.
pub(crate) fn binary(op: BinOp, lv: &Value, rv: &Value) -> EvalResult<Value> {
    match op {
        BinOp::Add => add(lv, rv),
        BinOp::Sub => arith(op, lv, rv, i64::checked_sub, |a, b| a - b),
        BinOp::Mul => arith(op, lv, rv, i64::checked_mul, |a, b| a * b),
        BinOp::Div => divide(lv, rv),
        BinOp::Eq => Ok(Value::Bool(equal(lv, rv, 0)?)),
        BinOp::NotEq => Ok(Value::Bool(!equal(lv, rv, 0)?)),
        BinOp::Less => compare(op, lv, rv, |o| o == Ordering::Less),
        BinOp::Greater => compare(op, lv, rv, |o| o == Ordering::Greater),
        BinOp::LessEq => compare(op, lv, rv, |o| o != Ordering::Greater),
        BinOp::GreaterEq => compare(op, lv, rv, |o| o != Ordering::Less),
        // `&&` and `||` never reach here; the evaluator short-circuits them.
        BinOp::And | BinOp::Or => Err(unsupported(op, lv, rv)),
    }
}

fn add(lv: &Value, rv: &Value) -> EvalResult<Value> {
    match (lv, rv) {
        (Value::Str(a), Value::Str(b)) => {
            let mut joined = String::with_capacity(a.len() + b.len());
            joined.push_str(a);
            joined.push_str(b);
            Ok(Value::Str(joined))
        }
        (Value::Array(a), Value::Array(b)) => {
            let items: Vec<Value> = a.iter().chain(b.iter()).cloned().collect();
            Ok(Value::Array(Rc::new(items)))
        }
        _ => arith(BinOp::Add, lv, rv, i64::checked_add, |a, b| a + b),
    }
}

fn arith(
    op: BinOp,
    lv: &Value,
    rv: &Value,
    int_op: fn(i64, i64) -> Option<i64>,
    float_op: fn(f64, f64) -> f64,
) -> EvalResult<Value> {
    match (as_num(lv), as_num(rv)) {
        (Some(Num::Int(a)), Some(Num::Int(b))) => int_op(a, b)
            .map(Value::Int)
            .ok_or(EvalError::IntegerOverflow),
        (Some(a), Some(b)) => Ok(Value::Float(float_op(a.as_f64(), b.as_f64()))),
        _ => Err(unsupported(op, lv, rv)),
    }
}

fn divide(lv: &Value, rv: &Value) -> EvalResult<Value> {
    match (as_num(lv), as_num(rv)) {
        (Some(a), Some(b)) => {
            let divisor = b.as_f64();
            if divisor == 0.0 {
                return Err(EvalError::DivisionByZero);
            }
            Ok(Value::Float(a.as_f64() / divisor))
        }
        _ => Err(unsupported(BinOp::Div, lv, rv)),
    }
}

fn compare(
    op: BinOp,
    lv: &Value,
    rv: &Value,
    test: fn(Ordering) -> bool,
) -> EvalResult<Value> {
    // An unordered result (NaN) makes every ordering test false.
    Ok(Value::Bool(order(op, lv, rv, 0)?.is_some_and(test)))
}

/// Ordering between two values; `None` when they are unordered (NaN).
/// Arrays compare element by element and the failing element pair names
/// the types in a type error.
fn order(op: BinOp, lv: &Value, rv: &Value, depth: usize) -> EvalResult<Option<Ordering>> {
    match (lv, rv) {
        (Value::Str(a), Value::Str(b)) => Ok(Some(a.cmp(b))),
        (Value::Array(a), Value::Array(b)) => {
            check_depth(depth)?;
            for (x, y) in a.iter().zip(b.iter()) {
                if !equal(x, y, depth + 1)? {
                    return order(op, x, y, depth + 1);
                }
            }
            Ok(Some(a.len().cmp(&b.len())))
        }
        _ => match (as_num(lv), as_num(rv)) {
            (Some(a), Some(b)) => Ok(num_cmp(a, b)),
            _ => Err(EvalError::TypeMismatch(format!(
                "'{}' not supported between '{}' and '{}'",
                op.symbol(),
                lv.type_name(),
                rv.type_name()
            ))),
        },
    }
}

fn check_depth(depth: usize) -> EvalResult<()> {
    if depth >= MAX_VALUE_DEPTH {
        return Err(EvalError::NestingTooDeep(MAX_VALUE_DEPTH));
    }
    Ok(())
}

/// Structural equality; numbers compare across integer, float and boolean.
fn equal(lv: &Value, rv: &Value, depth: usize) -> EvalResult<bool> {
    match (lv, rv) {
        (Value::Nil, Value::Nil) => Ok(true),
        (Value::Str(a), Value::Str(b)) => Ok(a == b),
        (Value::Array(a), Value::Array(b)) => {
            check_depth(depth)?;
            if a.len() != b.len() {
                return Ok(false);
            }
            for (x, y) in a.iter().zip(b.iter()) {
                if !equal(x, y, depth + 1)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        _ => Ok(match (as_num(lv), as_num(rv)) {
            (Some(a), Some(b)) => num_cmp(a, b) == Some(Ordering::Equal),
            _ => false,
        }),
    }
}

/// [`equal`] for contexts that cannot fail; arrays too deep to compare are
/// unequal.
pub(crate) fn loose_eq(lv: &Value, rv: &Value) -> bool {
    equal(lv, rv, 0).unwrap_or(false)
}

/// Exact numeric ordering. Integers are never rounded to `f64` first.
fn num_cmp(a: Num, b: Num) -> Option<Ordering> {
    match (a, b) {
        (Num::Int(x), Num::Int(y)) => Some(x.cmp(&y)),
        (Num::Float(x), Num::Float(y)) => x.partial_cmp(&y),
        (Num::Int(x), Num::Float(y)) => int_float_cmp(x, y),
        (Num::Float(x), Num::Int(y)) => int_float_cmp(y, x).map(Ordering::reverse),
    }
}

fn int_float_cmp(int: i64, float: f64) -> Option<Ordering> {
    // 2^63, the smallest float above every i64.
    const BOUND: f64 = 9_223_372_036_854_775_808.0;
    if float.is_nan() {
        return None;
    }
    if float >= BOUND {
        return Some(Ordering::Less);
    }
    if float < -BOUND {
        return Some(Ordering::Greater);
    }
    let whole = float.trunc();
    // `whole` is integral and inside the i64 range, so the cast is exact.
    match int.cmp(&(whole as i64)) {
        Ordering::Equal => 0.0_f64.partial_cmp(&(float - whole)),
        unequal => Some(unequal),
    }
}

/// Unary minus.
pub(crate) fn negate(value: &Value) -> EvalResult<Value> {
    match as_num(value) {
        Some(Num::Int(n)) => n
            .checked_neg()
            .map(Value::Int)
            .ok_or(EvalError::IntegerOverflow),
        Some(Num::Float(n)) => Ok(Value::Float(-n)),
        None => Err(EvalError::TypeMismatch(format!(
            "bad operand type for unary -: '{}'",
            value.type_name()
        ))),
    }
}

/// `target[index]` on an array or string; negative indices count from the end.
pub(crate) fn index(target: &Value, idx: &Value) -> EvalResult<Value> {
    let kind = match target {
        Value::Array(_) => "array",
        Value::Str(_) => "string",
        other => {
            return Err(EvalError::TypeMismatch(format!(
                "'{}' object is not subscriptable",
                other.type_name()
            )))
        }
    };
    let raw = match idx {
        Value::Int(n) => *n,
        Value::Bool(b) => i64::from(*b),
        other => {
            return Err(EvalError::TypeMismatch(format!(
                "{kind} indices must be integers, not '{}'",
                other.type_name()
            )))
        }
    };

    match target {
        Value::Array(items) => resolve(raw, items.len())
            .map(|i| items[i].clone())
            .ok_or(EvalError::IndexOutOfRange { target: kind }),
        Value::Str(s) => {
            let len = s.chars().count();
            resolve(raw, len)
                .and_then(|i| s.chars().nth(i))
                .map(|c| Value::Str(c.to_string()))
                .ok_or(EvalError::IndexOutOfRange { target: kind })
        }
        _ => Err(EvalError::IndexOutOfRange { target: kind }),
    }
}

fn resolve(raw: i64, len: usize) -> Option<usize> {
    let len = i64::try_from(len).ok()?;
    let i = if raw < 0 { raw.checked_add(len)? } else { raw };
    if (0..len).contains(&i) {
        usize::try_from(i).ok()
    } else {
        None
    }
}

/// Items visited by `liftline`: array elements, or the characters of a string.
pub(crate) fn iterate(value: &Value) -> EvalResult<Vec<Value>> {
    match value {
        Value::Array(items) => Ok(items.as_ref().clone()),
        Value::Str(s) => Ok(s.chars().map(|c| Value::Str(c.to_string())).collect()),
        other => Err(EvalError::TypeMismatch(format!(
            "'{}' object is not iterable",
            other.type_name()
        ))),
    }
}
