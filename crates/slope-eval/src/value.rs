//! Runtime values.

use crate::error::{EvalError, EvalResult};
use slope_types::ast::Literal;
use std::fmt;
use std::rc::Rc;

/// How many arrays deep printing and comparison will follow.
pub const MAX_VALUE_DEPTH: usize = 1000;

/// A SlopeScript runtime value.
///
/// Arrays are reference-shared: copying a variable that holds an array
/// copies the handle, not the elements. Nothing can mutate an array once
/// it is built. Nesting is unbounded; dropping a deep array does not
/// recurse, but printing and comparing stop at [`MAX_VALUE_DEPTH`].
#[derive(Debug, Clone)]
pub enum Value {
    /// Result of a construct with no value.
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Array(Rc<Vec<Value>>),
}

impl Value {
    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Rc::new(items))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "boolean",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Array(_) => "array",
        }
    }

    /// Zero, the empty string, the empty array, `ice` and nil are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Nil => false,
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Float(n) => *n != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::Array(items) => !items.is_empty(),
        }
    }

    /// Text printed by `carve`.
    pub fn render(&self) -> EvalResult<String> {
        let mut out = String::new();
        self.write_to(&mut out, false, 0)?;
        Ok(out)
    }

    /// Textual form used inside arrays: strings are quoted.
    pub fn repr(&self) -> String {
        let mut out = String::new();
        match self.write_to(&mut out, true, 0) {
            Ok(()) => out,
            Err(_) => "[...]".to_string(),
        }
    }

    fn write_to(&self, out: &mut String, quoted: bool, depth: usize) -> EvalResult<()> {
        match self {
            Value::Nil => out.push_str("None"),
            Value::Bool(true) => out.push_str("True"),
            Value::Bool(false) => out.push_str("False"),
            Value::Int(n) => out.push_str(&n.to_string()),
            Value::Float(n) => out.push_str(&format_float(*n)),
            Value::Str(s) if quoted => out.push_str(&quote(s)),
            Value::Str(s) => out.push_str(s),
            Value::Array(items) => {
                if depth >= MAX_VALUE_DEPTH {
                    return Err(EvalError::NestingTooDeep(MAX_VALUE_DEPTH));
                }
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    item.write_to(out, true, depth + 1)?;
                }
                out.push(']');
            }
        }
        Ok(())
    }
}

/// Frees nested arrays with an explicit stack instead of recursive drop glue.
impl Drop for Value {
    fn drop(&mut self) {
        let Value::Array(items) = self else {
            return;
        };
        let Some(items) = Rc::get_mut(items) else {
            return;
        };
        let mut pending = std::mem::take(items);
        while let Some(mut value) = pending.pop() {
            if let Value::Array(inner) = &mut value {
                if let Some(inner) = Rc::get_mut(inner) {
                    pending.append(inner);
                }
            }
        }
    }
}

impl From<&Literal> for Value {
    fn from(lit: &Literal) -> Self {
        match lit {
            Literal::Int(n) => Value::Int(*n),
            Literal::Float(n) => Value::Float(*n),
            Literal::Str(s) => Value::Str(s.clone()),
            Literal::Bool(b) => Value::Bool(*b),
        }
    }
}

/// Structural equality; numbers compare across integer, float and boolean.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        crate::ops::loose_eq(self, other)
    }
}

/// Same text as [`Value::render`]; arrays too deep to print show as `[...]`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.render() {
            Ok(text) => f.write_str(&text),
            Err(_) => f.write_str("[...]"),
        }
    }
}

/// Shortest round-trip form; scientific outside `[1e-4, 1e16)`, with a
/// signed exponent of at least two digits.
pub fn format_float(n: f64) -> String {
    if n.is_nan() {
        return "nan".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let magnitude = n.abs();
    if n == 0.0 || (1e-4..1e16).contains(&magnitude) {
        let text = n.to_string();
        return if text.contains('.') {
            text
        } else {
            format!("{text}.0")
        };
    }

    let text = format!("{n:e}");
    match text.split_once('e') {
        Some((mantissa, exp)) => {
            let exp: i32 = exp.parse().unwrap_or(0);
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{mantissa}e{sign}{:02}", exp.abs())
        }
        None => text,
    }
}

/// Single quotes unless the text has a single quote and no double quote.
fn quote(s: &str) -> String {
    let delim = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };
    let mut out = String::with_capacity(s.len() + 2);
    out.push(delim);
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if c == delim => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(delim);
    out
}
