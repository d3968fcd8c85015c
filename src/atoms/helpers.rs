//! # Atom Helper Infrastructure
//!
//! Argument access, arity validation and typed extraction shared by every
//! atom. All failures here are contract errors naming the atom.

use crate::errors::ScriptError;
use crate::runtime::{Callable, Value};

/// Convenient alias for atom return values.
pub type AtomResult = Result<Value, ScriptError>;

/// Trait for extracting typed values from `Value` with consistent error text.
pub trait ExtractValue<T> {
    fn extract(&self, atom: &str, param: &str) -> Result<T, ScriptError>;
}

impl ExtractValue<f64> for Value {
    fn extract(&self, atom: &str, param: &str) -> Result<f64, ScriptError> {
        match self {
            Value::Number(n) => Ok(*n),
            _ => Err(type_error(atom, param, "Number", self)),
        }
    }
}

impl ExtractValue<String> for Value {
    fn extract(&self, atom: &str, param: &str) -> Result<String, ScriptError> {
        match self {
            Value::String(s) => Ok(s.clone()),
            _ => Err(type_error(atom, param, "String", self)),
        }
    }
}

impl ExtractValue<Callable> for Value {
    fn extract(&self, atom: &str, param: &str) -> Result<Callable, ScriptError> {
        match self {
            Value::Function(f) => Ok(f.clone()),
            _ => Err(type_error(atom, param, "Function", self)),
        }
    }
}

/// Returns the argument at `index`, or `Nil` when it was not supplied.
pub fn arg(args: &[Value], index: usize) -> &Value {
    static NIL: Value = Value::Nil;
    args.get(index).unwrap_or(&NIL)
}

/// Validates that `args.len()` lies within `min..=max`.
pub fn check_arity(atom: &str, args: &[Value], min: usize, max: usize) -> Result<(), ScriptError> {
    if (min..=max).contains(&args.len()) {
        return Ok(());
    }
    let expected = if min == max {
        format!("{min}")
    } else {
        format!("{min} to {max}")
    };
    Err(ScriptError::contract(
        atom,
        format!("expected {expected} arguments, got {}", args.len()),
    ))
}

/// Creates a type error for atoms with consistent messaging.
pub fn type_error(atom: &str, param: &str, expected: &str, found: &Value) -> ScriptError {
    ScriptError::contract(
        atom,
        format!(
            "`{param}` must be a {expected}, got {}",
            found.type_name()
        ),
    )
}
