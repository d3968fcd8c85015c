//! Raise atoms: `fail` and `assert`.

use crate::atoms::helpers::{arg, check_arity};
use crate::atoms::{AtomFn, AtomRegistry};
use crate::dsl::{self, DEFAULT_ASSERT_MESSAGE};
use crate::runtime::Value;

/// Raises its argument.
///
/// Usage: (fail <err>)
///   - <err>: any value; a missing argument raises nil
///
///   Returns: never
pub const ATOM_FAIL: AtomFn = |args, _dsl| {
    check_arity("fail", args, 0, 1)?;
    dsl::fail(arg(args, 0).clone())
};

/// Raises an error when the expression is falsy.
///
/// Usage: (assert <expr> [<message>])
///   - <expr>: any value
///   - <message>: default "assertion failed"; non-strings are rendered
///
///   Returns: nil
pub const ATOM_ASSERT: AtomFn = |args, _dsl| {
    check_arity("assert", args, 1, 2)?;
    let message = match arg(args, 1) {
        Value::Nil => DEFAULT_ASSERT_MESSAGE.to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    dsl::assert_msg(arg(args, 0), message)?;
    Ok(Value::Nil)
};

pub fn register_assertion_atoms(registry: &mut AtomRegistry) {
    registry.register("fail", ATOM_FAIL);
    registry.register("assert", ATOM_ASSERT);
}
