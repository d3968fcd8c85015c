//! `fail` and `assert`: local raise helpers. Neither touches the bridge; an
//! error they raise is handled by whoever runs the script.

use crate::errors::ScriptError;
use crate::runtime::Truthy;

/// Message carried by a failed [`assert`].
pub const DEFAULT_ASSERT_MESSAGE: &str = "assertion failed";

/// Raises `err`. Generic over the success type so it can sit in expression
/// position, e.g. `lookup(id).or_else(|_| fail("missing user"))`.
///
/// ```rust
/// use vuscript::dsl::fail;
/// use vuscript::runtime::Value;
///
/// let r: Result<u32, _> = fail(Value::from(404));
/// assert_eq!(r.unwrap_err().to_string(), "404");
/// ```
pub fn fail<T>(err: impl Into<ScriptError>) -> Result<T, ScriptError> {
    Err(err.into())
}

/// Raises `"assertion failed"` when `expr` is falsy.
pub fn assert(expr: impl Truthy) -> Result<(), ScriptError> {
    assert_msg(expr, DEFAULT_ASSERT_MESSAGE)
}

/// Raises an error carrying `message` when `expr` is falsy.
pub fn assert_msg(expr: impl Truthy, message: impl Into<String>) -> Result<(), ScriptError> {
    if expr.is_truthy() {
        Ok(())
    } else {
        Err(ScriptError::error(message))
    }
}
