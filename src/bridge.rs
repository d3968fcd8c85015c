//! The boundary between the scripting surface and the host engine.
//!
//! A [`Bridge`] is everything the DSL assumes of an engine. Implementations own
//! the group stack, metric emission, the clock and the shared taint flag; the
//! DSL only calls through these four primitives.

use std::collections::BTreeMap;

use crate::errors::ScriptError;

/// Body passed to [`Bridge::open_group`]. The DSL captures the body's typed
/// return value itself, so the bridge only sees success or failure.
pub type GroupBody<'a> = dyn FnMut() -> Result<(), ScriptError> + 'a;

pub trait Bridge {
    /// Runs `body` inside a named, possibly nested, attribution scope.
    ///
    /// The scope must be closed before this returns, whether `body` returned
    /// normally, returned an error, or unwound. Errors from `body` are returned
    /// unchanged after the scope closes. An implementation may reject `name`
    /// with a contract error, in which case `body` is not run.
    fn open_group(&self, name: &str, body: &mut GroupBody<'_>) -> Result<(), ScriptError>;

    /// Emits one pass/fail event for the check `name`, attributed to the
    /// current group scope.
    fn record_check(&self, name: &str, passed: bool, tags: &BTreeMap<String, String>);

    /// Suspends the calling logical unit for at least `seconds`.
    fn sleep(&self, seconds: f64);

    /// Sets the process-wide taint flag. Must be safe under concurrent callers
    /// and must never clear the flag.
    fn set_taint(&self);
}
