//! Flow atoms: `group` and `sleep`.

use crate::atoms::helpers::{arg, check_arity, ExtractValue};
use crate::atoms::{AtomFn, AtomRegistry};
use crate::runtime::{Callable, Value};

/// Runs a function inside a named group.
///
/// Usage: (group <name> <body> [<condition>])
///   - <name>: String
///   - <body>: Function of no arguments
///   - <condition>: optional; when supplied, any falsy value skips the
///     group, `nil` included. Leave it out to always run.
///
///   Returns: the body's value, or nil when skipped.
pub const ATOM_GROUP: AtomFn = |args, dsl| {
    check_arity("group", args, 2, 3)?;
    let name: String = arg(args, 0).extract("group", "name")?;
    let body: Callable = arg(args, 1).extract("group", "body")?;
    if let Some(condition) = args.get(2) {
        return Ok(dsl
            .group_if(&name, condition, || body.call(&[]))?
            .unwrap_or_default());
    }
    dsl.group(&name, || body.call(&[]))
};

/// Suspends the current unit.
///
/// Usage: (sleep <seconds>)
///   - <seconds>: non-negative Number, fractions allowed
///
///   Returns: nil
pub const ATOM_SLEEP: AtomFn = |args, dsl| {
    check_arity("sleep", args, 1, 1)?;
    let seconds: f64 = arg(args, 0).extract("sleep", "seconds")?;
    dsl.sleep(seconds)?;
    Ok(Value::Nil)
};

pub fn register_flow_atoms(registry: &mut AtomRegistry) {
    registry.register("group", ATOM_GROUP);
    registry.register("sleep", ATOM_SLEEP);
}
