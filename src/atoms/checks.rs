//! Outcome atoms: `check` and `taint`.

use crate::atoms::helpers::{arg, check_arity};
use crate::atoms::{AtomFn, AtomRegistry};
use crate::dsl::{CheckSet, TagSet};
use crate::runtime::Value;

/// Runs named predicates against a value.
///
/// Usage: (check <value> [<checks>] [<tags>])
///   - <value>: any value, passed to every predicate
///   - <checks>: Map of name to Function, default empty
///   - <tags>: Map of name to scalar, default empty
///
///   Returns: Bool, true only if every predicate passed.
///
/// Both maps are validated before any predicate runs.
pub const ATOM_CHECK: AtomFn = |args, dsl| {
    check_arity("check", args, 1, 3)?;
    let checks = CheckSet::from_value(arg(args, 1))?;
    let tags = TagSet::from_value(arg(args, 2))?;
    Ok(Value::Bool(dsl.check(arg(args, 0), &checks, &tags)))
};

/// Marks the run as failed.
///
/// Usage: (taint)
///
///   Returns: nil
pub const ATOM_TAINT: AtomFn = |args, dsl| {
    check_arity("taint", args, 0, 0)?;
    dsl.taint();
    Ok(Value::Nil)
};

pub fn register_check_atoms(registry: &mut AtomRegistry) {
    registry.register("check", ATOM_CHECK);
    registry.register("taint", ATOM_TAINT);
}
