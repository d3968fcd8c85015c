//! Runtime values for script code.
//!
//! Everything a script hands to the DSL (tested values, predicate results, group
//! conditions, thrown errors) is a [`Value`]. Values are deeply compositional:
//! lists and maps can contain any other value, including functions.

mod value;

pub use value::{Callable, NativeFn, Truthy, Value};
