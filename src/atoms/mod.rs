//! # Script Atom System
//!
//! Atoms are the DSL functions as a dynamically typed script sees them: a name,
//! a slice of [`Value`] arguments and a [`Dsl`] to act through. They validate
//! their arguments (raising contract errors) and then delegate to the typed
//! surface in [`crate::dsl`].
//!
//! ## Module Structure
//!
//! - **`helpers`**: argument access and validation shared by all atoms
//! - **`flow`**: `group`, `sleep`
//! - **`checks`**: `check`, `taint`
//! - **`assertions`**: `fail`, `assert`

use indexmap::IndexMap;

use crate::dsl::Dsl;
use crate::errors::ScriptError;
use crate::runtime::Value;

pub use helpers::AtomResult;

/// Atom function type: takes evaluated arguments and the calling unit's DSL.
pub type AtomFn = fn(args: &[Value], dsl: &Dsl<'_>) -> AtomResult;

/// Registry for all atoms, inspectable at runtime.
#[derive(Default, Clone)]
pub struct AtomRegistry {
    atoms: IndexMap<String, AtomFn>,
}

impl AtomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every standard atom.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        register_all_atoms(&mut registry);
        registry
    }

    pub fn get(&self, name: &str) -> Option<AtomFn> {
        self.atoms.get(name).copied()
    }

    pub fn list(&self) -> Vec<String> {
        self.atoms.keys().cloned().collect()
    }

    pub fn register(&mut self, name: &str, func: AtomFn) {
        self.atoms.insert(name.to_string(), func);
    }

    pub fn remove(&mut self, name: &str) -> Option<AtomFn> {
        self.atoms.shift_remove(name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.atoms.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Looks up `name` and calls it. Unknown names are contract errors.
    pub fn call(&self, name: &str, args: &[Value], dsl: &Dsl<'_>) -> AtomResult {
        let Some(atom) = self.get(name) else {
            return Err(ScriptError::contract(name, "not a function"));
        };
        atom(args, dsl)
    }
}

pub mod assertions;
pub mod checks;
pub mod flow;
pub mod helpers;

/// Registers all standard atoms with the given registry.
pub fn register_all_atoms(registry: &mut AtomRegistry) {
    flow::register_flow_atoms(registry);
    checks::register_check_atoms(registry);
    assertions::register_assertion_atoms(registry);
}
