//! # vuscript
//!
//! The vocabulary a load-test script uses (`group`, `check`, `sleep`, `taint`,
//! `fail`, `assert`) and the [`Bridge`] contract it needs from a host engine.
//! [`engine`] holds a reference engine implementing that contract.

pub use crate::bridge::Bridge;
pub use crate::dsl::{assert, assert_msg, fail, CheckSet, Dsl, TagSet};
pub use crate::errors::{ConfigError, ErrorKind, ScriptError};
pub use crate::runtime::{Truthy, Value};

pub mod atoms;
pub mod bridge;
pub mod dsl;
pub mod engine;
pub mod errors;
pub mod runtime;
