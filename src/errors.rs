//! Error types raised by the scripting surface and the reference engine.
//!
//! Three kinds of failure exist at the script boundary:
//!
//! - **Script errors** (`Error`, `Thrown`): raised by `fail`/`assert` or by user
//!   code. They propagate to the caller until the script catches them or the
//!   engine sees them escape an iteration.
//! - **Contract errors** (`Contract`): a call was made with malformed arguments.
//!   Raised at the call site, before any work is done.
//! - **Check predicate errors** (`Predicate`): a check predicate raised. The check
//!   runner catches these and counts them as failing outcomes; they never leave
//!   `check`.

use std::any::Any;

use miette::Diagnostic;
use thiserror::Error;

use crate::runtime::Value;

/// Coarse classification of a [`ScriptError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Raised by `fail`, `assert`, or user code.
    Script,
    /// Invalid arguments at a call site.
    Contract,
    /// A predicate raised while a check was being evaluated.
    CheckPredicate,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Script => "ScriptError",
            ErrorKind::Contract => "ContractError",
            ErrorKind::CheckPredicate => "CheckPredicateError",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An error travelling through script code.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ScriptError {
    #[error("{message}")]
    #[diagnostic(code(vuscript::script::error))]
    Error { message: String },

    #[error("{value}")]
    #[diagnostic(code(vuscript::script::thrown))]
    Thrown { value: Value },

    #[error("{function}: {reason}")]
    #[diagnostic(code(vuscript::contract))]
    Contract {
        function: String,
        reason: String,
        #[help]
        help: Option<String>,
    },

    #[error("check '{check}' raised: {source}")]
    #[diagnostic(code(vuscript::check::predicate))]
    Predicate {
        check: String,
        #[source]
        source: Box<ScriptError>,
    },
}

impl ScriptError {
    /// A plain error carrying `message`, the same shape `assert` raises.
    pub fn error(message: impl Into<String>) -> Self {
        ScriptError::Error {
            message: message.into(),
        }
    }

    pub fn contract(function: impl Into<String>, reason: impl Into<String>) -> Self {
        ScriptError::Contract {
            function: function.into(),
            reason: reason.into(),
            help: None,
        }
    }

    pub fn contract_with_help(
        function: impl Into<String>,
        reason: impl Into<String>,
        help: impl Into<String>,
    ) -> Self {
        ScriptError::Contract {
            function: function.into(),
            reason: reason.into(),
            help: Some(help.into()),
        }
    }

    pub(crate) fn predicate(check: impl Into<String>, source: ScriptError) -> Self {
        ScriptError::Predicate {
            check: check.into(),
            source: Box::new(source),
        }
    }

    /// Turns a caught panic payload into a plain error, keeping the panic
    /// message when it is a string.
    pub(crate) fn from_panic(context: &str, payload: &(dyn Any + Send)) -> Self {
        let detail = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned());
        match detail {
            Some(detail) => ScriptError::error(format!("{context} panicked: {detail}")),
            None => ScriptError::error(format!("{context} panicked")),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ScriptError::Error { .. } | ScriptError::Thrown { .. } => ErrorKind::Script,
            ScriptError::Contract { .. } => ErrorKind::Contract,
            ScriptError::Predicate { .. } => ErrorKind::CheckPredicate,
        }
    }

    /// The message a script would read off the error object.
    pub fn message(&self) -> String {
        match self {
            ScriptError::Error { message } => message.clone(),
            ScriptError::Thrown { value } => value.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<Value> for ScriptError {
    fn from(value: Value) -> Self {
        ScriptError::Thrown { value }
    }
}

impl From<&str> for ScriptError {
    fn from(message: &str) -> Self {
        ScriptError::error(message)
    }
}

impl From<String> for ScriptError {
    fn from(message: String) -> Self {
        ScriptError::Error { message }
    }
}

/// Failure to load or validate an engine configuration.
#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("failed to read config file '{path}'")]
    #[diagnostic(code(vuscript::config::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML config")]
    #[diagnostic(code(vuscript::config::yaml))]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON config")]
    #[diagnostic(code(vuscript::config::json))]
    Json(#[from] serde_json::Error),

    #[error("unrecognized config format for '{path}'")]
    #[diagnostic(
        code(vuscript::config::format),
        help("use a .yaml, .yml or .json extension")
    )]
    UnknownFormat { path: String },

    #[error("invalid config value for `{field}`: {reason}")]
    #[diagnostic(code(vuscript::config::invalid))]
    Invalid { field: &'static str, reason: String },
}
