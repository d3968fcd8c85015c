//! Check sets, tag sets and the outcome of one `check` call.

use std::collections::BTreeMap;

use indexmap::{map::Entry, IndexMap};

use crate::errors::ScriptError;
use crate::runtime::Value;

type Predicate<'a> = Box<dyn Fn(&Value) -> Result<Value, ScriptError> + 'a>;

/// What a check predicate may return. The result is coerced to a boolean by
/// truthiness; an `Err` counts as a failing outcome.
pub trait PredicateResult {
    fn into_result(self) -> Result<Value, ScriptError>;
}

impl PredicateResult for bool {
    fn into_result(self) -> Result<Value, ScriptError> {
        Ok(Value::Bool(self))
    }
}

impl PredicateResult for Value {
    fn into_result(self) -> Result<Value, ScriptError> {
        Ok(self)
    }
}

impl PredicateResult for Result<bool, ScriptError> {
    fn into_result(self) -> Result<Value, ScriptError> {
        self.map(Value::Bool)
    }
}

impl PredicateResult for Result<Value, ScriptError> {
    fn into_result(self) -> Result<Value, ScriptError> {
        self
    }
}

/// Named predicates evaluated against one value, in insertion order.
///
/// ```rust
/// use vuscript::dsl::CheckSet;
/// use vuscript::runtime::Value;
///
/// let checks = CheckSet::new()
///     .with("status is 200", |r: &Value| r.get("status") == &Value::from(200))
///     .with("has body", |r: &Value| r.get("body").clone());
/// assert_eq!(checks.names().collect::<Vec<_>>(), ["status is 200", "has body"]);
/// ```
#[derive(Default)]
pub struct CheckSet<'a> {
    checks: IndexMap<String, Predicate<'a>>,
}

impl<'a> CheckSet<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a predicate. A repeated name replaces the earlier predicate but
    /// keeps its position, like a repeated key in a map literal.
    pub fn with<F, R>(mut self, name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Value) -> R + 'a,
        R: PredicateResult,
    {
        self.checks.insert(name.into(), boxed(predicate));
        self
    }

    /// Adds a predicate, rejecting a name that is already present.
    pub fn try_add<F, R>(&mut self, name: impl Into<String>, predicate: F) -> Result<(), ScriptError>
    where
        F: Fn(&Value) -> R + 'a,
        R: PredicateResult,
    {
        match self.checks.entry(name.into()) {
            Entry::Occupied(e) => Err(ScriptError::contract(
                "check",
                format!("duplicate check name '{}'", e.key()),
            )),
            Entry::Vacant(e) => {
                e.insert(boxed(predicate));
                Ok(())
            }
        }
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.checks.keys().map(String::as_str)
    }

    pub(crate) fn iter(
        &self,
    ) -> impl Iterator<Item = (&str, &(dyn Fn(&Value) -> Result<Value, ScriptError> + 'a))> {
        self.checks.iter().map(|(k, p)| (k.as_str(), p.as_ref()))
    }
}

impl CheckSet<'static> {
    /// Builds a check set from a script map of `name -> function`.
    ///
    /// `Nil` is the empty set. Every entry is validated before anything is
    /// returned, so a malformed map never runs a single predicate.
    pub fn from_value(value: &Value) -> Result<Self, ScriptError> {
        let map = match value {
            Value::Nil => return Ok(Self::new()),
            Value::Map(map) => map,
            other => {
                return Err(ScriptError::contract_with_help(
                    "check",
                    format!("checks must be a Map, got {}", other.type_name()),
                    "pass a map of check name to predicate function",
                ))
            }
        };
        let mut checks = IndexMap::with_capacity(map.len());
        for (name, entry) in map {
            let Some(callable) = entry.as_function() else {
                return Err(ScriptError::contract(
                    "check",
                    format!(
                        "check '{name}' must be a Function, got {}",
                        entry.type_name()
                    ),
                ));
            };
            let callable = callable.clone();
            let predicate: Predicate<'static> =
                Box::new(move |v: &Value| callable.call(std::slice::from_ref(v)));
            checks.insert(name.clone(), predicate);
        }
        Ok(Self { checks })
    }
}

fn boxed<'a, F, R>(predicate: F) -> Predicate<'a>
where
    F: Fn(&Value) -> R + 'a,
    R: PredicateResult,
{
    Box::new(move |v: &Value| predicate(v).into_result())
}

/// Extra tags attached to every event a `check` call emits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet(BTreeMap<String, String>);

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Builds a tag set from a script map. Strings are kept as-is; numbers and
    /// bools are rendered. `Nil` is the empty set.
    pub fn from_value(value: &Value) -> Result<Self, ScriptError> {
        let map = match value {
            Value::Nil => return Ok(Self::new()),
            Value::Map(map) => map,
            other => {
                return Err(ScriptError::contract(
                    "check",
                    format!("tags must be a Map, got {}", other.type_name()),
                ))
            }
        };
        let mut tags = Self::new();
        for (key, tag) in map {
            match tag {
                Value::String(s) => tags.insert(key.clone(), s.clone()),
                Value::Number(_) | Value::Bool(_) => tags.insert(key.clone(), tag.to_string()),
                other => {
                    return Err(ScriptError::contract(
                        "check",
                        format!("tag '{key}' must be a scalar, got {}", other.type_name()),
                    ))
                }
            }
        }
        Ok(tags)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TagSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Result of evaluating one predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckOutcome {
    Passed,
    Failed,
    /// The predicate raised. Counted as a failure.
    Raised(ScriptError),
}

impl CheckOutcome {
    pub fn passed(&self) -> bool {
        matches!(self, CheckOutcome::Passed)
    }
}

/// Per-check outcomes of one `check` call, in evaluation order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckReport {
    outcomes: Vec<(String, CheckOutcome)>,
}

impl CheckReport {
    pub(crate) fn push(&mut self, name: &str, outcome: CheckOutcome) {
        self.outcomes.push((name.to_string(), outcome));
    }

    /// Logical AND of every outcome; vacuously true for an empty check set.
    pub fn passed(&self) -> bool {
        self.outcomes.iter().all(|(_, o)| o.passed())
    }

    pub fn outcomes(&self) -> &[(String, CheckOutcome)] {
        &self.outcomes
    }

    pub fn outcome(&self, name: &str) -> Option<&CheckOutcome> {
        self.outcomes.iter().find(|(n, _)| n == name).map(|(_, o)| o)
    }

    pub fn failed(&self) -> impl Iterator<Item = &str> {
        self.outcomes
            .iter()
            .filter(|(_, o)| !o.passed())
            .map(|(n, _)| n.as_str())
    }
}
