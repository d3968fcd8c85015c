//! # Script-facing vocabulary
//!
//! [`Dsl`] is what a test script holds while it runs: `group`, `check`,
//! `sleep` and `taint`, all delegated to a [`Bridge`]. [`fail`] and [`assert`]
//! are free functions because they never need the bridge.
//!
//! ```rust,ignore
//! dsl.group("login", || {
//!     let res = client.post("/login", &creds)?;
//!     dsl.check(
//!         &res,
//!         &CheckSet::new().with("status is 200", |r: &Value| r.get("status") == &Value::from(200)),
//!         &TagSet::new(),
//!     );
//!     dsl.sleep(1.5)
//! })?;
//! ```

use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;

use log::{debug, trace, warn};

use crate::bridge::Bridge;
use crate::errors::ScriptError;
use crate::runtime::{Truthy, Value};

mod assert;
mod check;

pub use assert::{assert, assert_msg, fail, DEFAULT_ASSERT_MESSAGE};
pub use check::{CheckOutcome, CheckReport, CheckSet, PredicateResult, TagSet};

/// The DSL surface for one logical unit.
#[derive(Clone, Copy)]
pub struct Dsl<'b> {
    bridge: &'b dyn Bridge,
}

impl<'b> Dsl<'b> {
    pub fn new(bridge: &'b dyn Bridge) -> Self {
        Self { bridge }
    }

    pub fn bridge(&self) -> &'b dyn Bridge {
        self.bridge
    }

    /// Runs `body` inside the group `name` and returns its value unchanged.
    ///
    /// The bridge closes the group on every exit path; an error from `body`
    /// is returned after that.
    pub fn group<T, F>(&self, name: &str, body: F) -> Result<T, ScriptError>
    where
        F: FnOnce() -> Result<T, ScriptError>,
    {
        if name.is_empty() {
            return Err(ScriptError::contract("group", "group name must not be empty"));
        }
        let mut body = Some(body);
        let mut out = None;
        self.bridge.open_group(name, &mut || {
            let body = body.take().ok_or_else(|| {
                ScriptError::contract("group", "group body may only run once")
            })?;
            out = Some(body()?);
            Ok(())
        })?;
        out.ok_or_else(|| {
            ScriptError::contract("group", format!("group '{name}' closed without running its body"))
        })
    }

    /// Like [`Dsl::group`], but skipped entirely when `condition` is falsy.
    /// A skipped group never reaches the bridge and yields `None`.
    pub fn group_if<T, F>(
        &self,
        name: &str,
        condition: impl Truthy,
        body: F,
    ) -> Result<Option<T>, ScriptError>
    where
        F: FnOnce() -> Result<T, ScriptError>,
    {
        if !condition.is_truthy() {
            debug!("skipping group '{name}': condition is falsy");
            return Ok(None);
        }
        self.group(name, body).map(Some)
    }

    /// Evaluates every check against `value` and returns true only if all
    /// passed. Any failure taints the run.
    pub fn check(&self, value: &Value, checks: &CheckSet<'_>, tags: &TagSet) -> bool {
        self.check_report(value, checks, tags).passed()
    }

    /// [`Dsl::check`] with the per-check outcomes.
    ///
    /// Each predicate runs exactly once, in insertion order, and produces
    /// exactly one event. A predicate that raises or panics is a failing
    /// outcome and does not stop the remaining predicates.
    pub fn check_report(&self, value: &Value, checks: &CheckSet<'_>, tags: &TagSet) -> CheckReport {
        let mut report = CheckReport::default();
        for (name, predicate) in checks.iter() {
            let result = panic::catch_unwind(AssertUnwindSafe(|| predicate(value)))
                .unwrap_or_else(|payload| {
                    Err(ScriptError::from_panic("predicate", payload.as_ref()))
                });
            let outcome = match result {
                Ok(result) if result.is_truthy() => CheckOutcome::Passed,
                Ok(_) => CheckOutcome::Failed,
                Err(err) => {
                    let err = ScriptError::predicate(name, err);
                    warn!("{err}");
                    CheckOutcome::Raised(err)
                }
            };
            trace!("check '{name}': passed={}", outcome.passed());
            self.bridge.record_check(name, outcome.passed(), tags.as_map());
            report.push(name, outcome);
        }
        if !report.passed() {
            debug!("check failed, tainting run");
            self.bridge.set_taint();
        }
        report
    }

    /// Suspends this logical unit for `seconds`.
    ///
    /// Anything a [`Duration`] cannot hold is a contract error: negative,
    /// NaN, infinite, or too large.
    pub fn sleep(&self, seconds: impl Into<f64>) -> Result<(), ScriptError> {
        let seconds = seconds.into();
        if let Err(e) = Duration::try_from_secs_f64(seconds) {
            return Err(ScriptError::contract_with_help(
                "sleep",
                format!("invalid duration of {seconds} seconds: {e}"),
                "pass a finite, non-negative number of seconds",
            ));
        }
        self.bridge.sleep(seconds);
        Ok(())
    }

    /// Marks the run as failed without failing a check.
    pub fn taint(&self) {
        self.bridge.set_taint();
    }
}
