//! # Reference host engine
//!
//! A small in-process engine that satisfies the [`Bridge`](crate::bridge::Bridge)
//! contract: each logical unit gets its own [`UnitBridge`] (private group
//! stack, blocking sleep on its own thread), all units share one
//! [`TaintFlag`] and one [`MetricSink`].
//!
//! [`Engine::run`] is the script-execution layer: it drives `vus` units for
//! `iterations` iterations each and turns escaped script errors into taint.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use log::{debug, warn};

use crate::dsl::Dsl;
use crate::errors::{ConfigError, ScriptError};

mod config;
mod sample;
mod sink;
mod taint;
mod unit;

pub use config::{EngineConfig, SystemTag};
pub use sample::{CheckSample, GroupSample, Sample};
pub use sink::{JsonLinesSink, MetricSink, NullSink, SampleBuffer};
pub use taint::TaintFlag;
pub use unit::UnitBridge;

pub struct Engine {
    config: EngineConfig,
    taint: TaintFlag,
    sink: Arc<dyn MetricSink>,
}

impl Engine {
    pub fn new(config: EngineConfig, sink: Arc<dyn MetricSink>) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            taint: TaintFlag::new(),
            sink,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn taint_flag(&self) -> &TaintFlag {
        &self.taint
    }

    pub fn is_tainted(&self) -> bool {
        self.taint.is_set()
    }

    /// A bridge for logical unit `id`. Call from the thread that runs the unit.
    pub fn unit(&self, id: usize) -> UnitBridge<'_> {
        UnitBridge::new(self, id)
    }

    pub(crate) fn emit(&self, sample: Sample) {
        self.sink.emit(sample);
    }

    /// Runs `script` on every unit, one thread per unit.
    ///
    /// An error or panic escaping an iteration is recorded as a failure of
    /// that iteration and taints the run; the unit then moves on to its next
    /// iteration.
    pub fn run<F>(&self, script: F) -> RunReport
    where
        F: Fn(&Dsl<'_>) -> Result<(), ScriptError> + Sync,
    {
        let script = &script;
        let outcomes: Vec<UnitOutcome> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..self.config.vus)
                .map(|id| s.spawn(move || self.run_unit(id, script)))
                .collect();
            handles
                .into_iter()
                .enumerate()
                .map(|(id, handle)| {
                    handle.join().unwrap_or_else(|_| {
                        let error = ScriptError::error(format!("unit {id} panicked"));
                        warn!("{error}");
                        self.taint.set();
                        UnitOutcome {
                            completed: 0,
                            failures: vec![UnitFailure {
                                unit: id,
                                iteration: None,
                                error,
                            }],
                        }
                    })
                })
                .collect()
        });

        let mut report = RunReport::default();
        for outcome in outcomes {
            report.iterations += outcome.completed;
            report.failures.extend(outcome.failures);
        }
        report.tainted = self.is_tainted();
        report
    }

    fn run_unit<F>(&self, id: usize, script: &F) -> UnitOutcome
    where
        F: Fn(&Dsl<'_>) -> Result<(), ScriptError>,
    {
        let bridge = self.unit(id);
        let dsl = Dsl::new(&bridge);
        let mut outcome = UnitOutcome::default();
        for iteration in 0..self.config.iterations {
            bridge.set_iteration(iteration);
            debug!("unit {id}: iteration {iteration}");
            let result = panic::catch_unwind(AssertUnwindSafe(|| script(&dsl)))
                .unwrap_or_else(|payload| {
                    Err(ScriptError::from_panic(
                        &format!("unit {id}, iteration {iteration}"),
                        payload.as_ref(),
                    ))
                });
            if let Err(error) = result {
                warn!("unit {id}, iteration {iteration}: uncaught script error: {error}");
                dsl.taint();
                outcome.failures.push(UnitFailure {
                    unit: id,
                    iteration: Some(iteration),
                    error,
                });
            }
            outcome.completed += 1;
        }
        outcome
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            config: EngineConfig::default(),
            taint: TaintFlag::new(),
            sink: Arc::new(NullSink),
        }
    }
}

#[derive(Default)]
struct UnitOutcome {
    completed: usize,
    failures: Vec<UnitFailure>,
}

/// A script error that escaped an iteration.
#[derive(Debug, Clone)]
pub struct UnitFailure {
    pub unit: usize,
    /// `None` when the unit's thread died outside any iteration.
    pub iteration: Option<usize>,
    pub error: ScriptError,
}

/// Summary of an [`Engine::run`]. Exit-status policy is left to the caller.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub tainted: bool,
    /// Iterations that ran to completion or to an uncaught error.
    pub iterations: usize,
    pub failures: Vec<UnitFailure>,
}
