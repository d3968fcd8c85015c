use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use chrono::Utc;
use log::{debug, info, warn};

use crate::bridge::{Bridge, GroupBody};
use crate::engine::config::SystemTag;
use crate::engine::sample::{CheckSample, GroupSample, Sample};
use crate::engine::Engine;
use crate::errors::ScriptError;

/// The engine as seen by one logical unit.
///
/// The group stack lives here, so nesting in one unit is invisible to every
/// other unit. Not `Sync`: a unit runs on exactly one thread.
pub struct UnitBridge<'e> {
    engine: &'e Engine,
    id: usize,
    iteration: Cell<usize>,
    groups: RefCell<Vec<String>>,
}

impl<'e> UnitBridge<'e> {
    pub(crate) fn new(engine: &'e Engine, id: usize) -> Self {
        Self {
            engine,
            id,
            iteration: Cell::new(0),
            groups: RefCell::new(Vec::new()),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn iteration(&self) -> usize {
        self.iteration.get()
    }

    pub(crate) fn set_iteration(&self, iteration: usize) {
        self.iteration.set(iteration);
    }

    /// Current group path: each open group prefixed by the separator, so
    /// `login` nested in `checkout` is `::checkout::login`. Empty at the root.
    pub fn group_path(&self) -> String {
        let sep = &self.engine.config().group_separator;
        self.groups
            .borrow()
            .iter()
            .fold(String::new(), |path, name| format!("{path}{sep}{name}"))
    }

    pub fn depth(&self) -> usize {
        self.groups.borrow().len()
    }

    fn check_tags(&self, name: &str, tags: &BTreeMap<String, String>) -> BTreeMap<String, String> {
        let config = self.engine.config();
        let mut merged = config.tags.clone();
        merged.extend(tags.iter().map(|(k, v)| (k.clone(), v.clone())));
        for tag in &config.system_tags {
            let value = match tag {
                SystemTag::Group => self.group_path(),
                SystemTag::Check => name.to_string(),
                SystemTag::Vu => self.id.to_string(),
                SystemTag::Iteration => self.iteration().to_string(),
            };
            merged.insert(tag.key().to_string(), value);
        }
        merged
    }
}

/// Pops the group and emits its duration when dropped, including during
/// unwinding.
struct GroupGuard<'a, 'e> {
    unit: &'a UnitBridge<'e>,
    path: String,
    started: Instant,
}

impl<'a, 'e> GroupGuard<'a, 'e> {
    fn enter(unit: &'a UnitBridge<'e>, name: &str) -> Self {
        unit.groups.borrow_mut().push(name.to_string());
        Self {
            path: unit.group_path(),
            unit,
            started: Instant::now(),
        }
    }
}

impl Drop for GroupGuard<'_, '_> {
    fn drop(&mut self) {
        self.unit.groups.borrow_mut().pop();
        let duration = self.started.elapsed();
        debug!(
            "unit {}: leaving group '{}' after {:?}",
            self.unit.id, self.path, duration
        );
        self.unit.engine.emit(Sample::GroupDuration(GroupSample {
            unit: self.unit.id,
            time: Utc::now(),
            group: std::mem::take(&mut self.path),
            duration,
        }));
    }
}

impl Bridge for UnitBridge<'_> {
    fn open_group(&self, name: &str, body: &mut GroupBody<'_>) -> Result<(), ScriptError> {
        let sep = &self.engine.config().group_separator;
        if name.is_empty() {
            return Err(ScriptError::contract("group", "group name must not be empty"));
        }
        if name.contains(sep.as_str()) {
            return Err(ScriptError::contract_with_help(
                "group",
                format!("group name '{name}' contains the group separator '{sep}'"),
                "pick a name without the separator; nest groups instead",
            ));
        }
        let guard = GroupGuard::enter(self, name);
        debug!("unit {}: entering group '{}'", self.id, guard.path);
        let result = body();
        drop(guard);
        result
    }

    fn record_check(&self, name: &str, passed: bool, tags: &BTreeMap<String, String>) {
        self.engine.emit(Sample::Check(CheckSample {
            unit: self.id,
            time: Utc::now(),
            group: self.group_path(),
            name: name.to_string(),
            passed,
            tags: self.check_tags(name, tags),
        }));
    }

    fn sleep(&self, seconds: f64) {
        if !self.engine.config().sleep {
            return;
        }
        if seconds.is_nan() || seconds < 0.0 {
            warn!("unit {}: ignoring sleep of {seconds}s", self.id);
            return;
        }
        // Too large for a Duration: sleep as long as the platform allows.
        let duration = Duration::try_from_secs_f64(seconds).unwrap_or(Duration::MAX);
        debug!("unit {}: sleeping {:?}", self.id, duration);
        std::thread::sleep(duration);
    }

    fn set_taint(&self) {
        if self.engine.taint_flag().set() {
            info!("run tainted by unit {}", self.id);
        }
    }
}
