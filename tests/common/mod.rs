//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use vuscript::bridge::{Bridge, GroupBody};
use vuscript::ScriptError;

/// Everything a [`RecordingBridge`] was asked to do, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Open(String),
    Close(String),
    Check {
        name: String,
        passed: bool,
        tags: BTreeMap<String, String>,
    },
    Sleep(f64),
    Taint,
}

/// A bridge that only records calls. Groups always close, even on error.
#[derive(Default)]
pub struct RecordingBridge {
    events: RefCell<Vec<Event>>,
    opened: Cell<usize>,
    closed: Cell<usize>,
    tainted: Cell<bool>,
}

impl RecordingBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    pub fn opened(&self) -> usize {
        self.opened.get()
    }

    pub fn closed(&self) -> usize {
        self.closed.get()
    }

    pub fn is_tainted(&self) -> bool {
        self.tainted.get()
    }

    pub fn checks(&self) -> Vec<(String, bool)> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Event::Check { name, passed, .. } => Some((name.clone(), *passed)),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: Event) {
        self.events.borrow_mut().push(event);
    }
}

impl Bridge for RecordingBridge {
    fn open_group(&self, name: &str, body: &mut GroupBody<'_>) -> Result<(), ScriptError> {
        self.opened.set(self.opened.get() + 1);
        self.push(Event::Open(name.to_string()));
        let result = body();
        self.push(Event::Close(name.to_string()));
        self.closed.set(self.closed.get() + 1);
        result
    }

    fn record_check(&self, name: &str, passed: bool, tags: &BTreeMap<String, String>) {
        self.push(Event::Check {
            name: name.to_string(),
            passed,
            tags: tags.clone(),
        });
    }

    fn sleep(&self, seconds: f64) {
        self.push(Event::Sleep(seconds));
    }

    fn set_taint(&self) {
        self.tainted.set(true);
        self.push(Event::Taint);
    }
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
