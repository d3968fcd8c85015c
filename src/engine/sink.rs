//! Destinations for engine samples.

use std::io::Write;
use std::sync::{Mutex, PoisonError};

use log::warn;

use crate::engine::sample::Sample;

/// Receives every sample the engine emits. Shared by all logical units.
pub trait MetricSink: Send + Sync {
    fn emit(&self, sample: Sample);
}

/// Discards all samples.
pub struct NullSink;

impl MetricSink for NullSink {
    fn emit(&self, _sample: Sample) {}
}

/// Collects samples in memory for tests or programmatic capture.
#[derive(Default)]
pub struct SampleBuffer {
    samples: Mutex<Vec<Sample>>,
}

impl SampleBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn samples(&self) -> Vec<Sample> {
        self.samples
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn take(&self) -> Vec<Sample> {
        std::mem::take(&mut *self.samples.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn len(&self) -> usize {
        self.samples.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl MetricSink for SampleBuffer {
    fn emit(&self, sample: Sample) {
        self.samples
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(sample);
    }
}

/// Writes one JSON object per sample, newline separated.
///
/// Write failures are logged and dropped; they never reach script code.
pub struct JsonLinesSink<W: Write + Send> {
    out: Mutex<W>,
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> MetricSink for JsonLinesSink<W> {
    fn emit(&self, sample: Sample) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        let written = serde_json::to_writer(&mut *out, &sample)
            .map_err(std::io::Error::from)
            .and_then(|()| out.write_all(b"\n"));
        if let Err(e) = written {
            warn!("dropping sample: {e}");
        }
    }
}
