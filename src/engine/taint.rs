use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Process-wide "this run failed" flag shared by every logical unit.
///
/// Only ever moves from false to true. Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct TaintFlag(Arc<AtomicBool>);

impl TaintFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the flag. Returns true if this call flipped it.
    pub fn set(&self) -> bool {
        !self.0.fetch_or(true, Ordering::AcqRel)
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_is_idempotent() {
        let flag = TaintFlag::new();
        assert!(!flag.is_set());
        assert!(flag.set());
        assert!(!flag.set());
        assert!(flag.is_set());
    }

    #[test]
    fn concurrent_setters_flip_once() {
        let flag = TaintFlag::new();
        let flips: usize = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    let flag = flag.clone();
                    s.spawn(move || usize::from(flag.set()))
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap_or(0)).sum()
        });
        assert_eq!(flips, 1);
        assert!(flag.is_set());
    }
}
