//! Millisecond time sources for the AI decision cadence

use std::cell::Cell;
use std::rc::Rc;

/// Abstract time source, in milliseconds from an arbitrary origin
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Hand-driven clock for tests and headless runs.
///
/// Clones share the same time, so a caller can keep one handle and give
/// the other to a simulator.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, ms: f64) {
        self.now.set(ms);
    }

    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}
