//! The periodic tick driver.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rt_movement::TickDriver;

/// A [`TickDriver`] whose state is a shared flag.
///
/// The scheduler flips the flag; the worker thread owned by
/// [`Simulation`][crate::Simulation] polls it once per interval.  Clones
/// share the same flag.
#[derive(Debug, Default, Clone)]
pub struct IntervalDriver {
    running: Arc<AtomicBool>,
}

impl IntervalDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.running)
    }
}

impl TickDriver for IntervalDriver {
    fn start(&mut self) {
        self.running.store(true, Ordering::Release);
    }

    fn stop(&mut self) {
        self.running.store(false, Ordering::Release);
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}
