//! The periodic-trigger port.

/// Something that calls [`MovementScheduler::step`][crate::MovementScheduler::step]
/// at a fixed interval while running.
///
/// The scheduler starts its driver when the first train starts moving and
/// stops it once no train is active.  Both calls must be cheap and must not
/// block on an in-progress step.
pub trait TickDriver {
    fn start(&mut self);
    fn stop(&mut self);
    fn is_running(&self) -> bool;
}

/// A driver that never ticks by itself.
///
/// Tests and tools call `step()` directly and use the recorded
/// start/stop counts to check when the scheduler wanted ticks.
#[derive(Debug, Default, Clone)]
pub struct ManualDriver {
    running: bool,
    starts:  usize,
    stops:   usize,
}

impl ManualDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times the driver went from stopped to running.
    pub fn starts(&self) -> usize {
        self.starts
    }

    /// How many times the driver went from running to stopped.
    pub fn stops(&self) -> usize {
        self.stops
    }
}

impl TickDriver for ManualDriver {
    fn start(&mut self) {
        if !self.running {
            self.running = true;
            self.starts += 1;
        }
    }

    fn stop(&mut self) {
        if self.running {
            self.running = false;
            self.stops += 1;
        }
    }

    fn is_running(&self) -> bool {
        self.running
    }
}
