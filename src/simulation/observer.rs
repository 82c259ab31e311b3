use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::simulation::Simulation;

/// Hooks called by [`Simulation::run_with_observer`].
///
/// Both methods default to doing nothing, so an observer only implements what it needs.
pub trait SimulationObserver {
    /// Called after every completed tick.
    fn on_tick(&mut self, _simulation: &Simulation) {}

    /// Called once when the run ends, whether it settled or was stopped.
    fn on_end(&mut self, _simulation: &Simulation) {}
}

impl SimulationObserver for () {}

/// Cloneable flag for asking a running simulation to stop after its current tick.
///
/// # Example
/// ```
/// use force_graph::simulation::StopHandle;
///
/// let handle = StopHandle::default();
/// let remote = handle.clone();
/// remote.stop();
/// assert!(handle.is_stopped());
/// ```
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub(crate) fn reset(&self) {
        self.0.store(false, Ordering::Release);
    }
}
