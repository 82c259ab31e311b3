// src/utils/constants_config.rs
use log::warn;

use crate::utils::{
    DEFAULT_COOLING_TICKS,
    DEFAULT_SIMULATION_CONFIG,
    errors::SimulationError
};

/// Schedule and scheduler settings for a [`Simulation`](crate::simulation::Simulation).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    /// Starting temperature.
    pub alpha: f64,
    /// The run ends once alpha falls below this.
    pub alpha_min: f64,
    /// Fraction of the distance to `alpha_target` covered each tick.
    pub alpha_decay: f64,
    pub alpha_target: f64,
    /// Velocity retained after each tick, in `[0, 1]` for a damped system.
    pub velocity_decay: f64,
    /// Worker pool size. `None` lets rayon pick (one per logical core).
    pub worker_threads: Option<usize>,
    /// Partitions handed out per worker each phase, to smooth uneven partition cost.
    pub partitions_per_worker: usize,
    /// Seed for the jiggle rng. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        DEFAULT_SIMULATION_CONFIG
    }
}

impl SimulationConfig {
    /// Creates a config, falling back to the default for every `None`.
    ///
    /// When `alpha_min` is given but `alpha_decay` is not, the decay is derived so that
    /// alpha still crosses `alpha_min` after the default number of ticks.
    ///
    /// # Examples
    /// ```
    /// use force_graph::utils::SimulationConfig;
    ///
    /// let config = SimulationConfig::new(None, Some(0.01), None, None, Some(0.4));
    /// assert_eq!(config.velocity_decay, 0.4);
    /// assert!((config.alpha_decay - (1.0 - 0.01_f64.powf(1.0 / 300.0))).abs() < 1e-12);
    /// ```
    pub fn new(
        alpha: Option<f64>,
        alpha_min: Option<f64>,
        alpha_decay: Option<f64>,
        alpha_target: Option<f64>,
        velocity_decay: Option<f64>,
    ) -> Self {
        let default = DEFAULT_SIMULATION_CONFIG;
        let alpha_min = alpha_min.unwrap_or(default.alpha_min);
        Self {
            alpha: alpha.unwrap_or(default.alpha),
            alpha_min,
            alpha_decay: alpha_decay.unwrap_or_else(|| alpha_decay_for(alpha_min, DEFAULT_COOLING_TICKS)),
            alpha_target: alpha_target.unwrap_or(default.alpha_target),
            velocity_decay: velocity_decay.unwrap_or(default.velocity_decay),
            ..default
        }
    }

    pub fn with_worker_threads(mut self, worker_threads: usize) -> Self {
        self.worker_threads = Some(worker_threads);
        self
    }

    pub fn with_partitions_per_worker(mut self, partitions_per_worker: usize) -> Self {
        self.partitions_per_worker = partitions_per_worker;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks that every schedule scalar is finite. No range is enforced.
    pub fn validate(&self) -> Result<(), SimulationError> {
        ensure_finite("alpha", self.alpha)?;
        ensure_finite("alpha_min", self.alpha_min)?;
        ensure_finite("alpha_decay", self.alpha_decay)?;
        ensure_finite("alpha_target", self.alpha_target)?;
        ensure_finite("velocity_decay", self.velocity_decay)?;
        Ok(())
    }
}

/// The decay that takes alpha from 1 to `alpha_min` in `ticks` ticks (with a zero target).
pub fn alpha_decay_for(alpha_min: f64, ticks: u32) -> f64 {
    1.0 - alpha_min.powf(1.0 / ticks as f64)
}

pub(crate) fn ensure_finite(name: &'static str, value: f64) -> Result<f64, SimulationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        warn!("Rejecting non-finite value {} for {}", value, name);
        Err(SimulationError::NonFiniteParameter { name, value })
    }
}
