use std::f64::consts::PI;

pub const DEFAULT_ALPHA: f64 = 1.0;
pub const DEFAULT_ALPHA_MIN: f64 = 0.001;
/// `1 - DEFAULT_ALPHA_MIN^(1 / DEFAULT_COOLING_TICKS)`, i.e. alpha crosses alpha_min after ~300 ticks.
pub const DEFAULT_ALPHA_DECAY: f64 = 0.02276277904418933;
pub const DEFAULT_ALPHA_TARGET: f64 = 0.0;
pub const DEFAULT_VELOCITY_DECAY: f64 = 0.6;
pub const DEFAULT_COOLING_TICKS: u32 = 300;
pub const DEFAULT_PARTITIONS_PER_WORKER: usize = 4;

pub const DEFAULT_FORCE_STRENGTH: f64 = 1.0;
pub const DEFAULT_MANY_BODY_STRENGTH: f64 = -30.0;
pub const DEFAULT_THETA: f64 = 0.9;
pub const DEFAULT_DISTANCE_MIN: f64 = 1.0;

/// Spiral placement of new vertices.
pub const INITIAL_PLACEMENT_RADIUS: f64 = 10.0;
pub const INITIAL_PLACEMENT_ANGLE: f64 = PI * (3.0 - 2.236_067_977_499_79);

pub const JIGGLE_MAGNITUDE: f64 = 1e-6;

/// Coordinates at or beyond this magnitude (2^53) are left out of the spatial index.
/// Past it neighbouring floats are more than one unit apart, so a unit extent has no width.
pub const MAX_INDEXED_COORDINATE: f64 = 9_007_199_254_740_992.0;

pub const DEFAULT_SIMULATION_CONFIG: crate::utils::SimulationConfig = crate::utils::SimulationConfig {
    alpha: DEFAULT_ALPHA,
    alpha_min: DEFAULT_ALPHA_MIN,
    alpha_decay: DEFAULT_ALPHA_DECAY,
    alpha_target: DEFAULT_ALPHA_TARGET,
    velocity_decay: DEFAULT_VELOCITY_DECAY,
    worker_threads: None,
    partitions_per_worker: DEFAULT_PARTITIONS_PER_WORKER,
    seed: None,
};
