use crate::utils::{alpha_decay_for, SimulationConfig, SimulationError, DEFAULT_ALPHA_DECAY, DEFAULT_ALPHA_MIN};
use approx::assert_relative_eq;

#[test]
fn test_default_decay_matches_cooling_ticks() {
    assert_relative_eq!(alpha_decay_for(DEFAULT_ALPHA_MIN, 300), DEFAULT_ALPHA_DECAY, epsilon = 1e-15);
}

#[test]
fn test_default_alpha_crosses_min_after_300_ticks() {
    let config = SimulationConfig::default();
    let mut alpha = config.alpha;
    let mut ticks = 0;
    while alpha >= config.alpha_min {
        alpha += (config.alpha_target - alpha) * config.alpha_decay;
        ticks += 1;
    }
    assert_eq!(ticks, 300);
}

#[test]
fn test_new_falls_back_to_defaults() {
    let config = SimulationConfig::new(None, None, None, None, None);
    assert_eq!(config, SimulationConfig::default());
}

#[test]
fn test_validate_rejects_non_finite() {
    let mut config = SimulationConfig::default();
    config.velocity_decay = f64::NAN;
    match config.validate() {
        Err(SimulationError::NonFiniteParameter { name, .. }) => assert_eq!(name, "velocity_decay"),
        other => panic!("Expected NonFiniteParameter, got {:?}", other),
    }
}

#[test]
fn test_validate_accepts_out_of_range_but_finite() {
    let config = SimulationConfig::new(Some(5.0), Some(-1.0), Some(2.0), Some(-3.0), Some(1.5));
    assert!(config.validate().is_ok());
}
