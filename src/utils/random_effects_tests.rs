use crate::utils::{jiggle, JIGGLE_MAGNITUDE};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_jiggle_is_small_and_centered() {
    let mut rng = StdRng::seed_from_u64(42);
    let samples: Vec<f64> = (0..10_000).map(|_| jiggle(&mut rng)).collect();
    assert!(samples.iter().all(|s| s.abs() <= JIGGLE_MAGNITUDE / 2.0));
    let mean = samples.iter().sum::<f64>() / samples.len() as f64;
    assert!(mean.abs() < JIGGLE_MAGNITUDE * 0.05, "mean {} is not centered", mean);
}

#[test]
fn test_jiggle_is_reproducible_with_seed() {
    let mut a = StdRng::seed_from_u64(7);
    let mut b = StdRng::seed_from_u64(7);
    assert_eq!(jiggle(&mut a), jiggle(&mut b));
}
