use rand::Rng;

use crate::utils::JIGGLE_MAGNITUDE;

/// Returns a tiny offset, uniform in `[-5e-7, 5e-7)`, used in place of an exactly zero
/// displacement so that coincident points still get a direction.
///
/// # Examples
/// ```
/// use force_graph::utils::jiggle;
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let mut rng = StdRng::seed_from_u64(1);
/// let offset = jiggle(&mut rng);
/// assert!(offset.abs() <= 5e-7);
/// ```
pub fn jiggle<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    (rng.random::<f64>() - 0.5) * JIGGLE_MAGNITUDE
}
