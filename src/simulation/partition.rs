use std::any::Any;
use std::ops::Range;
use std::panic::{self, AssertUnwindSafe};

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use rayon::ThreadPool;

use crate::forces::VelocityDeltas;
use crate::utils::SimulationError;

/// Splits `0..n` into at most `parts` contiguous ranges whose lengths differ by at most one.
///
/// # Example
/// ```
/// use force_graph::simulation::partition_ranges;
///
/// assert_eq!(partition_ranges(10, 4), vec![0..3, 3..6, 6..8, 8..10]);
/// assert_eq!(partition_ranges(2, 8), vec![0..1, 1..2]);
/// assert!(partition_ranges(0, 8).is_empty());
/// ```
pub fn partition_ranges(n: usize, parts: usize) -> Vec<Range<usize>> {
    if n == 0 {
        return Vec::new();
    }
    let parts = parts.clamp(1, n);
    let base = n / parts;
    let extra = n % parts;

    let mut ranges = Vec::with_capacity(parts);
    let mut start = 0;
    for p in 0..parts {
        let len = base + usize::from(p < extra);
        ranges.push(start..start + len);
        start += len;
    }
    ranges
}

/// Runs `job` once per range on `pool`, each with its own rng and delta buffer.
///
/// Buffers come back in range order. A panic in any job is caught after the join and
/// reported as [`SimulationError::WorkerPanicked`].
pub(crate) fn run_partitions<F>(pool: &ThreadPool, ranges: &[Range<usize>], seeds: &[u64], job: F) -> Result<Vec<VelocityDeltas>, SimulationError>
where
    F: Fn(Range<usize>, &mut StdRng, &mut VelocityDeltas) + Sync,
{
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        pool.install(|| {
            ranges
                .par_iter()
                .zip(seeds.par_iter())
                .map(|(range, &seed)| {
                    let mut rng = StdRng::seed_from_u64(seed);
                    let mut deltas = VelocityDeltas::with_capacity(range.len());
                    job(range.clone(), &mut rng, &mut deltas);
                    deltas
                })
                .collect::<Vec<_>>()
        })
    }));
    outcome.map_err(|payload| SimulationError::WorkerPanicked(panic_message(payload.as_ref())))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
