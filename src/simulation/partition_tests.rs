use rayon::ThreadPoolBuilder;

use crate::simulation::partition::run_partitions;
use crate::simulation::partition_ranges;
use crate::utils::SimulationError;

#[test]
fn test_ranges_cover_every_index_once() {
    for n in [1, 2, 7, 64, 1000, 1001] {
        for parts in [1, 3, 4, 16, 5000] {
            let ranges = partition_ranges(n, parts);
            assert_eq!(ranges.len(), parts.min(n));
            assert_eq!(ranges.first().unwrap().start, 0);
            assert_eq!(ranges.last().unwrap().end, n);
            for pair in ranges.windows(2) {
                assert_eq!(pair[0].end, pair[1].start);
            }
            let lengths: Vec<usize> = ranges.iter().map(|r| r.len()).collect();
            let (min, max) = (lengths.iter().min().unwrap(), lengths.iter().max().unwrap());
            assert!(max - min <= 1, "uneven split {:?}", lengths);
        }
    }
}

#[test]
fn test_zero_parts_still_yields_one_range() {
    assert_eq!(partition_ranges(5, 0), vec![0..5]);
}

#[test]
fn test_run_partitions_keeps_range_order() {
    let pool = ThreadPoolBuilder::new().num_threads(3).build().unwrap();
    let ranges = partition_ranges(20, 6);
    let seeds = vec![0; ranges.len()];

    let buffers = run_partitions(&pool, &ranges, &seeds, |range, _, deltas| {
        for i in range {
            deltas.push(i, i as f64, 0.0);
        }
    })
    .unwrap();

    let order: Vec<usize> = buffers.iter().flat_map(|b| b.iter().map(|&(i, _, _)| i)).collect();
    assert_eq!(order, (1..20).collect::<Vec<_>>()); // index 0 pushes an all-zero delta
}

#[test]
fn test_run_partitions_reports_worker_panic() {
    let pool = ThreadPoolBuilder::new().num_threads(2).build().unwrap();
    let ranges = partition_ranges(8, 4);
    let seeds = vec![1; ranges.len()];

    let result = run_partitions(&pool, &ranges, &seeds, |range, _, _| {
        if range.contains(&5) {
            panic!("partition {:?} failed", range);
        }
    });

    match result {
        Err(SimulationError::WorkerPanicked(message)) => assert_eq!(message, "partition 4..6 failed"),
        other => panic!("expected WorkerPanicked, got {:?}", other.map(|b| b.len())),
    }
}
