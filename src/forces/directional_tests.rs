use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use approx::assert_relative_eq;

use crate::forces::{CenterForce, XForce, YForce};
use crate::models::Vertex;

#[test]
fn test_center_moves_the_mean_onto_the_target() {
    let mut vertices = vec![Vertex::at(0, 10.0, 10.0), Vertex::at(1, 30.0, -2.0), Vertex::at(2, 20.0, 1.0)];
    CenterForce::new(5.0, 5.0).apply(&mut vertices);

    let n = vertices.len() as f64;
    let mean_x = vertices.iter().map(|v| v.x).sum::<f64>() / n;
    let mean_y = vertices.iter().map(|v| v.y).sum::<f64>() / n;
    assert_relative_eq!(mean_x, 5.0, epsilon = 1e-12);
    assert_relative_eq!(mean_y, 5.0, epsilon = 1e-12);
    assert!(vertices.iter().all(|v| v.vx == 0.0 && v.vy == 0.0));
}

#[test]
fn test_center_strength_moves_part_of_the_way() {
    let mut vertices = vec![Vertex::at(0, 10.0, 0.0), Vertex::at(1, 30.0, 0.0)];
    CenterForce::new(0.0, 0.0).with_strength(0.5).apply(&mut vertices);
    assert_relative_eq!(vertices[0].x, 0.0);
    assert_relative_eq!(vertices[1].x, 20.0);
}

#[test]
fn test_center_leaves_fixed_axes_alone() {
    let mut vertices = vec![Vertex::with_fixed_axes(0, 10.0, 10.0, true, false), Vertex::at(1, 30.0, 30.0)];
    CenterForce::new(0.0, 0.0).apply(&mut vertices);

    assert_eq!(vertices[0].x, 10.0);
    assert_relative_eq!(vertices[0].y, -10.0);
    assert_relative_eq!(vertices[1].x, 10.0);
}

#[test]
fn test_center_subset_shifts_only_members() {
    let mut vertices = vec![Vertex::at(0, 10.0, 0.0), Vertex::at(1, 30.0, 0.0)];
    CenterForce::new(0.0, 0.0).apply_subset(&mut vertices, &[1]);
    assert_eq!(vertices[0].x, 10.0);
    assert_relative_eq!(vertices[1].x, 10.0);
}

#[test]
fn test_center_on_empty_set_is_a_no_op() {
    let mut vertices: Vec<Vertex> = Vec::new();
    CenterForce::new(1.0, 1.0).apply(&mut vertices);
    assert!(CenterForce::new(1.0, 1.0).shift(&vertices).is_none());
}

#[test]
fn test_axis_forces_pull_toward_their_line() {
    let mut v = Vertex::at(0, 4.0, -6.0);
    XForce::new(10.0).with_strength(0.1).apply_to(&mut v, 0.5);
    YForce::new(0.0).apply_to(&mut v, 0.5);

    assert_relative_eq!(v.vx, 0.3, epsilon = 1e-12);
    assert_relative_eq!(v.vy, 3.0, epsilon = 1e-12);
    assert_eq!((v.x, v.y), (4.0, -6.0));
}

#[test]
fn test_moving_axis_target_is_read_at_apply_time() {
    let line = Arc::new(AtomicU64::new(10f64.to_bits()));
    let reader = Arc::clone(&line);
    let force = XForce::following(move || f64::from_bits(reader.load(Ordering::Relaxed)));

    let mut v = Vertex::at(0, 0.0, 0.0);
    force.apply_to(&mut v, 0.5);
    assert_relative_eq!(v.vx, 5.0);

    line.store((-30f64).to_bits(), Ordering::Relaxed);
    force.apply_to(&mut v, 0.5);
    assert_relative_eq!(v.vx, -10.0);
}

#[test]
fn test_axis_subset_reads_the_target_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let force = YForce::following(move || {
        counter.fetch_add(1, Ordering::Relaxed);
        8.0
    });

    let mut vertices = vec![Vertex::at(0, 0.0, 0.0), Vertex::at(1, 0.0, 4.0), Vertex::at(2, 0.0, 2.0)];
    force.apply_subset(&mut vertices, &[0, 2, 9], 1.0);

    assert_eq!(calls.load(Ordering::Relaxed), 1);
    assert_relative_eq!(vertices[0].vy, 8.0);
    assert_eq!(vertices[1].vy, 0.0);
    assert_relative_eq!(vertices[2].vy, 6.0);
}

#[test]
fn test_center_among_members_uses_their_own_mean() {
    let mut vertices = vec![Vertex::at(0, 10.0, 0.0), Vertex::at(1, 30.0, 0.0), Vertex::at(2, 100.0, 0.0)];
    CenterForce::new(0.0, 0.0).apply_among(&mut vertices, &[0, 1]);

    assert_relative_eq!(vertices[0].x, -10.0);
    assert_relative_eq!(vertices[1].x, 10.0);
    assert_eq!(vertices[2].x, 100.0);
}
