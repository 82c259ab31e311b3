use approx::{assert_abs_diff_eq, assert_relative_eq};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::forces::{CollideForce, VelocityDeltas};
use crate::models::Vertex;

fn collide(force: &mut CollideForce, vertices: &[Vertex], alpha: f64) -> Vec<Vertex> {
    force.prepare(vertices);
    let mut deltas = VelocityDeltas::new();
    force.accumulate(vertices, 0..vertices.len(), alpha, &mut StdRng::seed_from_u64(7), &mut deltas);
    let mut out = vertices.to_vec();
    deltas.apply_to(&mut out);
    out
}

#[test]
fn test_overlapping_pair_is_split_evenly() {
    let vertices = vec![Vertex::at(0, 0.0, 0.0), Vertex::at(1, 10.0, 0.0)];
    let out = collide(&mut CollideForce::new(10.0), &vertices, 1.0);

    // overlap of 10 against a combined radius of 20, shared equally
    assert_relative_eq!(out[0].vx, -5.0, epsilon = 1e-9);
    assert_relative_eq!(out[1].vx, 5.0, epsilon = 1e-9);
    assert_abs_diff_eq!(out[0].vy, 0.0, epsilon = 1e-6);
}

#[test]
fn test_strength_scales_the_push() {
    let vertices = vec![Vertex::at(0, 0.0, 0.0), Vertex::at(1, 10.0, 0.0)];
    let out = collide(&mut CollideForce::new(10.0).with_strength(0.5), &vertices, 1.0);
    assert_relative_eq!(out[0].vx, -2.5, epsilon = 1e-9);
}

#[test]
fn test_alpha_does_not_matter() {
    let vertices = vec![Vertex::at(0, 0.0, 0.0), Vertex::at(1, 10.0, 0.0)];
    let hot = collide(&mut CollideForce::new(10.0), &vertices, 1.0);
    let cold = collide(&mut CollideForce::new(10.0), &vertices, 0.0);
    assert_eq!(hot, cold);
}

#[test]
fn test_separated_vertices_are_untouched() {
    let vertices = vec![Vertex::at(0, 0.0, 0.0), Vertex::at(1, 100.0, 0.0), Vertex::at(2, 0.0, -100.0)];
    let mut force = CollideForce::new(10.0);
    force.prepare(&vertices);

    let mut deltas = VelocityDeltas::new();
    force.accumulate(&vertices, 0..3, 1.0, &mut StdRng::seed_from_u64(0), &mut deltas);
    assert!(deltas.is_empty());
}

#[test]
fn test_overlap_uses_projected_positions() {
    let mut a = Vertex::at(0, 0.0, 0.0);
    let b = Vertex::at(1, 100.0, 0.0);
    a.vx = 90.0;
    let out = collide(&mut CollideForce::new(10.0), &[a, b], 1.0);

    assert!(out[0].vx < 90.0);
    assert!(out[1].vx > 0.0);
}

#[test]
fn test_every_coincident_vertex_is_moved() {
    let vertices = vec![Vertex::at(0, 5.0, 5.0), Vertex::at(1, 5.0, 5.0), Vertex::at(2, 5.0, 5.0)];
    let out = collide(&mut CollideForce::new(1.0), &vertices, 1.0);

    for v in &out {
        assert!(v.vx.is_finite() && v.vy.is_finite());
        assert!(v.vx != 0.0 || v.vy != 0.0, "vertex {} left in place", v.id());
    }
}

#[test]
fn test_pair_is_resolved_once_per_partition_split() {
    let vertices = vec![Vertex::at(0, 0.0, 0.0), Vertex::at(1, 10.0, 0.0)];
    let mut force = CollideForce::new(10.0);
    force.prepare(&vertices);

    // The lower ordinal owns the pair, so the upper partition records nothing.
    let mut upper = VelocityDeltas::new();
    force.accumulate(&vertices, 1..2, 1.0, &mut StdRng::seed_from_u64(0), &mut upper);
    assert!(upper.is_empty());

    let mut lower = VelocityDeltas::new();
    force.accumulate(&vertices, 0..1, 1.0, &mut StdRng::seed_from_u64(0), &mut lower);
    assert_eq!(lower.len(), 2);
}
