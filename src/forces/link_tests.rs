use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::forces::{Force, LinkForce};
use crate::models::{Edge, Vertex};
use crate::utils::SimulationError;

fn star_vertices() -> Vec<Vertex> {
    vec![
        Vertex::at(0, 0.0, 0.0),
        Vertex::at(1, 50.0, 0.0),
        Vertex::at(2, 0.0, 50.0),
        Vertex::at(3, -50.0, 0.0),
    ]
}

#[test]
fn test_degree_bias_splits_the_correction() {
    let mut vertices = star_vertices();
    let edges = vec![Edge::new(0, 1), Edge::new(0, 2), Edge::new(0, 3)];
    let mut links = LinkForce::new(edges, 30.0);

    links.apply(&mut vertices, 1.0, &mut StdRng::seed_from_u64(0));

    // k = (50 - 30) / 50 = 0.4, bias = 3 / (3 + 1), strength = 1 / min(3, 1)
    assert_relative_eq!(vertices[1].vx, -15.0, epsilon = 1e-9);
    assert!(vertices[2].vy < 0.0);
    assert!(vertices[0].vx > 0.0);
    assert_eq!(links.resolved_len(), 3);
}

#[test]
fn test_single_edge_strength_is_divided_by_min_degree() {
    let mut vertices = vec![Vertex::at(0, 0.0, 0.0), Vertex::at(1, 40.0, 0.0)];
    let mut links = LinkForce::new(vec![Edge::new(0, 1)], 20.0).with_strength(0.5);

    links.apply(&mut vertices, 1.0, &mut StdRng::seed_from_u64(0));

    // k = (40 - 20) / 40 * 0.5 = 0.25, displacement 40, equal bias
    assert_relative_eq!(vertices[1].vx, -5.0, epsilon = 1e-9);
    assert_relative_eq!(vertices[0].vx, 5.0, epsilon = 1e-9);
}

#[test]
fn test_edges_to_unplaced_vertices_are_skipped() {
    let mut vertices = vec![Vertex::at(0, 0.0, 0.0), Vertex::at(1, 40.0, 0.0)];
    let mut links = LinkForce::new(vec![Edge::new(0, 1), Edge::new(1, 99), Edge::new(1, 1)], 20.0);

    links.apply(&mut vertices, 1.0, &mut StdRng::seed_from_u64(0));

    assert_eq!(links.resolved_len(), 1);
    // k = (40 - 20) / 40 = 0.5, equal bias
    assert_relative_eq!(vertices[1].vx, -10.0, epsilon = 1e-9);
}

#[test]
fn test_tables_refresh_only_after_topology_change() {
    let mut vertices = vec![Vertex::at(0, 0.0, 0.0)];
    let mut links = LinkForce::new(vec![Edge::new(0, 1)], 20.0);
    let mut rng = StdRng::seed_from_u64(0);

    links.apply(&mut vertices, 1.0, &mut rng);
    assert_eq!(links.resolved_len(), 0);
    assert!(!links.is_stale());

    vertices.push(Vertex::at(1, 40.0, 0.0));
    links.apply(&mut vertices, 1.0, &mut rng);
    assert_eq!(links.resolved_len(), 0);

    links.on_topology_changed();
    assert!(links.is_stale());
    links.apply(&mut vertices, 1.0, &mut rng);
    assert_eq!(links.resolved_len(), 1);
}

#[test]
fn test_add_edges_marks_tables_stale() {
    let mut vertices = star_vertices();
    let mut links = LinkForce::new(vec![Edge::new(0, 1)], 30.0);
    links.apply(&mut vertices, 1.0, &mut StdRng::seed_from_u64(0));
    assert_eq!(links.resolved_len(), 1);

    links.add_edges([Edge::new(0, 2), Edge::new(0, 3)]);
    assert!(links.is_stale());
    links.apply(&mut vertices, 1.0, &mut StdRng::seed_from_u64(0));
    assert_eq!(links.resolved_len(), 3);
}

#[test]
fn test_subset_apply_is_rejected() {
    let mut vertices = star_vertices();
    let mut force = Force::from(LinkForce::new(vec![Edge::new(0, 1)], 30.0));
    let before = vertices.clone();

    let result = force.apply_subset(&mut vertices, &[0, 1], 1.0, &mut StdRng::seed_from_u64(0));

    assert_eq!(result, Err(SimulationError::SubsetUnsupported("link")));
    assert_eq!(vertices, before);
}
