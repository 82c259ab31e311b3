use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use force_graph::forces::{CenterForce, CollideForce, Force, LinkForce, ManyBodyForce};
use force_graph::models::{Edge, Vertex};
use force_graph::simulation::Simulation;
use force_graph::utils::SimulationConfig;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn star(leaves: u64) -> Simulation {
    let mut sim = Simulation::with_config(SimulationConfig::default().with_seed(1)).unwrap();
    let edges: Vec<Edge> = (1..=leaves).map(|leaf| Edge::new(0, leaf)).collect();
    sim.add_force("collide", CollideForce::new(80.0));
    sim.add_force("charge", ManyBodyForce::new(-500.0));
    sim.add_force("links", LinkForce::new(edges, 100.0));
    sim.add_force("center", CenterForce::new(0.0, 0.0));
    sim.place_vertices((0..=leaves).map(Vertex::new)).unwrap();
    sim
}

pub fn bench_star_tick(c: &mut Criterion) {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut group = c.benchmark_group("star_graph_tick");
    group.sample_size(20);

    for leaves in [1_000u64, 10_000] {
        let mut sim = star(leaves);
        // Let the layout unfold a little so the tree is not a tight spiral.
        for _ in 0..10 {
            sim.tick().unwrap();
        }
        group.bench_with_input(BenchmarkId::from_parameter(leaves), &leaves, |b, _| {
            b.iter(|| {
                sim.set_alpha(0.5).unwrap();
                sim.tick().unwrap();
            })
        });
    }
    group.finish();
}

pub fn bench_many_body_theta(c: &mut Criterion) {
    let mut group = c.benchmark_group("many_body_theta");
    let vertices: Vec<Vertex> = star(5_000).vertices().to_vec();

    for theta in [0.5, 0.9, 1.5] {
        let mut force = Force::from(ManyBodyForce::new(-30.0).with_theta(theta));
        group.bench_with_input(BenchmarkId::from_parameter(theta), &theta, |b, _| {
            let mut rng = StdRng::seed_from_u64(0);
            b.iter(|| {
                let mut scratch = vertices.clone();
                force.apply(&mut scratch, 1.0, &mut rng);
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_star_tick, bench_many_body_theta);
criterion_main!(benches);
