// demos/star_graph.rs

use std::time::Instant;

use log::info;
use force_graph::forces::{CenterForce, CollideForce, LinkForce, ManyBodyForce};
use force_graph::models::{Edge, Vertex};
use force_graph::simulation::{Simulation, SimulationObserver};
use force_graph::utils::{SimulationConfig, SimulationError};

const LEAVES: u64 = 9_999;

/// Logs how long each tick took.
struct TickTimer {
    last: Instant,
}

impl SimulationObserver for TickTimer {
    fn on_tick(&mut self, simulation: &Simulation) {
        let now = Instant::now();
        info!(
            "tick {:>3}  alpha {:.4}  {:>7.2} ms",
            simulation.ticks(),
            simulation.alpha(),
            now.duration_since(self.last).as_secs_f64() * 1e3
        );
        self.last = now;
    }

    fn on_end(&mut self, simulation: &Simulation) {
        let hub = &simulation.vertices()[0];
        info!("hub settled at ({:.1}, {:.1})", hub.x, hub.y);
    }
}

fn main() -> Result<(), SimulationError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut sim = Simulation::with_config(SimulationConfig::default().with_seed(42))?;
    info!("star graph with {} leaves on {} workers", LEAVES, sim.worker_threads());

    let edges: Vec<Edge> = (1..=LEAVES).map(|leaf| Edge::new(0, leaf)).collect();
    sim.add_force("collide", CollideForce::new(80.0));
    sim.add_force("charge", ManyBodyForce::new(-500.0));
    sim.add_force("links", LinkForce::new(edges, 100.0).with_strength(1.0));
    sim.add_force("center", CenterForce::new(0.0, 0.0));
    sim.place_vertices((0..=LEAVES).map(Vertex::new))?;

    let started = Instant::now();
    let ticks = sim.run_with_observer(&mut TickTimer { last: Instant::now() })?;
    info!("{} ticks in {:.2?}", ticks, started.elapsed());

    Ok(())
}
