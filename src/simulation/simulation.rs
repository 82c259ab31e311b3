use std::collections::{HashMap, HashSet};
use std::time::Instant;

use log::{debug, error, info, trace, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::forces::Force;
use crate::models::{Vertex, VertexId};
use crate::simulation::partition::run_partitions;
use crate::simulation::{partition_ranges, SimulationObserver, StopHandle};
use crate::utils::{ensure_finite, SimulationConfig, SimulationError, INITIAL_PLACEMENT_ANGLE, INITIAL_PLACEMENT_RADIUS};

/// A registered force and, when scoped, the vertices it acts on.
#[derive(Debug)]
struct Registration {
    name: String,
    force: Force,
    scope: Option<Scope>,
}

/// Vertex ids a force is limited to, and their ordinals among the placed vertices.
#[derive(Debug)]
struct Scope {
    ids: Vec<VertexId>,
    members: Vec<usize>,
}

impl Scope {
    fn new(ids: Vec<VertexId>, index: &HashMap<VertexId, usize>) -> Self {
        let mut scope = Scope { ids, members: Vec::new() };
        scope.resolve(index);
        scope
    }

    /// Ids that are not placed yet are left out until a later placement.
    fn resolve(&mut self, index: &HashMap<VertexId, usize>) {
        self.members = self.ids.iter().filter_map(|id| index.get(id).copied()).collect();
        self.members.sort_unstable();
        self.members.dedup();
    }
}

/// Owns the vertices and forces of one layout and advances them tick by tick.
///
/// Each tick cools `alpha`, applies the spatial forces in parallel on the simulation's
/// own worker pool, applies the remaining forces in registration order, then integrates
/// velocities into positions.
///
/// # Example
/// ```
/// use force_graph::forces::{CenterForce, LinkForce, ManyBodyForce};
/// use force_graph::models::{Edge, Vertex};
/// use force_graph::simulation::Simulation;
/// use force_graph::utils::SimulationConfig;
///
/// let mut sim = Simulation::with_config(SimulationConfig::default().with_seed(3)).unwrap();
/// sim.place_vertices((0..3u64).map(Vertex::new)).unwrap();
/// sim.add_force("charge", ManyBodyForce::new(-30.0));
/// sim.add_force("links", LinkForce::new(vec![Edge::new(0, 1), Edge::new(1, 2)], 30.0));
/// sim.add_force("center", CenterForce::new(0.0, 0.0));
///
/// let ticks = sim.run().unwrap();
/// assert_eq!(ticks, 300);
/// assert!(sim.alpha() < sim.alpha_min());
/// ```
#[derive(Debug)]
pub struct Simulation {
    config: SimulationConfig,
    alpha: f64,
    vertices: Vec<Vertex>,
    index: HashMap<VertexId, usize>,
    forces: Vec<Registration>,
    pool: ThreadPool,
    rng: StdRng,
    ticks: u64,
    poisoned: bool,
    stop: StopHandle,
    #[cfg(test)]
    panic_next_tick: bool,
}

impl Simulation {
    /// Creates a simulation with the default schedule and a rayon-sized worker pool.
    pub fn new() -> Result<Self, SimulationError> {
        Self::with_config(SimulationConfig::default())
    }

    pub fn with_config(config: SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;

        let mut builder = ThreadPoolBuilder::new().thread_name(|i| format!("force-graph-worker-{}", i));
        if let Some(threads) = config.worker_threads {
            builder = builder.num_threads(threads);
        }
        let pool = builder.build().map_err(|e| SimulationError::WorkerPool(e.to_string()))?;
        debug!("Worker pool ready with {} threads", pool.current_num_threads());

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Ok(Simulation {
            config,
            alpha: config.alpha,
            vertices: Vec::new(),
            index: HashMap::new(),
            forces: Vec::new(),
            pool,
            rng,
            ticks: 0,
            poisoned: false,
            stop: StopHandle::default(),
            #[cfg(test)]
            panic_next_tick: false,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn worker_threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Vertices in placement order. A vertex's index here is its ordinal.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.index.get(&id).map(|&i| &self.vertices[i])
    }

    /// Mutable access for repositioning a vertex or toggling its fixed axes between ticks.
    pub fn vertex_mut(&mut self, id: VertexId) -> Option<&mut Vertex> {
        self.index.get(&id).map(|&i| &mut self.vertices[i])
    }

    pub fn ordinal(&self, id: VertexId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Ticks completed since creation or the last [`clear`](Self::clear).
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// True once a tick has failed. Every later tick fails until [`clear`](Self::clear).
    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    /// Adds a batch of vertices, all or nothing.
    ///
    /// Every vertex is offset onto a phyllotaxis spiral by its ordinal so that no two start
    /// on top of each other. Fixed axes keep the given coordinate.
    ///
    /// # Errors
    /// [`SimulationError::DuplicateVertex`] if an id is already placed or repeats within
    /// the batch. Nothing is placed in that case.
    pub fn place_vertices<I>(&mut self, batch: I) -> Result<(), SimulationError>
    where
        I: IntoIterator<Item = Vertex>,
    {
        let batch: Vec<Vertex> = batch.into_iter().collect();
        let mut seen = HashSet::with_capacity(batch.len());
        for vertex in &batch {
            if self.index.contains_key(&vertex.id()) || !seen.insert(vertex.id()) {
                warn!("Rejecting batch of {} vertices: duplicate id {}", batch.len(), vertex.id());
                return Err(SimulationError::DuplicateVertex(vertex.id()));
            }
        }

        self.vertices.reserve(batch.len());
        for mut vertex in batch {
            let n = self.vertices.len();
            let radius = INITIAL_PLACEMENT_RADIUS * (0.5 + n as f64).sqrt();
            let angle = n as f64 * INITIAL_PLACEMENT_ANGLE;
            if !vertex.is_x_fixed() {
                vertex.x += radius * angle.cos();
            }
            if !vertex.is_y_fixed() {
                vertex.y += radius * angle.sin();
            }
            self.index.insert(vertex.id(), n);
            self.vertices.push(vertex);
        }

        for registration in &mut self.forces {
            registration.force.on_topology_changed();
            if let Some(scope) = &mut registration.scope {
                scope.resolve(&self.index);
            }
        }
        Ok(())
    }

    pub fn place_vertex(&mut self, vertex: Vertex) -> Result<(), SimulationError> {
        self.place_vertices(std::iter::once(vertex))
    }

    /// Registers `force` under `name`, acting on every vertex. Replaces any force already
    /// registered under that name.
    ///
    /// A replacement keeps the old force's position in the application order.
    pub fn add_force(&mut self, name: impl Into<String>, force: impl Into<Force>) {
        self.register(name.into(), force.into(), None);
    }

    /// Registers `force` under `name`, acting only among the vertices with the given ids.
    ///
    /// The force sees nothing else: spatial forces index only these vertices and centering
    /// uses their own mean. Ids that are not placed yet join once they are.
    ///
    /// # Errors
    /// [`SimulationError::SubsetUnsupported`] for the link force, whose edges already pick
    /// the vertices it acts on.
    pub fn add_force_among<I, V>(&mut self, name: impl Into<String>, force: impl Into<Force>, ids: I) -> Result<(), SimulationError>
    where
        I: IntoIterator<Item = V>,
        V: Into<VertexId>,
    {
        let force = force.into();
        if let Force::Link(_) = force {
            warn!("Rejecting scoped registration of the {} force", force.name());
            return Err(SimulationError::SubsetUnsupported(force.name()));
        }
        let scope = Scope::new(ids.into_iter().map(Into::into).collect(), &self.index);
        self.register(name.into(), force, Some(scope));
        Ok(())
    }

    fn register(&mut self, name: String, mut force: Force, scope: Option<Scope>) {
        force.on_topology_changed();

        match self.forces.iter_mut().find(|r| r.name == name) {
            Some(slot) => {
                debug!("Replacing force {}", name);
                slot.force = force;
                slot.scope = scope;
            }
            None => self.forces.push(Registration { name, force, scope }),
        }
    }

    pub fn remove_force(&mut self, name: &str) -> Option<Force> {
        let position = self.forces.iter().position(|r| r.name == name)?;
        Some(self.forces.remove(position).force)
    }

    pub fn force(&self, name: &str) -> Option<&Force> {
        self.forces.iter().find(|r| r.name == name).map(|r| &r.force)
    }

    pub fn force_mut(&mut self, name: &str) -> Option<&mut Force> {
        self.forces.iter_mut().find(|r| r.name == name).map(|r| &mut r.force)
    }

    /// The ids a force was limited to by [`add_force_among`](Self::add_force_among).
    /// `None` for forces acting on every vertex and for unknown names.
    pub fn force_scope(&self, name: &str) -> Option<&[VertexId]> {
        self.forces
            .iter()
            .find(|r| r.name == name)
            .and_then(|r| r.scope.as_ref())
            .map(|scope| scope.ids.as_slice())
    }

    /// Registered force names in application order.
    pub fn force_names(&self) -> impl Iterator<Item = &str> {
        self.forces.iter().map(|r| r.name.as_str())
    }

    pub fn clear_forces(&mut self) {
        self.forces.clear();
    }

    /// Drops every vertex and force and lifts a poisoned state. The schedule is kept.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.index.clear();
        self.forces.clear();
        self.ticks = 0;
        self.poisoned = false;
        self.stop.reset();
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Sets the current temperature, for example to reheat a settled layout.
    pub fn set_alpha(&mut self, alpha: f64) -> Result<(), SimulationError> {
        self.alpha = ensure_finite("alpha", alpha)?;
        Ok(())
    }

    pub fn alpha_min(&self) -> f64 {
        self.config.alpha_min
    }

    pub fn set_alpha_min(&mut self, alpha_min: f64) -> Result<(), SimulationError> {
        self.config.alpha_min = ensure_finite("alpha_min", alpha_min)?;
        Ok(())
    }

    pub fn alpha_decay(&self) -> f64 {
        self.config.alpha_decay
    }

    pub fn set_alpha_decay(&mut self, alpha_decay: f64) -> Result<(), SimulationError> {
        self.config.alpha_decay = ensure_finite("alpha_decay", alpha_decay)?;
        Ok(())
    }

    pub fn alpha_target(&self) -> f64 {
        self.config.alpha_target
    }

    pub fn set_alpha_target(&mut self, alpha_target: f64) -> Result<(), SimulationError> {
        self.config.alpha_target = ensure_finite("alpha_target", alpha_target)?;
        Ok(())
    }

    pub fn velocity_decay(&self) -> f64 {
        self.config.velocity_decay
    }

    pub fn set_velocity_decay(&mut self, velocity_decay: f64) -> Result<(), SimulationError> {
        self.config.velocity_decay = ensure_finite("velocity_decay", velocity_decay)?;
        Ok(())
    }

    /// A handle that makes [`run`](Self::run) return after its current tick.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Advances the layout by one step.
    ///
    /// # Errors
    /// [`SimulationError::WorkerPanicked`] if a worker panics. Vertex state is then
    /// partially updated, so the simulation is poisoned and later ticks return
    /// [`SimulationError::Poisoned`].
    pub fn tick(&mut self) -> Result<(), SimulationError> {
        if self.poisoned {
            return Err(SimulationError::Poisoned);
        }

        self.alpha += (self.config.alpha_target - self.alpha) * self.config.alpha_decay;

        if let Err(err) = self.apply_forces() {
            self.poisoned = true;
            error!("Tick {} failed: {}", self.ticks + 1, err);
            return Err(err);
        }
        self.integrate();

        self.ticks += 1;
        trace!("Tick {} done, alpha {:.6}", self.ticks, self.alpha);
        Ok(())
    }

    /// Ticks until alpha drops below `alpha_min` or a stop is requested.
    pub fn run(&mut self) -> Result<u64, SimulationError> {
        self.run_with_observer(&mut ())
    }

    /// Like [`run`](Self::run), reporting every tick and the end of the run to `observer`.
    ///
    /// Returns the number of ticks performed. A stop request is consumed when the run ends.
    pub fn run_with_observer<O>(&mut self, observer: &mut O) -> Result<u64, SimulationError>
    where
        O: SimulationObserver + ?Sized,
    {
        let started = Instant::now();
        let mut count = 0;

        while self.alpha >= self.config.alpha_min && !self.stop.is_stopped() {
            if let Err(err) = self.tick() {
                self.stop.reset();
                return Err(err);
            }
            count += 1;
            observer.on_tick(self);
        }

        let stopped = self.stop.is_stopped();
        self.stop.reset();
        observer.on_end(self);
        info!(
            "Run {} after {} ticks in {:?}, alpha {:.6}",
            if stopped { "stopped" } else { "settled" },
            count,
            started.elapsed(),
            self.alpha
        );
        Ok(count)
    }

    fn apply_forces(&mut self) -> Result<(), SimulationError> {
        let alpha = self.alpha;
        let parts = self.pool.current_num_threads() * self.config.partitions_per_worker.max(1);
        #[cfg(test)]
        let panic_now = std::mem::take(&mut self.panic_next_tick);

        for registration in self.forces.iter_mut().filter(|r| r.force.supports_partitioned_apply()) {
            let members = registration.scope.as_ref().map(|scope| scope.members.as_slice());
            match members {
                Some(members) => registration.force.prepare_among(&self.vertices, members),
                None => registration.force.prepare(&self.vertices),
            }

            let ranges = partition_ranges(members.map_or(self.vertices.len(), <[usize]>::len), parts);
            let seeds: Vec<u64> = ranges.iter().map(|_| self.rng.random()).collect();
            let vertices = &self.vertices;
            let force = &registration.force;
            let partials = run_partitions(&self.pool, &ranges, &seeds, |range, rng, deltas| {
                #[cfg(test)]
                if panic_now {
                    panic!("injected worker failure");
                }
                match members {
                    Some(members) => force.accumulate(vertices, members[range].iter().copied(), alpha, rng, deltas),
                    None => force.accumulate(vertices, range, alpha, rng, deltas),
                }
            })?;

            for deltas in &partials {
                deltas.apply_to(&mut self.vertices);
            }
        }

        for registration in self.forces.iter_mut().filter(|r| !r.force.supports_partitioned_apply()) {
            match &registration.scope {
                Some(scope) => registration.force.apply_among(&mut self.vertices, &scope.members, alpha, &mut self.rng)?,
                None => registration.force.apply(&mut self.vertices, alpha, &mut self.rng),
            }
        }
        Ok(())
    }

    fn integrate(&mut self) {
        let decay = self.config.velocity_decay;
        self.pool.install(|| {
            self.vertices.par_iter_mut().for_each(|vertex| {
                if vertex.is_x_fixed() {
                    vertex.vx = 0.0;
                } else {
                    vertex.vx *= decay;
                    vertex.x += vertex.vx;
                }
                if vertex.is_y_fixed() {
                    vertex.vy = 0.0;
                } else {
                    vertex.vy *= decay;
                    vertex.y += vertex.vy;
                }
            });
        });
    }

    /// Makes every worker of the next tick's first partitioned force panic.
    #[cfg(test)]
    pub(crate) fn inject_worker_panic(&mut self) {
        self.panic_next_tick = true;
    }
}
