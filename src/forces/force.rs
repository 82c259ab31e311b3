use rand::rngs::StdRng;

use crate::forces::{CenterForce, CollideForce, LinkForce, ManyBodyForce, VelocityDeltas, XForce, YForce};
use crate::models::Vertex;
use crate::utils::SimulationError;

/// A force that can be registered with a [`Simulation`](crate::simulation::Simulation).
///
/// `ManyBody` and `Collide` read a spatial index that is built once per tick, so their
/// per-vertex work can be split across workers. The rest are applied on the calling thread.
#[derive(Debug, Clone)]
pub enum Force {
    ManyBody(ManyBodyForce),
    Collide(CollideForce),
    Link(LinkForce),
    Center(CenterForce),
    X(XForce),
    Y(YForce),
}

impl Force {
    pub fn name(&self) -> &'static str {
        match self {
            Force::ManyBody(_) => "many_body",
            Force::Collide(_) => "collide",
            Force::Link(_) => "link",
            Force::Center(_) => "center",
            Force::X(_) => "x",
            Force::Y(_) => "y",
        }
    }

    /// Whether [`prepare`](Self::prepare) and [`accumulate`](Self::accumulate) do the work of this force.
    pub fn supports_partitioned_apply(&self) -> bool {
        matches!(self, Force::ManyBody(_) | Force::Collide(_))
    }

    /// Builds per-tick shared state. Must complete before any [`accumulate`](Self::accumulate) call.
    pub fn prepare(&mut self, vertices: &[Vertex]) {
        match self {
            Force::ManyBody(force) => force.prepare(vertices),
            Force::Collide(force) => force.prepare(vertices),
            _ => {}
        }
    }

    /// Like [`prepare`](Self::prepare), indexing only the vertices at `members`.
    pub fn prepare_among(&mut self, vertices: &[Vertex], members: &[usize]) {
        match self {
            Force::ManyBody(force) => force.prepare_among(vertices, members),
            Force::Collide(force) => force.prepare_among(vertices, members),
            _ => {}
        }
    }

    /// Records the velocity changes owed to the vertices in `indices`.
    ///
    /// Only reads vertex state, so partitions may run concurrently. Forces without
    /// partitioned support record nothing.
    pub fn accumulate<I>(&self, vertices: &[Vertex], indices: I, alpha: f64, rng: &mut StdRng, deltas: &mut VelocityDeltas)
    where
        I: IntoIterator<Item = usize>,
    {
        match self {
            Force::ManyBody(force) => force.accumulate(vertices, indices, alpha, rng, deltas),
            Force::Collide(force) => force.accumulate(vertices, indices, alpha, rng, deltas),
            _ => {}
        }
    }

    /// Applies the force to every vertex on the calling thread.
    ///
    /// # Example
    /// ```
    /// use force_graph::forces::{Force, XForce};
    /// use force_graph::models::Vertex;
    /// use rand::SeedableRng;
    /// use rand::rngs::StdRng;
    ///
    /// let mut force = Force::from(XForce::new(10.0).with_strength(0.5));
    /// let mut vertices = vec![Vertex::at(0, 2.0, 0.0)];
    /// force.apply(&mut vertices, 0.5, &mut StdRng::seed_from_u64(0));
    /// assert_eq!(vertices[0].vx, 2.0);
    /// ```
    pub fn apply(&mut self, vertices: &mut [Vertex], alpha: f64, rng: &mut StdRng) {
        match self {
            Force::ManyBody(_) | Force::Collide(_) => {
                self.prepare(vertices);
                let mut deltas = VelocityDeltas::with_capacity(vertices.len());
                self.accumulate(vertices, 0..vertices.len(), alpha, rng, &mut deltas);
                deltas.apply_to(vertices);
            }
            Force::Link(force) => force.apply(vertices, alpha, rng),
            Force::Center(force) => force.apply(vertices),
            Force::X(force) => force.apply_all(vertices.iter_mut(), alpha),
            Force::Y(force) => force.apply_all(vertices.iter_mut(), alpha),
        }
    }

    /// Applies the force to the vertices at `subset` only.
    ///
    /// Spatial forces still index every vertex, so subset members feel the whole graph.
    /// The link force works on edges rather than vertices and rejects subsets.
    pub fn apply_subset(&mut self, vertices: &mut [Vertex], subset: &[usize], alpha: f64, rng: &mut StdRng) -> Result<(), SimulationError> {
        match self {
            Force::ManyBody(_) | Force::Collide(_) => {
                self.prepare(vertices);
                let mut deltas = VelocityDeltas::with_capacity(subset.len());
                let n = vertices.len();
                let in_range = subset.iter().copied().filter(|&i| i < n);
                self.accumulate(vertices, in_range, alpha, rng, &mut deltas);
                deltas.apply_to(vertices);
            }
            Force::Link(_) => return Err(SimulationError::SubsetUnsupported(self.name())),
            Force::Center(force) => force.apply_subset(vertices, subset),
            Force::X(force) => force.apply_subset(vertices, subset, alpha),
            Force::Y(force) => force.apply_subset(vertices, subset, alpha),
        }
        Ok(())
    }

    /// Applies the force as if the vertices at `members` were the whole graph.
    ///
    /// Unlike [`apply_subset`](Self::apply_subset), spatial forces index only the members
    /// and centering takes the members' own mean. `members` must not repeat an ordinal.
    pub fn apply_among(&mut self, vertices: &mut [Vertex], members: &[usize], alpha: f64, rng: &mut StdRng) -> Result<(), SimulationError> {
        match self {
            Force::ManyBody(_) | Force::Collide(_) => {
                self.prepare_among(vertices, members);
                let mut deltas = VelocityDeltas::with_capacity(members.len());
                let n = vertices.len();
                let in_range = members.iter().copied().filter(|&i| i < n);
                self.accumulate(vertices, in_range, alpha, rng, &mut deltas);
                deltas.apply_to(vertices);
            }
            Force::Link(_) => return Err(SimulationError::SubsetUnsupported(self.name())),
            Force::Center(force) => force.apply_among(vertices, members),
            Force::X(force) => force.apply_subset(vertices, members, alpha),
            Force::Y(force) => force.apply_subset(vertices, members, alpha),
        }
        Ok(())
    }

    /// Called whenever vertices are placed or the force is (re)registered.
    pub fn on_topology_changed(&mut self) {
        if let Force::Link(force) = self {
            force.on_topology_changed();
        }
    }
}

impl From<ManyBodyForce> for Force {
    fn from(force: ManyBodyForce) -> Self {
        Force::ManyBody(force)
    }
}

impl From<CollideForce> for Force {
    fn from(force: CollideForce) -> Self {
        Force::Collide(force)
    }
}

impl From<LinkForce> for Force {
    fn from(force: LinkForce) -> Self {
        Force::Link(force)
    }
}

impl From<CenterForce> for Force {
    fn from(force: CenterForce) -> Self {
        Force::Center(force)
    }
}

impl From<XForce> for Force {
    fn from(force: XForce) -> Self {
        Force::X(force)
    }
}

impl From<YForce> for Force {
    fn from(force: YForce) -> Self {
        Force::Y(force)
    }
}
