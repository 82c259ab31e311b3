use std::collections::HashMap;

use log::{debug, warn};
use rand::rngs::StdRng;

use crate::models::{Edge, Vertex, VertexId};
use crate::utils::{jiggle, DEFAULT_FORCE_STRENGTH};

/// An edge resolved to vertex ordinals, with its degree-derived coefficients.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ResolvedLink {
    source: usize,
    target: usize,
    bias: f64,
    strength: f64,
}

/// Spring force pulling each edge's endpoints toward a target distance.
///
/// Endpoints are stored as ids. They are resolved to ordinals lazily, the first time the
/// force is applied after a topology change, so edges may be registered before their
/// vertices are placed.
///
/// # Example
/// ```
/// use force_graph::forces::LinkForce;
/// use force_graph::models::Edge;
///
/// let mut links = LinkForce::new(vec![Edge::new(0, 1)], 30.0);
/// links.add_edges([Edge::new(1, 2), Edge::new(2, 0)]);
/// assert_eq!(links.edges().len(), 3);
/// assert_eq!(links.distance(), 30.0);
/// ```
#[derive(Debug, Clone)]
pub struct LinkForce {
    edges: Vec<Edge>,
    distance: f64,
    base_strength: f64,
    links: Vec<ResolvedLink>,
    stale: bool,
}

impl LinkForce {
    pub fn new(edges: Vec<Edge>, distance: f64) -> Self {
        LinkForce {
            edges,
            distance,
            base_strength: DEFAULT_FORCE_STRENGTH,
            links: Vec::new(),
            stale: true,
        }
    }

    /// Scales every link's strength. Each link is further divided by the smaller endpoint degree.
    pub fn with_strength(mut self, base_strength: f64) -> Self {
        self.base_strength = base_strength;
        self
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn base_strength(&self) -> f64 {
        self.base_strength
    }

    pub fn add_edges<I>(&mut self, edges: I)
    where
        I: IntoIterator<Item = Edge>,
    {
        self.edges.extend(edges);
        self.on_topology_changed();
    }

    pub fn on_topology_changed(&mut self) {
        self.stale = true;
    }

    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Number of edges that resolved to placed vertices on the last refresh.
    pub fn resolved_len(&self) -> usize {
        self.links.len()
    }

    fn refresh(&mut self, vertices: &[Vertex]) {
        let ordinals: HashMap<VertexId, usize> = vertices.iter().enumerate().map(|(i, v)| (v.id(), i)).collect();

        let mut pairs = Vec::with_capacity(self.edges.len());
        for edge in &self.edges {
            match (ordinals.get(&edge.source()), ordinals.get(&edge.target())) {
                (Some(&s), Some(&t)) if s != t => pairs.push((s, t)),
                (Some(_), Some(_)) => warn!("Skipping self-loop on vertex {}", edge.source()),
                _ => warn!("Skipping edge {} -> {}: endpoint not placed", edge.source(), edge.target()),
            }
        }

        let mut degree = vec![0usize; vertices.len()];
        for &(s, t) in &pairs {
            degree[s] += 1;
            degree[t] += 1;
        }

        self.links = pairs
            .into_iter()
            .map(|(source, target)| {
                let (ds, dt) = (degree[source] as f64, degree[target] as f64);
                ResolvedLink {
                    source,
                    target,
                    bias: ds / (ds + dt),
                    strength: self.base_strength / ds.min(dt),
                }
            })
            .collect();
        self.stale = false;

        debug!("Link force refreshed: {} of {} edges resolved", self.links.len(), self.edges.len());
    }

    /// Moves each edge's endpoints toward the target distance, one edge at a time.
    ///
    /// Later edges see the velocity changes made by earlier ones.
    pub fn apply(&mut self, vertices: &mut [Vertex], alpha: f64, rng: &mut StdRng) {
        if self.stale {
            self.refresh(vertices);
        }

        for link in &self.links {
            let (sx, sy) = vertices[link.source].projected();
            let (tx, ty) = vertices[link.target].projected();
            let mut x = tx - sx;
            let mut y = ty - sy;
            if x == 0.0 {
                x = jiggle(rng);
            }
            if y == 0.0 {
                y = jiggle(rng);
            }

            let l = (x * x + y * y).sqrt();
            let k = (l - self.distance) / l * alpha * link.strength;
            x *= k;
            y *= k;

            let target = &mut vertices[link.target];
            target.vx -= x * link.bias;
            target.vy -= y * link.bias;

            let source = &mut vertices[link.source];
            source.vx += x * (1.0 - link.bias);
            source.vy += y * (1.0 - link.bias);
        }
    }
}
