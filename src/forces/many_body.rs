use rand::rngs::StdRng;

use crate::forces::VelocityDeltas;
use crate::models::Vertex;
use crate::quadtree::{QuadNode, Quadtree};
use crate::utils::{jiggle, DEFAULT_DISTANCE_MIN, DEFAULT_MANY_BODY_STRENGTH, DEFAULT_THETA};

/// Aggregate charge of a quadtree node: the `|value|`-weighted centroid and the signed total.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct QuadSummary {
    pub x: f64,
    pub y: f64,
    pub value: f64,
}

/// N-body attraction (positive strength) or repulsion (negative strength) between all vertices,
/// approximated with the Barnes-Hut criterion.
///
/// A node whose box width `w` satisfies `w / d < theta` is treated as a single body at its
/// centroid. Smaller `theta` means more exact and slower; `theta = 0` visits every leaf.
///
/// # Example
/// ```
/// use force_graph::forces::ManyBodyForce;
///
/// let force = ManyBodyForce::new(-500.0).with_theta(0.5).with_distance_max(1000.0);
/// assert_eq!(force.strength(), -500.0);
/// assert_eq!(force.theta(), 0.5);
/// ```
#[derive(Debug, Clone)]
pub struct ManyBodyForce {
    strength: f64,
    theta2: f64,
    distance_min2: f64,
    distance_max2: f64,
    tree: Quadtree,
    summaries: Vec<QuadSummary>,
}

impl Default for ManyBodyForce {
    fn default() -> Self {
        Self::new(DEFAULT_MANY_BODY_STRENGTH)
    }
}

impl ManyBodyForce {
    pub fn new(strength: f64) -> Self {
        ManyBodyForce {
            strength,
            theta2: DEFAULT_THETA * DEFAULT_THETA,
            distance_min2: DEFAULT_DISTANCE_MIN * DEFAULT_DISTANCE_MIN,
            distance_max2: f64::MAX,
            tree: Quadtree::new(),
            summaries: Vec::new(),
        }
    }

    pub fn with_theta(mut self, theta: f64) -> Self {
        self.theta2 = theta * theta;
        self
    }

    /// Distances below this are clamped, which bounds the force between close vertices.
    pub fn with_distance_min(mut self, distance: f64) -> Self {
        self.distance_min2 = distance * distance;
        self
    }

    /// Vertices and aggregates farther away than this exert no force.
    pub fn with_distance_max(mut self, distance: f64) -> Self {
        self.distance_max2 = distance * distance;
        self
    }

    pub fn strength(&self) -> f64 {
        self.strength
    }

    pub fn set_strength(&mut self, strength: f64) {
        self.strength = strength;
    }

    pub fn theta(&self) -> f64 {
        self.theta2.sqrt()
    }

    /// Summary of the quadtree root after the last [`prepare`](Self::prepare).
    pub fn root_summary(&self) -> Option<QuadSummary> {
        self.tree.root().map(|root| self.summaries[root.index()])
    }

    /// Rebuilds the quadtree over current positions and aggregates charges bottom-up.
    pub fn prepare(&mut self, vertices: &[Vertex]) {
        self.summarize(Quadtree::from_points(vertices, |v| v.x, |v| v.y));
    }

    /// Like [`prepare`](Self::prepare), but only the vertices at `members` carry charge.
    pub fn prepare_among(&mut self, vertices: &[Vertex], members: &[usize]) {
        let mut tree = Quadtree::new();
        tree.extend(members.iter().filter_map(|&i| vertices.get(i).map(|v| (i, v.x, v.y))));
        self.summarize(tree);
    }

    fn summarize(&mut self, tree: Quadtree) {
        self.tree = tree;
        let mut summaries = vec![QuadSummary::default(); self.tree.node_count()];

        self.tree.visit_after(|quad| {
            let summary = match *self.tree.node(quad.node) {
                QuadNode::Leaf { x, y, .. } => QuadSummary {
                    x,
                    y,
                    value: self.strength * self.tree.leaf_items(quad.node).count() as f64,
                },
                QuadNode::Internal { children } => {
                    let (mut x, mut y, mut value, mut weight) = (0.0, 0.0, 0.0, 0.0);
                    for child in children.iter().flatten() {
                        let c = summaries[child.index()];
                        let w = c.value.abs();
                        if w != 0.0 {
                            value += c.value;
                            weight += w;
                            x += w * c.x;
                            y += w * c.y;
                        }
                    }
                    if weight > 0.0 {
                        QuadSummary { x: x / weight, y: y / weight, value }
                    } else {
                        QuadSummary::default()
                    }
                }
            };
            summaries[quad.node.index()] = summary;
        });

        self.summaries = summaries;
    }

    /// Computes the velocity change of every vertex in `indices` against the prepared tree.
    pub fn accumulate<I>(&self, vertices: &[Vertex], indices: I, alpha: f64, rng: &mut StdRng, deltas: &mut VelocityDeltas)
    where
        I: IntoIterator<Item = usize>,
    {
        for i in indices {
            let (dvx, dvy) = self.force_on(i, vertices, alpha, rng);
            deltas.push(i, dvx, dvy);
        }
    }

    fn force_on(&self, i: usize, vertices: &[Vertex], alpha: f64, rng: &mut StdRng) -> (f64, f64) {
        let vertex = &vertices[i];
        let (mut dvx, mut dvy) = (0.0, 0.0);

        self.tree.visit(|quad| {
            let summary = self.summaries[quad.node.index()];
            if summary.value == 0.0 {
                return true;
            }

            let mut x = summary.x - vertex.x;
            let mut y = summary.y - vertex.y;
            let w = quad.width();
            let mut l = x * x + y * y;

            // Far enough away to treat the whole node as one body.
            if w * w / self.theta2 < l {
                if l < self.distance_max2 {
                    if x == 0.0 {
                        x = jiggle(rng);
                        l += x * x;
                    }
                    if y == 0.0 {
                        y = jiggle(rng);
                        l += y * y;
                    }
                    if l < self.distance_min2 {
                        l = (self.distance_min2 * l).sqrt();
                    }
                    dvx += x * summary.value * alpha / l;
                    dvy += y * summary.value * alpha / l;
                }
                return true;
            }

            if !self.tree.node(quad.node).is_leaf() || l >= self.distance_max2 {
                return false;
            }

            if self.tree.leaf_items(quad.node).any(|j| j != i) {
                if x == 0.0 {
                    x = jiggle(rng);
                    l += x * x;
                }
                if y == 0.0 {
                    y = jiggle(rng);
                    l += y * y;
                }
                if l < self.distance_min2 {
                    l = (self.distance_min2 * l).sqrt();
                }
            }

            for j in self.tree.leaf_items(quad.node) {
                if j != i {
                    let k = self.strength * alpha / l;
                    dvx += x * k;
                    dvy += y * k;
                }
            }
            false
        });

        (dvx, dvy)
    }
}
